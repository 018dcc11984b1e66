//! Property tests for matching and windowing invariants

use kwic_core::{segment, PatternMatcher, PatternSpec, UnitMode, WindowExtractor};
use proptest::prelude::*;

fn corpus_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("the"),
            Just("The"),
            Just("fox"),
            Just("dog"),
            Just("a"),
            Just("über"),
            Just("猫"),
        ],
        0..40,
    )
    .prop_flat_map(|words| {
        let n = words.len();
        (
            Just(words),
            prop::collection::vec(prop_oneof![Just(" "), Just(", "), Just(".\n")], n),
        )
    })
    .prop_map(|(words, seps)| {
        words
            .iter()
            .zip(seps.iter())
            .map(|(w, s)| format!("{w}{s}"))
            .collect()
    })
}

fn modes() -> impl Strategy<Value = UnitMode> {
    prop_oneof![Just(UnitMode::Word), Just(UnitMode::Character)]
}

proptest! {
    #[test]
    fn unit_offsets_stay_inside_the_document(text in corpus_text(), mode in modes()) {
        for unit in segment(&text, mode) {
            prop_assert!(unit.start <= unit.end);
            prop_assert!(unit.end <= text.len());
            prop_assert_eq!(&text[unit.start..unit.end], unit.text);
        }
    }

    #[test]
    fn spans_are_increasing_and_disjoint(text in corpus_text(), mode in modes()) {
        let units = segment(&text, mode);
        let matcher = PatternMatcher::new(&PatternSpec::phrase("the fox"), mode, false).unwrap();

        let spans = matcher.find_all(&text, &units);
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end_unit <= pair[1].start_unit);
        }
    }

    #[test]
    fn windows_are_bounded_and_clamped(
        text in corpus_text(),
        mode in modes(),
        size in 0usize..6,
    ) {
        let units = segment(&text, mode);
        let matcher = PatternMatcher::new(&PatternSpec::literal("the"), mode, false).unwrap();
        let extractor = WindowExtractor::new(size, mode);

        for span in matcher.find_iter(&text, &units) {
            let window = extractor.extract(&text, &units, &span);
            prop_assert!(window.preceding_units <= size);
            prop_assert!(window.following_units <= size);

            let (before, after) = match mode {
                UnitMode::Word => (span.start_unit, units.len() - span.end_unit),
                UnitMode::Character => (
                    text[..span.start_offset].chars().count(),
                    text[span.end_offset..].chars().count(),
                ),
            };
            prop_assert_eq!(window.preceding_units, size.min(before));
            prop_assert_eq!(window.following_units, size.min(after));
        }
    }

    #[test]
    fn rows_reconstruct_a_document_substring(
        text in corpus_text(),
        mode in modes(),
        size in 0usize..6,
    ) {
        let units = segment(&text, mode);
        let matcher = PatternMatcher::new(&PatternSpec::literal("fox"), mode, false).unwrap();
        let extractor = WindowExtractor::new(size, mode);

        for span in matcher.find_iter(&text, &units) {
            let window = extractor.extract(&text, &units, &span);
            let covered = &text[window.preceding_start..window.following_end];

            match mode {
                UnitMode::Character => {
                    let joined = format!(
                        "{}{}{}",
                        window.preceding_text, span.matched_text, window.following_text
                    );
                    prop_assert_eq!(covered, joined.as_str());
                }
                UnitMode::Word => {
                    let expected: Vec<&str> = [
                        window.preceding_text.as_str(),
                        span.matched_text.as_str(),
                        window.following_text.as_str(),
                    ]
                    .iter()
                    .flat_map(|part| part.split_whitespace())
                    .collect();
                    let covered_units: Vec<&str> =
                        segment(covered, UnitMode::Word).iter().map(|u| u.text).collect();
                    prop_assert_eq!(covered_units, expected);
                }
            }
        }
    }
}
