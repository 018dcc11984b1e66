//! kwic CLI library
//!
//! This library provides the command-line interface for building
//! keyword-in-context concordances over files on disk.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::CliError;
