//! MapQuery CLI library.
//!
//! Argument parsing helpers and output rendering for the `mapquery-cli`
//! binary, kept in a library so they can be unit tested.

pub mod args;
pub mod output;
pub mod terminal;
