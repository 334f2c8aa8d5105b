//! Protocol module containing the command-surface types.

pub mod commands;

pub use commands::*;
