//! Storage infrastructure: configuration file persistence.
//!
//! A thin adapter between the agent and the file system.  The `config`
//! sub-module handles:
//!
//! - Reading the TOML configuration file from the platform-appropriate
//!   directory.
//! - Writing changes back to disk.
//! - Providing sensible defaults when the file does not exist yet (first run).
//!
//! Keeping storage concerns here means the file format could change without
//! touching any other part of the codebase.

pub mod config;
