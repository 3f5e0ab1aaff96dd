//! # apax (library surface)
//!
//! The binary's modules, exported so integration tests can exercise the
//! config layer and CLI plumbing directly.

pub mod cli;
pub mod config;
pub mod prefs;
