//! # CLI Layer
//!
//! This module is **one possible UI client** for contactbook. It is the only
//! place in the codebase that:
//! - Parses arguments (clap)
//! - Reads from stdin and writes to stdout/stderr
//! - Decides exit codes
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` dispatch, context setup, one-shot handlers
//! - `render`: contact tables and message printing
//! - `shell`: the interactive, menu-driven session

pub mod commands;
pub mod render;
pub mod setup;
pub mod shell;
