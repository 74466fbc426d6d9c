//! # Contactbook Architecture
//!
//! Contactbook is a personal contact directory. The library holds every rule about
//! contacts; the `contactbook` binary is one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - One-shot subcommands and the interactive shell           │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Raw input → validated contacts, query → single contact   │
//! │  - Returns CmdResult (contacts + messages), never prints    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Address Book (book.rs)                                     │
//! │  - Contacts plus phone/email indexes, uniqueness, ordering  │
//! │  - Dirty tracking, save/load through a ContactStore         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContactStore trait                                       │
//! │  - JsonStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation ([`validators`]) sits beside the stack: contacts are validated
//! when they are built, so the address book itself only deals with
//! uniqueness and consistency.
//!
//! ## Module Overview
//!
//! - [`book`]: The address book and its indexes
//! - [`commands`]: Business logic for each user command
//! - [`store`]: Persistence port and implementations
//! - [`model`]: `Contact`, `ContactId` and the persisted `ContactRecord`
//! - [`validators`]: Name, phone and email validation
//! - [`config`]: Configuration management
//! - [`init`]: Data directory and session setup
//! - [`error`]: Error types

pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod validators;
