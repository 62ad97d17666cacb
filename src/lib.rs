//! kanban - A reactive project board with declarative validation and
//! drag-and-drop status changes
//!
//! This library provides the project store, the field validation registry,
//! the drag exchange protocol and a terminal render surface that ties them
//! together.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod board;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod session;
