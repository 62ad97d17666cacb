//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `terminal/` - Render surface printing to stdout (human or JSON)

pub mod terminal;

pub use terminal::TerminalSurface;
