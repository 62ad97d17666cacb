//! Core domain logic for kanban
//!
//! This module contains pure business logic with no I/O dependencies.
//! Presentation is reached only through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Project, ProjectStatus, Rule)
//! - `services/` - Reactive store, validation registry, drag exchange
//! - `ports/` - Trait definitions for the render surface

pub mod models;
pub mod ports;
pub mod services;
