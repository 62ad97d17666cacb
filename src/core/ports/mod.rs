//! Port traits (interfaces) for external collaborators
//!
//! The core never depends on how projects are drawn. The board calls
//! into these traits; implementations live in the `adapters` module.

mod render_surface;

pub use render_surface::RenderSurface;
