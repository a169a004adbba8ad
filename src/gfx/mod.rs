//! # Graphics Module
//!
//! Device and surface bootstrap, the output surface the automaton kernel
//! writes into, and the presentation pass that samples it across a
//! full-screen quad.
//!
//! The graphics system is organized into three components:
//!
//! - **Render Engine** ([`render_engine`]) - wgpu context, display pipeline,
//!   per-frame presentation
//! - **Output Surface** ([`output_surface`]) - the image written by the
//!   compute stage and sampled during presentation
//! - **Vertex Data** ([`vertex`]) - the display quad's GPU vertex format

pub mod output_surface;
pub mod render_engine;
pub mod vertex;

// Re-export commonly used types
pub use output_surface::OutputSurface;
pub use render_engine::RenderEngine;
