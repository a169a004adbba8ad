// src/lib.rs
//! Petri
//!
//! A two-channel, grid-based cellular automaton that lives entirely on the
//! GPU, built on wgpu and winit. The compute kernel reads each channel's
//! front grid, writes its back grid and an RGBA output surface, and the
//! display pass draws that surface full-screen; front and back swap roles
//! after every step.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod sim;

// Re-export main types for convenience
pub use app::PetriApp;
