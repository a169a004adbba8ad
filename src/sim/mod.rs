//! Simulation system
//!
//! Double-buffered automaton state, the compute stepper that advances it, the
//! fixed-interval scheduler that decouples step rate from frame rate, and the
//! startup seeding of the initial grids.

pub mod buffer_pair;
pub mod grid;
pub mod scheduler;
pub mod seeder;
pub mod stepper;

/// Default two-channel automaton kernel. The stepper treats kernel content as
/// opaque; only the binding slots in [`stepper::Stepper`] are contractual.
pub const AUTOMATON_SHADER: &str = include_str!("automaton.wgsl");
