//! Fixed configuration constants
//!
//! The simulation runs at a compile-time grid size; no runtime configuration
//! surface exists. All grids and the output surface share these dimensions
//! for the lifetime of the process.

/// Grid width in cells. Also the window width in pixels (1:1 mapping).
pub const GRID_WIDTH: u32 = 512;

/// Grid height in cells. Also the window height in pixels (1:1 mapping).
pub const GRID_HEIGHT: u32 = 512;

/// Minimum wall-clock time between automaton steps, in seconds.
pub const UPDATE_INTERVAL: f32 = 0.016;

/// Probability that a cell of the secondary channel starts alive.
pub const SPAWN_PROBABILITY: f64 = 0.000021;

/// Compute workgroup edge length. Dispatch covers the full grid by rounding
/// the workgroup count up; the shader bounds-checks the remainder.
pub const WORKGROUP_SIZE: u32 = 16;
