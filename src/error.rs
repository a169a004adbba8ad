//! Error taxonomy
//!
//! Every failure in this crate is fatal: context bootstrap, resource
//! allocation, and dispatch rejection all terminate the process after a
//! diagnostic naming the failing stage. There is no recoverable class and no
//! degraded-mode continuation.

use thiserror::Error;

/// Failures while bringing up the GPU context and presentation surface.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to create presentation surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire GPU device")]
    Device(#[from] wgpu::RequestDeviceError),
}
