//! Startup errors for the browser shell

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("no global window")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("missing page element #{0}")]
    MissingElement(&'static str),

    #[error("element #{0} is not a canvas")]
    NotACanvas(&'static str),

    #[error("failed to create render surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
