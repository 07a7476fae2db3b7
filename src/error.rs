//! Error type shared by the plotting, fitting and rendering code.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
  /// The x and y columns of a layer or fit have different lengths.
  #[error("x has {x} values but y has {y}")]
  LengthMismatch { x: usize, y: usize },

  /// A line fit needs at least two usable points.
  #[error("cannot fit a line through {count} point(s)")]
  TooFewPoints { count: usize },

  /// Every x value is the same, so the slope is undefined.
  #[error("cannot fit a line: all x values are identical")]
  Singular,

  #[error(transparent)]
  Polars(#[from] polars::error::PolarsError),

  #[error("failed to start the event loop: {0}")]
  EventLoop(#[from] winit::error::EventLoopError),

  #[error("failed to create a window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("failed to create a surface: {0}")]
  Surface(#[from] vello::wgpu::CreateSurfaceError),

  #[error("no surface format is supported by the adapter")]
  NoSurfaceFormat,

  #[error("failed to find a GPU adapter: {0}")]
  Adapter(#[from] vello::wgpu::RequestAdapterError),

  #[error("failed to create a GPU device: {0}")]
  Device(#[from] vello::wgpu::RequestDeviceError),

  #[error("GPU poll failed: {0}")]
  Poll(#[from] vello::wgpu::PollError),

  #[error("failed to read back the rendered image: {0}")]
  BufferMap(#[from] vello::wgpu::BufferAsyncError),

  #[error("render readback was cancelled")]
  ReadbackCancelled,

  #[error("render failed: {0}")]
  Render(#[from] vello::Error),

  #[error("failed to write {path}: {source}")]
  Image {
    path:   PathBuf,
    #[source]
    source: image::ImageError,
  },

  #[error("rendered buffer does not match a {width}x{height} image")]
  ImageSize { width: u32, height: u32 },
}
