use std::{path::Path, sync::mpsc};

use image::RgbaImage;
use tracing::info;
use vello::wgpu;

use crate::{
  Error, Result,
  render::{GpuHandle, RenderConfig},
};

/// Copies the rendered texture back from the GPU and writes it out as an image.
pub fn save(handle: &GpuHandle, config: &RenderConfig, path: &Path) -> Result<()> {
  // Rows must be a multiple of 256 bytes. Every config used here already is.
  debug_assert_eq!((4 * config.width) % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);

  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               u64::from(4 * config.width * config.height),
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(4 * config.width),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let buffer_slice = buffer.slice(..);
  let (sender, receiver) = mpsc::channel();
  buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
    let _ = sender.send(result);
  });
  handle.device.poll(wgpu::PollType::Wait)?;
  receiver.recv().map_err(|_| Error::ReadbackCancelled)??;

  let pixels = buffer_slice.get_mapped_range().to_vec();
  buffer.unmap();

  let image = RgbaImage::from_raw(config.width, config.height, pixels)
    .ok_or(Error::ImageSize { width: config.width, height: config.height })?;
  image
    .save(path)
    .map_err(|source| Error::Image { path: path.to_path_buf(), source })?;

  info!(path = %path.display(), "saved plot");
  Ok(())
}
