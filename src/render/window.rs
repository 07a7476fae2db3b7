use std::sync::Arc;

use tracing::{debug, info, warn};
use vello::wgpu;
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::Key,
  window::{Window, WindowId},
};

use crate::{
  Error, Plot, Result,
  render::{GpuHandle, Render, RenderConfig},
};

pub fn show(plot: &Plot) -> Result<()> {
  let event_loop = EventLoop::new()?;
  event_loop.set_control_flow(ControlFlow::Wait);

  let mut app = App { plot, stale: true, render: None, init: None, error: None };
  event_loop.run_app(&mut app)?;
  info!("window closed");

  match app.error.take() {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

struct App<'a> {
  plot:   &'a Plot,
  stale:  bool,
  render: Option<Render>,

  init:  Option<Init>,
  /// First failure inside an event callback, returned once the loop exits.
  error: Option<Error>,
}

struct Init {
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,
  window:  Arc<Window>,

  blit:  wgpu::util::TextureBlitter,
  vello: vello::Renderer,
}

impl App<'_> {
  fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
    self.error.get_or_insert(error);
    event_loop.exit();
  }

  fn redraw(&mut self) -> Result<()> {
    let Some(init) = &mut self.init else { return Ok(()) };

    if self.stale || self.render.is_none() {
      self.stale = false;

      let render = self.render.get_or_insert_with(|| Render::new(self.plot.theme.background));
      render.scene.reset();

      let config = RenderConfig { width: init.config.width, height: init.config.height };
      self.plot.draw(render, config.size());
      render.render_to(&mut init.vello, &init.handle, &config)?;
    }

    init.present();
    Ok(())
  }
}

impl ApplicationHandler for App<'_> {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match Init::new(event_loop) {
      Ok(init) => {
        init.window.request_redraw();
        self.init = Some(init);
      }
      Err(e) => self.fail(event_loop, e),
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => {
        event_loop.exit();
      }

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key: Key::Character(c), .. }, ..
      } if c == "q" => {
        event_loop.exit();
      }

      WindowEvent::Resized(new_size) => {
        if let Some(init) = &mut self.init {
          if new_size.width > 0 && new_size.height > 0 {
            debug!(width = new_size.width, height = new_size.height, "resized");
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init
              .handle
              .resize(&RenderConfig { width: init.config.width, height: init.config.height });
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::RedrawRequested => {
        if let Err(e) = self.redraw() {
          self.fail(event_loop, e);
        }
      }

      _ => (),
    }
  }
}

impl Init {
  fn new(event_loop: &ActiveEventLoop) -> Result<Init> {
    let window = Arc::new(
      event_loop.create_window(
        Window::default_attributes()
          .with_title("fitplot")
          .with_inner_size(LogicalSize::new(960, 720))
          .with_min_inner_size(LogicalSize::new(100, 100)),
      )?,
    );
    let size = window.inner_size();
    info!(width = size.width, height = size.height, "opened window");

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone())?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| f.is_srgb())
      .or_else(|| surface_caps.formats.first().copied())
      .ok_or(Error::NoSurfaceFormat)?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT
        | wgpu::TextureUsages::COPY_DST,
      format:                        surface_format,
      width:                         size.width.max(1),
      height:                        size.height.max(1),
      present_mode:                  wgpu::PresentMode::AutoNoVsync,
      alpha_mode:                    surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto),
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };

    let handle =
      GpuHandle::new(&RenderConfig { width: config.width, height: config.height }, Some(adapter))?;
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;
    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);

    Ok(Init { surface, config, handle, window, blit, vello })
  }

  fn present(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
        self.surface.configure(&self.handle.device, &self.config);
        self.window.request_redraw();
        return;
      }
      Err(e) => {
        warn!("dropped frame: {e}");
        return;
      }
    };

    let surface_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, &surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    self.window.pre_present_notify();
    frame.present();
  }
}
