use std::path::Path;

use kurbo::{Affine, Point, Rect, Shape, Stroke};
use parley::{Alignment, FontWeight, Layout, PositionedLayoutItem, StyleProperty};
use peniko::{BlendMode, Brush, BrushRef, Color, Fill};
use tracing::debug;
use vello::wgpu;

use crate::{Plot, Result};

mod texture;
mod window;

/// Scene under construction, plus the font state needed to lay out text.
pub(crate) struct Render {
  pub scene:      vello::Scene,
  pub background: Color,
  font:           parley::FontContext,
  layout:         parley::LayoutContext<Brush>,
}

pub(crate) struct GpuHandle {
  pub device:  wgpu::Device,
  pub queue:   wgpu::Queue,
  pub texture: wgpu::Texture,
  pub view:    wgpu::TextureView,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct RenderConfig {
  pub width:  u32,
  pub height: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  /// Anchor point, in scene coordinates.
  pub position:         Point,
  /// Applied around the anchor point, after alignment.
  pub transform:        Affine,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             16.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(Color::BLACK),
      position:         Point::ZERO,
      transform:        Affine::IDENTITY,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Plot {
  /// Opens a window showing the plot, and blocks until it is closed.
  pub fn show(&self) -> Result<()> { window::show(self) }

  /// Renders the plot offscreen and writes it to `path` as a PNG.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let config = RenderConfig { width: 1280, height: 960 };
    let handle = GpuHandle::new(&config, None)?;

    let mut render = Render::new(self.theme.background);
    self.draw(&mut render, config.size());

    let mut renderer = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;
    render.render_to(&mut renderer, &handle, &config)?;

    texture::save(&handle, &config, path.as_ref())
  }
}

impl Render {
  pub fn new(background: Color) -> Self {
    Render {
      scene: vello::Scene::new(),
      background,
      font: parley::FontContext::new(),
      layout: parley::LayoutContext::new(),
    }
  }

  pub fn fill<'b>(&mut self, shape: &impl Shape, transform: Affine, brush: impl Into<BrushRef<'b>>) {
    self.scene.fill(Fill::NonZero, transform, brush, None, shape);
  }

  pub fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, transform, brush, None, shape);
  }

  /// Everything drawn until the matching `pop_clip` is clipped to `rect`.
  pub fn push_clip(&mut self, rect: &Rect) {
    self.scene.push_layer(BlendMode::default(), 1.0, Affine::IDENTITY, rect);
  }

  pub fn pop_clip(&mut self) { self.scene.pop_layer(); }

  pub fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let width = f64::from(layout.width());
    let height = f64::from(layout.height());

    let dx = match text.horizontal_align {
      Align::Start => 0.0,
      Align::Center => -width / 2.0,
      Align::End => -width,
    };
    let dy = match text.vertical_align {
      Align::Start => 0.0,
      Align::Center => -height / 2.0,
      Align::End => -height,
    };

    let transform =
      Affine::translate(text.position.to_vec2()) * text.transform * Affine::translate((dx, dy));

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = glyph_run.offset();
        let baseline = glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(true)
          .transform(transform)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }

  /// Rasterizes the scene into the handle's texture.
  pub fn render_to(
    &self,
    renderer: &mut vello::Renderer,
    handle: &GpuHandle,
    config: &RenderConfig,
  ) -> Result<()> {
    debug!(width = config.width, height = config.height, "rendering scene");
    renderer.render_to_texture(
      &handle.device,
      &handle.queue,
      &self.scene,
      &handle.view,
      &vello::RenderParams {
        base_color:          self.background,
        width:               config.width,
        height:              config.height,
        antialiasing_method: vello::AaConfig::Msaa16,
      },
    )?;
    Ok(())
  }
}

impl GpuHandle {
  /// Creates a device and a render target texture. Without an `adapter`, the
  /// default adapter of a fresh instance is used.
  pub fn new(config: &RenderConfig, adapter: Option<wgpu::Adapter>) -> Result<Self> {
    let adapter = match adapter {
      Some(adapter) => adapter,
      None => {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))?
      }
    };
    debug!(adapter = ?adapter.get_info().name, "using GPU adapter");

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label: Some("fitplot"),
      required_features: wgpu::Features::empty(),
      required_limits: wgpu::Limits::defaults(),
      memory_hints: wgpu::MemoryHints::MemoryUsage,
      ..Default::default()
    }))?;

    let (texture, view) = create_target(&device, config);
    Ok(GpuHandle { device, queue, texture, view })
  }

  pub fn resize(&mut self, config: &RenderConfig) {
    let (texture, view) = create_target(&self.device, config);
    self.texture = texture;
    self.view = view;
  }
}

fn create_target(device: &wgpu::Device, config: &RenderConfig) -> (wgpu::Texture, wgpu::TextureView) {
  let texture = device.create_texture(&wgpu::TextureDescriptor {
    label:           Some("Render Texture"),
    size:            config.extent_3d(),
    mip_level_count: 1,
    sample_count:    1,
    dimension:       wgpu::TextureDimension::D2,
    format:          wgpu::TextureFormat::Rgba8Unorm,
    usage:           wgpu::TextureUsages::STORAGE_BINDING
      | wgpu::TextureUsages::TEXTURE_BINDING
      | wgpu::TextureUsages::COPY_SRC,
    view_formats:    &[],
  });
  let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
  (texture, view)
}

impl RenderConfig {
  pub fn size(&self) -> kurbo::Size { kurbo::Size::new(f64::from(self.width), f64::from(self.height)) }

  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d {
      width:                 self.width,
      height:                self.height,
      depth_or_array_layers: 1,
    }
  }
}
