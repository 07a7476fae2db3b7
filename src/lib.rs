use kurbo::{Affine, Line, Point, Size, Stroke};
use parley::FontWeight;

pub use axes::{Axes, LineAxes, LineOptions, ScatterAxes, ScatterOptions};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use error::{Error, Result};
pub use fit::LinearFit;
pub use marker::Marker;
pub use theme::Theme;

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
pub mod convergence;
pub mod data;
mod error;
pub mod fit;
mod marker;
mod render;
pub mod theme;

/// A figure: a set of layers sharing one pair of axes.
#[derive(Default)]
pub struct Plot {
  title:    Option<String>,
  pub x:    Axis,
  pub y:    Axis,
  pub(crate) theme: Theme,

  axes: Vec<Axes>,
}

/// Title and limits of one axis.
#[derive(Clone, Debug, Default)]
pub struct Axis {
  title: Option<String>,
  min:   Option<f64>,
  max:   Option<f64>,
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }

  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  /// Fixes the visible range, regardless of the data.
  pub fn limits(&mut self, min: f64, max: f64) -> &mut Self { self.min(min).max(max) }

  pub fn get_title(&self) -> Option<&str> { self.title.as_deref() }

  /// Applies explicit limits on top of a range derived from the data.
  fn resolve(&self, data: Range) -> Range {
    Range::new(self.min.unwrap_or(data.min), self.max.unwrap_or(data.max))
  }
}

impl Plot {
  pub fn new() -> Plot { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn get_title(&self) -> Option<&str> { self.title.as_deref() }

  pub fn theme(&mut self, theme: Theme) -> &mut Self {
    self.theme = theme;
    self
  }

  pub fn layers(&self) -> &[Axes] { &self.axes }

  /// The data-space rectangle shown in the plotting area.
  ///
  /// Each side comes from the axis limits when set, otherwise from the extent
  /// of every layer plus a 5% margin.
  pub fn view_bounds(&self) -> Bounds {
    let data = self
      .axes
      .iter()
      .filter_map(Axes::data_bounds)
      .reduce(|a, b| a.union(b))
      .map(|b| Bounds::new(b.x.widen_if_empty(), b.y.widen_if_empty()).expand_by(0.05))
      .unwrap_or(Bounds::new(Range::default(), Range::default()));

    Bounds::new(self.x.resolve(data.x), self.y.resolve(data.y))
  }
}

impl Plot {
  pub(crate) fn draw(&self, render: &mut Render, size: Size) {
    const MARGIN: f64 = 80.0;

    let text_color = self.theme.text;
    let frame_color = self.theme.frame;

    let viewport =
      Bounds::new(Range::new(0.0, size.width), Range::new(size.height, 0.0)).shrink(MARGIN);
    let center = Point::new(size.width / 2.0, size.height / 2.0);

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 32.0,
        weight: FontWeight::BOLD,
        brush: text_color.into(),
        position: Point { x: center.x, y: viewport.y.max - 30.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(x_label) = &self.x.title {
      render.draw_text(DrawText {
        text: x_label,
        size: 24.0,
        position: Point { x: center.x, y: viewport.y.min + 40.0 },
        brush: text_color.into(),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_label) = &self.y.title {
      render.draw_text(DrawText {
        text: y_label,
        size: 24.0,
        position: Point { x: viewport.x.min - 50.0, y: center.y },
        brush: text_color.into(),
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    let tick_stroke = Stroke::new(2.0).with_caps(kurbo::Cap::Butt);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      Affine::IDENTITY,
      frame_color,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      Affine::IDENTITY,
      frame_color,
      &border_stroke,
    );

    let data_bounds = self.view_bounds();
    let transform = data_bounds.transform_to(viewport);

    let ticks = 10;
    let iter = data_bounds.y.nice_ticks(ticks);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 10.0, vy)),
        Affine::IDENTITY,
        frame_color,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: 14.0,
        position: Point { x: viewport.x.min - 15.0, y: vy },
        brush: text_color.into(),
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = data_bounds.x.nice_ticks(ticks);
    let decimals = iter.decimals();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0)),
        Affine::IDENTITY,
        frame_color,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        size: 14.0,
        position: Point { x: vx, y: viewport.y.min + 15.0 },
        brush: text_color.into(),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    render.push_clip(&viewport.to_rect());
    for ax in &self.axes {
      ax.draw(render, transform);
    }
    render.pop_clip();
  }
}

#[cfg(test)]
mod tests {
  use polars::prelude::Column;

  use super::*;

  fn columns() -> (Column, Column) {
    (Column::new("x".into(), &[8.0, 16.0, 32.0]), Column::new("y".into(), &[14.0, 42.0, 34.0]))
  }

  #[test]
  fn view_bounds_follow_data() {
    let (x, y) = columns();
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();

    let bounds = plot.view_bounds();
    assert_eq!(bounds.x, Range::new(8.0, 32.0).expand_by(0.05));
    assert_eq!(bounds.y, Range::new(14.0, 42.0).expand_by(0.05));
  }

  #[test]
  fn limits_override_data() {
    let (x, y) = columns();
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();
    plot.x.limits(0.0, 100.0);
    plot.y.min(-5.0);

    let bounds = plot.view_bounds();
    assert_eq!(bounds.x, Range::new(0.0, 100.0));
    assert_eq!(bounds.y.min, -5.0);
    assert_eq!(bounds.y.max, Range::new(14.0, 42.0).expand_by(0.05).max);
  }

  #[test]
  fn empty_plot_has_unit_bounds() {
    let plot = Plot::new();
    assert_eq!(plot.view_bounds(), Bounds::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)));
  }

  #[test]
  fn layers_take_cycle_colors() {
    let (x, y) = columns();
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();
    plot.line(&x, &y).unwrap();

    let colors = plot
      .layers()
      .iter()
      .map(|ax| match ax {
        Axes::Scatter(sa) => sa.options().color.clone(),
        Axes::Line(la) => la.options().color.clone(),
      })
      .collect::<Vec<_>>();

    let theme = Theme::default();
    assert_eq!(colors, vec![theme.series_color(0).into(), theme.series_color(1).into()]);
  }

  #[test]
  fn theme_override_colors_layers() {
    const GRAYS: [color::AlphaColor<color::Srgb>; 2] =
      [color::AlphaColor::from_rgb8(40, 40, 40), color::AlphaColor::from_rgb8(160, 160, 160)];

    let (x, y) = columns();
    let mut plot = Plot::new();
    plot.theme(theme::LIGHT.with_cycle(&GRAYS));
    plot.scatter(&x, &y).unwrap();
    plot.line(&x, &y).unwrap();

    let Axes::Scatter(sa) = &plot.layers()[0] else { panic!("first layer is not a scatter") };
    let Axes::Line(la) = &plot.layers()[1] else { panic!("second layer is not a line") };
    assert_eq!(sa.options().color, peniko::Brush::from(GRAYS[0]));
    assert_eq!(la.options().color, peniko::Brush::from(GRAYS[1]));
  }

  #[test]
  fn titled_plot_draws_into_scene() {
    let (x, y) = columns();
    let mut plot = Plot::new();
    plot.title("DRV trend").scatter(&x, &y).unwrap();
    plot.line(&x, &y).unwrap().dashed([4.0, 2.0]);
    plot.x.title("mazeEndIter");
    assert_eq!(plot.get_title(), Some("DRV trend"));

    let mut render = Render::new(plot.theme.background);
    plot.draw(&mut render, Size::new(640.0, 480.0));
    assert!(!render.scene.encoding().is_empty());
  }

  #[test]
  fn mismatched_layer_is_rejected() {
    let x = Column::new("x".into(), &[1.0, 2.0]);
    let y = Column::new("y".into(), &[1.0]);
    let mut plot = Plot::new();

    assert!(matches!(plot.line(&x, &y), Err(Error::LengthMismatch { x: 2, y: 1 })));
    assert!(plot.layers().is_empty());
  }
}
