use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Brush;
use polars::prelude::*;

use crate::{Bounds, Result, data, render::Render};

pub struct LineAxes {
  points:  Vec<Point>,
  options: LineOptions,
}

pub struct LineOptions {
  pub width: f64,
  pub color: Brush,
  pub dash:  Option<Vec<f64>>,
}

impl LineAxes {
  pub(crate) fn new(x: &Column, y: &Column, color: Brush) -> Result<Self> {
    Ok(LineAxes {
      points:  data::points(x, y)?,
      options: LineOptions { width: 3.0, color, dash: None },
    })
  }

  pub fn width(&mut self, width: f64) -> &mut Self {
    self.options.width = width;
    self
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.color = color.into();
    self
  }

  pub fn dashed(&mut self, pattern: impl Into<Vec<f64>>) -> &mut Self {
    self.options.dash = Some(pattern.into());
    self
  }

  pub fn options(&self) -> &LineOptions { &self.options }

  pub(crate) fn data_bounds(&self) -> Option<Bounds> { Bounds::enclosing(&self.points) }

  /// The polyline through every point, in screen space.
  fn path(&self, transform: Affine) -> BezPath {
    let mut shape = BezPath::new();

    for (i, point) in self.points.iter().map(|p| transform * *p).enumerate() {
      if i == 0 {
        shape.move_to(point);
      } else {
        shape.line_to(point);
      }
    }

    shape
  }

  fn stroke(&self) -> Stroke {
    let stroke = Stroke::new(self.options.width);
    match &self.options.dash {
      Some(dash) => stroke.with_dashes(0.0, dash.iter().copied()),
      None => stroke,
    }
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    if self.points.len() < 2 {
      return;
    }

    render.stroke(&self.path(transform), Affine::IDENTITY, &self.options.color, &self.stroke());
  }
}

#[cfg(test)]
mod tests {
  use kurbo::PathEl;
  use peniko::Color;

  use super::*;

  #[test]
  fn path_follows_data_order() {
    let x = Column::new("x".into(), &[8.0, 32.0, 16.0]);
    let y = Column::new("y".into(), &[1.0, 2.0, 3.0]);
    let line = LineAxes::new(&x, &y, Color::BLACK.into()).unwrap();

    let elements = line.path(Affine::IDENTITY).elements().to_vec();
    assert_eq!(
      elements,
      vec![
        PathEl::MoveTo(Point::new(8.0, 1.0)),
        PathEl::LineTo(Point::new(32.0, 2.0)),
        PathEl::LineTo(Point::new(16.0, 3.0)),
      ]
    );
  }

  #[test]
  fn solid_by_default() {
    let x = Column::new("x".into(), &[1.0, 2.0]);
    let line = LineAxes::new(&x, &x, Color::BLACK.into()).unwrap();

    let stroke = line.stroke();
    assert_eq!(stroke.width, 3.0);
    assert!(stroke.dash_pattern.is_empty());
  }

  #[test]
  fn dashed_and_styled() {
    let x = Column::new("x".into(), &[1.0, 2.0]);
    let mut line = LineAxes::new(&x, &x, Color::BLACK.into()).unwrap();
    line.width(1.5).color(Color::WHITE).dashed([6.0, 3.0]);

    let stroke = line.stroke();
    assert_eq!(stroke.width, 1.5);
    assert_eq!(stroke.dash_offset, 0.0);
    assert_eq!(stroke.dash_pattern.as_slice(), &[6.0, 3.0]);
    assert_eq!(line.options().color, Brush::Solid(Color::WHITE));
  }
}
