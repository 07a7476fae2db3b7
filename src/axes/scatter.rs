use kurbo::{Affine, Point};
use peniko::Brush;
use polars::prelude::*;

use crate::{Bounds, Marker, Result, data, render::Render};

pub struct ScatterAxes {
  points:  Vec<Point>,
  options: ScatterOptions,
}

pub struct ScatterOptions {
  /// Marker diameter in pixels.
  pub size:   f64,
  pub color:  Brush,
  pub marker: Marker,
}

impl ScatterAxes {
  pub(crate) fn new(x: &Column, y: &Column, color: Brush) -> Result<Self> {
    Ok(ScatterAxes {
      points:  data::points(x, y)?,
      options: ScatterOptions { size: 12.0, color, marker: Marker::Circle },
    })
  }

  pub fn size(&mut self, size: f64) -> &mut Self {
    self.options.size = size;
    self
  }

  pub fn color(&mut self, color: impl Into<Brush>) -> &mut Self {
    self.options.color = color.into();
    self
  }

  pub fn marker(&mut self, marker: Marker) -> &mut Self {
    self.options.marker = marker;
    self
  }

  pub fn options(&self) -> &ScatterOptions { &self.options }

  pub(crate) fn data_bounds(&self) -> Option<Bounds> { Bounds::enclosing(&self.points) }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    for point in self.points.iter().map(|p| transform * *p) {
      let marker = self.options.marker.path_at(point, self.options.size);
      render.fill(&marker, Affine::IDENTITY, &self.options.color);
    }
  }
}
