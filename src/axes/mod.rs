mod line;
mod scatter;

pub use line::{LineAxes, LineOptions};
pub use scatter::{ScatterAxes, ScatterOptions};

use kurbo::Affine;
use polars::prelude::Column;

use crate::{Bounds, Plot, Result, render::Render};

/// A layer drawn inside the plotting area.
pub enum Axes {
  Scatter(ScatterAxes),
  Line(LineAxes),
}

impl Axes {
  pub(crate) fn data_bounds(&self) -> Option<Bounds> {
    match self {
      Axes::Scatter(sa) => sa.data_bounds(),
      Axes::Line(la) => la.data_bounds(),
    }
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) {
    match self {
      Axes::Scatter(sa) => sa.draw(render, transform),
      Axes::Line(la) => la.draw(render, transform),
    }
  }
}

impl Plot {
  /// Adds the points of `x` and `y` as unconnected markers.
  pub fn scatter(&mut self, x: &Column, y: &Column) -> Result<&mut ScatterAxes> {
    let color = self.theme.series_color(self.axes.len());
    self.axes.push(Axes::Scatter(ScatterAxes::new(x, y, color.into())?));
    match self.axes.last_mut() {
      Some(Axes::Scatter(sa)) => Ok(sa),
      _ => unreachable!(),
    }
  }

  /// Adds the points of `x` and `y` connected in order by a solid line.
  pub fn line(&mut self, x: &Column, y: &Column) -> Result<&mut LineAxes> {
    let color = self.theme.series_color(self.axes.len());
    self.axes.push(Axes::Line(LineAxes::new(x, y, color.into())?));
    match self.axes.last_mut() {
      Some(Axes::Line(la)) => Ok(la),
      _ => unreachable!(),
    }
  }
}
