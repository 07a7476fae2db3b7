//! DRV count against the iteration at which maze routing stopped.
//!
//! A fixed set of router runs, plotted as points with a least-squares line
//! through them.

use polars::prelude::*;
use tracing::info;

use crate::{Bounds, LinearFit, Marker, Plot, Range, Result};

pub const X_LABEL: &str = "mazeEndIter";
pub const Y_LABEL: &str = "drvs";

/// Visible area of the figure, independent of the data.
pub const VIEW: Bounds = Bounds::new(Range::new(7.0, 40.0), Range::new(0.0, 44.0));

pub fn sample_set() -> PolarsResult<DataFrame> {
  df! {
    X_LABEL => &[8i64, 16, 32],
    Y_LABEL => &[14i64, 42, 34],
  }
}

/// Builds the figure for `samples`: markers for the runs, then the fitted line
/// evaluated at the same x values.
pub fn figure(samples: &DataFrame) -> Result<(Plot, LinearFit)> {
  let x = samples.column(X_LABEL)?;
  let y = samples.column(Y_LABEL)?;

  let mut plot = Plot::new();
  plot.scatter(x, y)?.marker(Marker::Circle);
  plot.x.title(X_LABEL).limits(VIEW.x.min, VIEW.x.max);
  plot.y.title(Y_LABEL).limits(VIEW.y.min, VIEW.y.max);

  let fit = LinearFit::from_columns(x, y)?;
  info!(slope = fit.slope, intercept = fit.intercept, r_squared = fit.r_squared, "fitted DRV trend");

  let fitted = fit.predict(x)?;
  plot.line(x, &fitted)?;

  Ok((plot, fit))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Axes;

  #[test]
  fn sample_set_columns() {
    let samples = sample_set().unwrap();
    assert_eq!(samples.shape(), (3, 2));
    assert_eq!(samples.get_column_names_str(), vec![X_LABEL, Y_LABEL]);
  }

  #[test]
  fn figure_has_fixed_view() {
    let (plot, _) = figure(&sample_set().unwrap()).unwrap();
    assert_eq!(plot.view_bounds(), VIEW);
    assert_eq!(plot.x.get_title(), Some("mazeEndIter"));
    assert_eq!(plot.y.get_title(), Some("drvs"));
  }

  #[test]
  fn view_ignores_data_extent() {
    let samples = df! {
      X_LABEL => &[1.0, 100.0, 250.0],
      Y_LABEL => &[-30.0, 500.0, 90.0],
    }
    .unwrap();

    let (plot, _) = figure(&samples).unwrap();
    assert_eq!(plot.view_bounds(), VIEW);
  }

  #[test]
  fn figure_layers() {
    let (plot, fit) = figure(&sample_set().unwrap()).unwrap();

    let layers = plot.layers();
    assert_eq!(layers.len(), 2);
    assert!(matches!(&layers[0], Axes::Scatter(sa) if sa.options().marker == Marker::Circle));
    assert!(matches!(&layers[1], Axes::Line(la) if la.options().dash.is_none()));

    assert!((fit.slope - 9.0 / 14.0).abs() < 1e-9);
    assert!((fit.intercept - 18.0).abs() < 1e-9);
  }

  #[test]
  fn missing_column() {
    let samples = df! { X_LABEL => &[1.0, 2.0] }.unwrap();
    assert!(matches!(figure(&samples), Err(crate::Error::Polars(_))));
  }
}
