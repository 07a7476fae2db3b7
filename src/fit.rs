//! Ordinary least-squares fit of a straight line.

use polars::prelude::*;
use tracing::debug;

use crate::{Error, Result, data};

/// The line `y = slope * x + intercept` minimizing the sum of squared residuals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFit {
  pub slope:     f64,
  pub intercept: f64,
  /// Coefficient of determination. `1.0` when every y value is the same.
  pub r_squared: f64,
}

impl LinearFit {
  /// Fits a line through the pairs `(xs[i], ys[i])`.
  ///
  /// Works on deviations from the means rather than raw sums of squares, which
  /// keeps the result accurate when the x values sit far from zero.
  pub fn fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
    if xs.len() != ys.len() {
      return Err(Error::LengthMismatch { x: xs.len(), y: ys.len() });
    }
    if xs.len() < 2 {
      return Err(Error::TooFewPoints { count: xs.len() });
    }
    if xs.iter().all(|x| *x == xs[0]) {
      return Err(Error::Singular);
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
      let dx = x - mean_x;
      let dy = y - mean_y;
      sxx += dx * dx;
      sxy += dx * dy;
      syy += dy * dy;
    }

    // Distinct x values can still underflow to a zero spread.
    if sxx == 0.0 {
      return Err(Error::Singular);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

    debug!(slope, intercept, r_squared, points = xs.len(), "fitted line");
    Ok(LinearFit { slope, intercept, r_squared })
  }

  /// Fits a line through two columns, skipping rows with missing values.
  pub fn from_columns(x: &Column, y: &Column) -> Result<LinearFit> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = data::paired_values(x, y)?.into_iter().unzip();
    LinearFit::fit(&xs, &ys)
  }

  pub fn evaluate(&self, x: f64) -> f64 { self.slope * x + self.intercept }

  /// Evaluates the line at every value of `x`, keeping nulls in place.
  pub fn predict(&self, x: &Column) -> Result<Column> {
    let values = data::float_values(x)?
      .into_iter()
      .map(|v| v.map(|v| self.evaluate(v)))
      .collect::<Vec<Option<f64>>>();

    Ok(Column::new(PlSmallStr::from(format!("{}_fit", x.name())), values))
  }

  /// `y - (slope * x + intercept)` for each pair.
  pub fn residuals(&self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
    xs.iter().zip(ys).map(|(x, y)| y - self.evaluate(*x)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const XS: [f64; 3] = [8.0, 16.0, 32.0];
  const YS: [f64; 3] = [14.0, 42.0, 34.0];

  #[test]
  fn satisfies_normal_equations() {
    let fit = LinearFit::fit(&XS, &YS).unwrap();
    let residuals = fit.residuals(&XS, &YS);

    let sum: f64 = residuals.iter().sum();
    let weighted: f64 = residuals.iter().zip(XS).map(|(r, x)| r * x).sum();
    assert!(sum.abs() < 1e-9, "sum of residuals {sum}");
    assert!(weighted.abs() < 1e-9, "x-weighted sum of residuals {weighted}");
  }

  #[test]
  fn sample_set_solution() {
    let fit = LinearFit::fit(&XS, &YS).unwrap();
    assert!((fit.slope - 9.0 / 14.0).abs() < 1e-12, "slope {}", fit.slope);
    assert!((fit.intercept - 18.0).abs() < 1e-9, "intercept {}", fit.intercept);
    assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
  }

  #[test]
  fn deterministic() {
    let a = LinearFit::fit(&XS, &YS).unwrap();
    let b = LinearFit::fit(&XS, &YS).unwrap();
    assert_eq!(a.slope.to_bits(), b.slope.to_bits());
    assert_eq!(a.intercept.to_bits(), b.intercept.to_bits());
  }

  #[test]
  fn exact_line() {
    let xs = [1.0, 2.0, 3.0, 4.0];
    let ys = xs.map(|x| 3.0 * x - 2.0);
    let fit = LinearFit::fit(&xs, &ys).unwrap();
    assert!((fit.slope - 3.0).abs() < 1e-12);
    assert!((fit.intercept + 2.0).abs() < 1e-12);
    assert!((fit.r_squared - 1.0).abs() < 1e-12);
  }

  #[test]
  fn flat_line() {
    let fit = LinearFit::fit(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap();
    assert_eq!(fit.slope, 0.0);
    assert_eq!(fit.intercept, 5.0);
    assert_eq!(fit.r_squared, 1.0);
  }

  // The slope is undefined when every x is the same; this is reported rather
  // than producing infinities.
  #[test]
  fn identical_x_is_singular() {
    assert!(matches!(LinearFit::fit(&[4.0; 3], &YS), Err(Error::Singular)));
    assert!(matches!(LinearFit::fit(&[0.1; 3], &YS), Err(Error::Singular)));
    assert!(matches!(LinearFit::fit(&[0.0; 2], &[1.0, 2.0]), Err(Error::Singular)));
  }

  #[test]
  fn large_offset_x_values() {
    let fit = LinearFit::fit(&[1e8, 1e8 + 1.0, 1e8 + 2.0], &[1.0, 3.0, 5.0]).unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-12, "slope {}", fit.slope);
    assert!((fit.intercept + 199_999_999.0).abs() < 1e-6, "intercept {}", fit.intercept);
    assert!((fit.r_squared - 1.0).abs() < 1e-12);
  }

  #[test]
  fn nearly_equal_x_values() {
    let xs = [1.0, 1.0 + 1e-12, 1.0 + 2e-12];
    let fit = LinearFit::fit(&xs, &[0.0, 1.0, 2.0]).unwrap();
    assert!(fit.slope.is_finite());
    assert!((fit.slope / 1e12 - 1.0).abs() < 1e-2, "slope {}", fit.slope);
  }

  #[test]
  fn too_few_points() {
    assert!(matches!(LinearFit::fit(&[1.0], &[1.0]), Err(Error::TooFewPoints { count: 1 })));
    assert!(matches!(LinearFit::fit(&[], &[]), Err(Error::TooFewPoints { count: 0 })));
  }

  #[test]
  fn length_mismatch() {
    assert!(matches!(
      LinearFit::fit(&[1.0, 2.0], &[1.0]),
      Err(Error::LengthMismatch { x: 2, y: 1 })
    ));
  }

  #[test]
  fn fit_and_predict_columns() {
    let df = df! {
      "mazeEndIter" => &[8i64, 16, 32],
      "drvs" => &[14i64, 42, 34],
    }
    .unwrap();
    let x = df.column("mazeEndIter").unwrap();
    let y = df.column("drvs").unwrap();

    let fit = LinearFit::from_columns(x, y).unwrap();
    assert_eq!(fit, LinearFit::fit(&XS, &YS).unwrap());

    let predicted = fit.predict(x).unwrap();
    assert_eq!(predicted.name().as_str(), "mazeEndIter_fit");

    let values = crate::data::float_values(&predicted).unwrap();
    for (value, x) in values.into_iter().zip(XS) {
      assert!((value.unwrap() - (9.0 / 14.0 * x + 18.0)).abs() < 1e-9);
    }
  }
}
