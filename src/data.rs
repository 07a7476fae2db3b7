use kurbo::Point;
use polars::prelude::*;

use crate::{Error, Result};

/// Values of a numeric column as `f64`, with nulls kept as `None`.
pub fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
  let series = column.as_materialized_series().cast(&DataType::Float64)?;
  Ok(series.f64()?.into_iter().collect())
}

/// Pairs up two columns, dropping rows where either side is null or not finite.
pub fn paired_values(x: &Column, y: &Column) -> Result<Vec<(f64, f64)>> {
  if x.len() != y.len() {
    return Err(Error::LengthMismatch { x: x.len(), y: y.len() });
  }

  Ok(
    float_values(x)?
      .into_iter()
      .zip(float_values(y)?)
      .filter_map(|(x, y)| Some((x?, y?)))
      .filter(|(x, y)| x.is_finite() && y.is_finite())
      .collect(),
  )
}

pub(crate) fn points(x: &Column, y: &Column) -> Result<Vec<Point>> {
  Ok(paired_values(x, y)?.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn integers_become_floats() {
    let df = df! { "a" => &[8i64, 16, 32] }.unwrap();
    let values = float_values(df.column("a").unwrap()).unwrap();
    assert_eq!(values, vec![Some(8.0), Some(16.0), Some(32.0)]);
  }

  #[test]
  fn rows_with_nulls_are_dropped() {
    let df = df! {
      "x" => &[Some(1.0), None, Some(3.0), Some(4.0)],
      "y" => &[Some(2.0), Some(5.0), None, Some(f64::NAN)],
    }
    .unwrap();

    let pairs = paired_values(df.column("x").unwrap(), df.column("y").unwrap()).unwrap();
    assert_eq!(pairs, vec![(1.0, 2.0)]);
  }

  #[test]
  fn mismatched_lengths() {
    let x = Column::new("x".into(), &[1.0, 2.0, 3.0]);
    let y = Column::new("y".into(), &[1.0, 2.0]);

    let err = paired_values(&x, &y).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { x: 3, y: 2 }));
  }
}
