use kurbo::{Affine, Point, Rect};

/// A rectangle in either data space or screen space.
///
/// Screen-space bounds have an inverted y range (`min` is the bottom edge,
/// which has the larger pixel coordinate).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  /// The smallest bounds containing every point, or `None` for no points.
  pub fn enclosing(points: &[Point]) -> Option<Bounds> {
    Some(Bounds::new(
      Range::enclosing(points.iter().map(|p| p.x))?,
      Range::enclosing(points.iter().map(|p| p.y))?,
    ))
  }

  pub fn width(&self) -> f64 { self.x.size().abs() }
  pub fn height(&self) -> f64 { self.y.size().abs() }

  pub const fn shrink(self, amount: f64) -> Self {
    Bounds { x: self.x.shrink(amount), y: self.y.shrink(amount) }
  }

  pub const fn expand_by(self, fract: f64) -> Self {
    Bounds { x: self.x.expand_by(fract), y: self.y.expand_by(fract) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  pub fn to_rect(&self) -> Rect { Rect::new(self.x.min, self.y.min, self.x.max, self.y.max).abs() }

  /// Maps `self` onto `viewport`, so that `min` lands on `min` and `max` on `max`.
  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Default for Range {
  fn default() -> Self { Range::new(0.0, 1.0) }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub fn enclosing(values: impl IntoIterator<Item = f64>) -> Option<Range> {
    values.into_iter().fold(None, |range, v| match range {
      None => Some(Range::new(v, v)),
      Some(r) => Some(Range::new(r.min.min(v), r.max.max(v))),
    })
  }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size().abs() * fract) }

  /// Gives a zero-sized range some room around its single value.
  pub fn widen_if_empty(self) -> Self {
    if self.size() == 0.0 {
      let pad = if self.min == 0.0 { 1.0 } else { self.min.abs() * 0.05 };
      Range::new(self.min - pad, self.max + pad)
    } else {
      self
    }
  }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// Round tick values covering the range, about `count` of them.
  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = self.size().abs() / f64::from(count);
    if !step.is_finite() || step <= 0.0 {
      return NiceTicksIter::new(self.min, self.min, 1.0, 0);
    }

    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b <= 1.0 => 1.0,
      b if b <= 2.0 => 2.0,
      b if b <= 2.5 => 2.5,
      b if b <= 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
    let lo = (lo / step).floor() * step;
    let hi = (hi / step).ceil() * step;

    // 2.5 steps need one more digit than the exponent suggests.
    let extra = if nice_base == 2.5 { 1 } else { 0 };
    let decimals = (-k as i32 + extra).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, decimals)
  }
}

pub struct NiceTicksIter {
  current:  f64,
  step:     f64,
  hi:       f64,
  decimals: usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, decimals: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, decimals }
  }

  /// Digits after the decimal point needed to label every tick.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.decimals as i32 + 2);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}
