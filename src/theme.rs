use color::{AlphaColor, Srgb};

/// Colors used when drawing a figure.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
  pub background: AlphaColor<Srgb>,
  pub text:       AlphaColor<Srgb>,
  pub frame:      AlphaColor<Srgb>,
  cycle:          &'static [AlphaColor<Srgb>],
}

/// Blue, orange, green, red, purple: each new layer takes the next one.
const CYCLE: [AlphaColor<Srgb>; 5] = [
  AlphaColor::from_rgb8(31, 119, 180),
  AlphaColor::from_rgb8(255, 127, 14),
  AlphaColor::from_rgb8(44, 160, 44),
  AlphaColor::from_rgb8(214, 39, 40),
  AlphaColor::from_rgb8(148, 103, 189),
];

pub const LIGHT: Theme = Theme {
  background: AlphaColor::from_rgb8(255, 255, 255),
  text:       AlphaColor::from_rgb8(32, 32, 32),
  frame:      AlphaColor::from_rgb8(128, 128, 128),
  cycle:      &CYCLE,
};

impl Default for Theme {
  fn default() -> Self { LIGHT }
}

impl Theme {
  /// Replaces the series color cycle. An empty cycle is ignored.
  pub const fn with_cycle(mut self, cycle: &'static [AlphaColor<Srgb>]) -> Self {
    if !cycle.is_empty() {
      self.cycle = cycle;
    }
    self
  }

  pub fn series_color(&self, index: usize) -> AlphaColor<Srgb> {
    self.cycle[index % self.cycle.len()]
  }
}
