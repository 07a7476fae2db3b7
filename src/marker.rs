use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape};

/// Marker shapes for scatter layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Marker {
  #[default]
  Circle,
  Square,
  Diamond,
  Triangle,
}

impl Marker {
  /// The marker outline with a diameter of one, centered on the origin.
  fn unit_path(&self) -> BezPath {
    match self {
      Marker::Circle => Circle::new(Point::ZERO, 0.5).to_path(1e-3),
      Marker::Square => Rect::new(-0.5, -0.5, 0.5, 0.5).to_path(1e-3),
      Marker::Diamond => {
        let mut path = BezPath::new();
        path.move_to((0.0, -0.5));
        path.line_to((0.5, 0.0));
        path.line_to((0.0, 0.5));
        path.line_to((-0.5, 0.0));
        path.close_path();
        path
      }
      Marker::Triangle => {
        // sqrt(3) / 4, half the height of a unit equilateral triangle.
        const Y: f64 = 0.433_012_701_892_219_3;

        let mut path = BezPath::new();
        path.move_to((0.0, -Y));
        path.line_to((0.5, Y));
        path.line_to((-0.5, Y));
        path.close_path();
        path
      }
    }
  }

  /// The marker scaled to `size` pixels across and centered on `center`.
  pub(crate) fn path_at(&self, center: Point, size: f64) -> BezPath {
    Affine::translate(center.to_vec2()) * Affine::scale(size) * self.unit_path()
  }
}
