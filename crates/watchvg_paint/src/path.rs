//! Path construction
//!
//! [`PathBuilder`] wraps the chainable [`Path`] API from watchvg_core and keeps
//! track of the pen position so that relative commands can be expressed the
//! way the chart and circle primitives are written.

pub use watchvg_core::{Path, PathCommand, Point};

/// Builder for constructing paths with fluent API
///
/// Maintains cursor state for relative operations. The cursor returns to the
/// start of the current subpath on `close`.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    path: Path,
    current: Point,
    subpath_start: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Builder whose path has room for `capacity` commands
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            path: Path::with_capacity(capacity),
            current: Point::ZERO,
            subpath_start: Point::ZERO,
        }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.path = self.path.move_to(x, y);
        self.current = Point::new(x, y);
        self.subpath_start = self.current;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.path = self.path.line_to(x, y);
        self.current = Point::new(x, y);
        self
    }

    /// Line by (dx, dy) from the current position
    pub fn line_to_relative(self, dx: f32, dy: f32) -> Self {
        let to = self.current.offset(dx, dy);
        self.line_to(to.x, to.y)
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.path = self.path.cubic_to(c1x, c1y, c2x, c2y, x, y);
        self.current = Point::new(x, y);
        self
    }

    /// Cubic curve with every point expressed relative to the current position
    pub fn cubic_to_relative(
        self,
        c1dx: f32,
        c1dy: f32,
        c2dx: f32,
        c2dy: f32,
        dx: f32,
        dy: f32,
    ) -> Self {
        let Point { x, y } = self.current;
        self.cubic_to(x + c1dx, y + c1dy, x + c2dx, y + c2dy, x + dx, y + dy)
    }

    pub fn close(mut self) -> Self {
        self.path = self.path.close();
        self.current = self.subpath_start;
        self
    }

    pub fn build(self) -> Path {
        self.path
    }

    /// Get the current cursor position
    pub fn current_position(&self) -> Point {
        self.current
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_commands_follow_cursor() {
        let builder = PathBuilder::new()
            .move_to(1.0, 1.0)
            .line_to_relative(2.0, 0.0)
            .cubic_to_relative(0.0, 1.0, 1.0, 2.0, 1.0, 3.0);
        assert_eq!(builder.current_position(), Point::new(4.0, 4.0));

        let path = builder.build();
        assert_eq!(
            path.commands()[2],
            PathCommand::CubicTo {
                control1: Point::new(3.0, 2.0),
                control2: Point::new(4.0, 3.0),
                end: Point::new(4.0, 4.0),
            }
        );
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let builder = PathBuilder::new()
            .move_to(5.0, 5.0)
            .line_to(10.0, 5.0)
            .close();
        assert_eq!(builder.current_position(), Point::new(5.0, 5.0));
        assert!(builder.build().is_closed());
    }
}
