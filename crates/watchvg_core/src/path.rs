//! Vector paths
//!
//! A [`Path`] is the only geometric output of the engine: the arc builder and
//! the curve fitter both produce one, and the renderer fills it. Paths are
//! rebuilt wholesale whenever their parameters change, never edited in place.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Path command for building vector paths
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    /// Move to a point
    MoveTo { to: Point },
    /// Line to a point
    LineTo { to: Point },
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

impl PathCommand {
    /// The point the pen rests on after this command, if it moves the pen
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathCommand::MoveTo { to } | PathCommand::LineTo { to } => Some(*to),
            PathCommand::CubicTo { end, .. } => Some(*end),
            PathCommand::Close => None,
        }
    }
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create an empty path with room for `capacity` commands
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Create a path from a vector of commands
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.push(PathCommand::MoveTo {
            to: Point::new(x, y),
        });
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.push(PathCommand::LineTo {
            to: Point::new(x, y),
        });
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.push(PathCommand::Close);
        self
    }

    /// Append a raw command
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the last command closes the path
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// First point of the path (its initial move-to)
    pub fn first_point(&self) -> Option<Point> {
        self.commands.iter().find_map(PathCommand::end_point)
    }

    /// Last point the pen reaches before closing
    pub fn end_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }

    /// On-curve vertices in drawing order (control points excluded)
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(PathCommand::end_point)
    }

    /// Every point stored in the path, control points included
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|cmd| {
            let points: [Option<Point>; 3] = match *cmd {
                PathCommand::MoveTo { to } | PathCommand::LineTo { to } => [Some(to), None, None],
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => [Some(control1), Some(control2), Some(end)],
                PathCommand::Close => [None, None, None],
            };
            points.into_iter().flatten()
        })
    }

    /// Copy of this path moved by (dx, dy)
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo { to } => PathCommand::MoveTo {
                    to: to.offset(dx, dy),
                },
                PathCommand::LineTo { to } => PathCommand::LineTo {
                    to: to.offset(dx, dy),
                },
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => PathCommand::CubicTo {
                    control1: control1.offset(dx, dy),
                    control2: control2.offset(dx, dy),
                    end: end.offset(dx, dy),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }

    /// Calculate the bounding rectangle of this path
    ///
    /// Control points are included, so the result may be slightly larger than
    /// the rendered shape.
    pub fn bounds(&self) -> Rect {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for p in self.points() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        } else {
            Rect::ZERO
        }
    }
}
