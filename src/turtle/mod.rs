use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A single quarter turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Left becomes right and vice versa.
    pub fn complement(self) -> Turn {
        match self {
            Turn::Left => Turn::Right,
            Turn::Right => Turn::Left,
        }
    }
}

/// Compass heading on the integer lattice. North is +y, East is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heading {
    #[default]
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Unit step along this heading.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }
}

/// # GridTurtle
///
/// A logo-style turtle locked to the integer lattice: it only ever turns by
/// quarter turns and only ever steps one cell. Working in integers keeps long
/// walks (dragon curves, L-system paths) exact, with no drift from repeated
/// `sin`/`cos`. Every visited cell, including the start, lands in the trail.
///
/// # Example
///
/// ```
/// use aoer_fractals::turtle::{GridTurtle, Heading};
/// let trail = GridTurtle::new()
///     .heading(Heading::East)
///     .fwd()
///     .left()
///     .fwd()
///     .into_trail();
/// assert_eq!(trail, vec![(0, 0), (1, 0), (1, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct GridTurtle {
    position: (i64, i64),
    heading: Heading,
    trail: Vec<(i64, i64)>,
}

impl Default for GridTurtle {
    fn default() -> Self {
        GridTurtle::new()
    }
}

impl GridTurtle {
    pub fn new() -> GridTurtle {
        GridTurtle {
            position: (0, 0),
            heading: Heading::default(),
            trail: vec![(0, 0)],
        }
    }

    /// Pre-size the trail when the walk length is known up front.
    pub fn with_capacity(capacity: usize) -> GridTurtle {
        let mut trail = Vec::with_capacity(capacity.max(1));
        trail.push((0, 0));
        GridTurtle {
            trail,
            ..GridTurtle::new()
        }
    }

    pub fn heading(mut self, heading: Heading) -> Self {
        self.heading = heading;
        self
    }

    pub fn fwd(mut self) -> Self {
        let (dx, dy) = self.heading.delta();
        self.position = (self.position.0 + dx, self.position.1 + dy);
        self.trail.push(self.position);
        self
    }

    pub fn left(mut self) -> Self {
        self.heading = self.heading.left();
        self
    }

    pub fn right(mut self) -> Self {
        self.heading = self.heading.right();
        self
    }

    pub fn turn(self, turn: Turn) -> Self {
        match turn {
            Turn::Left => self.left(),
            Turn::Right => self.right(),
        }
    }

    /// For every entry: turn, then take one step.
    pub fn walk_turns<'a, I>(mut self, turns: I) -> Self
    where
        I: IntoIterator<Item = &'a Turn>,
    {
        for turn in turns {
            self = self.turn(*turn).fwd();
        }
        self
    }

    /// Walk an L-system string. `F` steps, `-` turns left, `+` turns right,
    /// every other symbol is a no-op placeholder.
    pub fn walk_lpath(mut self, lpath: &str) -> Self {
        for c in lpath.chars() {
            self = match c {
                'F' => self.fwd(),
                '-' => self.left(),
                '+' => self.right(),
                _ => self,
            }
        }
        self
    }

    pub fn position(&self) -> (i64, i64) {
        self.position
    }

    pub fn trail(&self) -> &[(i64, i64)] {
        &self.trail
    }

    pub fn into_trail(self) -> Vec<(i64, i64)> {
        self.trail
    }

    /// The trail as floating point coordinates, `step` units per cell.
    pub fn to_points(&self, step: f64) -> Vec<Point<f64>> {
        self.trail
            .iter()
            .map(|(x, y)| Point::new(*x as f64 * step, *y as f64 * step))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{GridTurtle, Heading, Turn};
    use crate::l_system::LSystem;
    use std::collections::HashMap;

    #[test]
    fn test_walk_lsystem() {
        let system = LSystem {
            axiom: "A".to_string(),
            rules: HashMap::from([('A', "AF-B".to_string()), ('B', "FA".to_string())]),
        };
        // "AF-BF-FA"
        let t = GridTurtle::new().walk_lpath(&system.expand(2));
        assert_eq!(t.position(), (-1, 0));
        assert_eq!(t.trail().len(), 4);
    }

    #[test]
    fn test_simple_box() {
        let t = GridTurtle::new()
            .fwd()
            .right()
            .fwd()
            .right()
            .fwd()
            .right()
            .fwd();
        assert_eq!(t.trail(), &[(0, 0), (0, 1), (1, 1), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_walk_turns() {
        let t = GridTurtle::new().walk_turns(&[Turn::Right, Turn::Left, Turn::Left]);
        assert_eq!(t.into_trail(), vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_heading_cycle() {
        let h = Heading::East;
        assert_eq!(h.left().left().left().left(), h);
        assert_eq!(h.left().right(), h);
        assert_eq!(Turn::Left.complement(), Turn::Right);
    }

    #[test]
    fn test_to_points() {
        let pts = GridTurtle::new().heading(Heading::West).fwd().to_points(0.5);
        assert_eq!(pts[1].x(), -0.5);
        assert_eq!(pts[1].y(), 0.0);
    }
}
