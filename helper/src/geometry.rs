use glam::IVec2;
use itertools::Itertools;

/// A cell coordinate. `x` grows to the east, `y` grows to the south.
pub type Point = IVec2;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in the order every neighbor walk uses.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::NEG_Y,
            Direction::East => IVec2::X,
            Direction::South => IVec2::Y,
            Direction::West => IVec2::NEG_X,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub fn turn_right(self) -> Self {
        self.turn_left().reverse()
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Position in [`Direction::ALL`], handy for dense per-direction tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The point one step away from `from` in this direction.
    pub fn step(self, from: Point) -> Point {
        from + self.offset()
    }
}

/// Winding number of a closed polygon around `point`.
///
/// The polygon is given by its vertices in walking order, the last vertex
/// connects back to the first. The result is only meaningful for points that
/// are not on the polygon itself; any non-zero value means `point` is enclosed.
pub fn winding_number(point: Point, polygon: &[Point]) -> i32 {
    // Cross product sign: > 0 when `p` lies left of the edge a -> b.
    let side = |a: Point, b: Point, p: Point| -> i64 {
        (b.x - a.x) as i64 * (p.y - a.y) as i64 - (p.x - a.x) as i64 * (b.y - a.y) as i64
    };

    polygon
        .iter()
        .circular_tuple_windows()
        .map(|(&a, &b)| {
            if a.y <= point.y {
                if b.y > point.y && side(a, b, point) > 0 {
                    return 1;
                }
            } else if b.y <= point.y && side(a, b, point) < 0 {
                return -1;
            }
            0
        })
        .sum()
}
