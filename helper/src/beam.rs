use std::fmt;

use bitvec::prelude::*;
use rayon::prelude::*;

use crate::geometry::{Direction, Point};
use crate::grid::Grid;

/// A contraption tile a beam can pass through.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Optic {
    /// `.`
    Empty,
    /// `/`
    MirrorForward,
    /// `\`
    MirrorBackward,
    /// `-`
    SplitterHorizontal,
    /// `|`
    SplitterVertical,
}

impl TryFrom<char> for Optic {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Optic::Empty),
            '/' => Ok(Optic::MirrorForward),
            '\\' => Ok(Optic::MirrorBackward),
            '-' => Ok(Optic::SplitterHorizontal),
            '|' => Ok(Optic::SplitterVertical),
            other => Err(other),
        }
    }
}

impl fmt::Display for Optic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Optic::Empty => '.',
            Optic::MirrorForward => '/',
            Optic::MirrorBackward => '\\',
            Optic::SplitterHorizontal => '-',
            Optic::SplitterVertical => '|',
        };
        write!(f, "{c}")
    }
}

impl Optic {
    /// Directions a beam leaves this tile in after entering it heading `dir`.
    pub fn deflect(self, dir: Direction) -> impl Iterator<Item = Direction> {
        use Direction::*;

        let (first, second) = match (self, dir) {
            (Optic::Empty, _) => (dir, None),
            (Optic::MirrorForward, North) => (East, None),
            (Optic::MirrorForward, East) => (North, None),
            (Optic::MirrorForward, South) => (West, None),
            (Optic::MirrorForward, West) => (South, None),
            (Optic::MirrorBackward, North) => (West, None),
            (Optic::MirrorBackward, East) => (South, None),
            (Optic::MirrorBackward, South) => (East, None),
            (Optic::MirrorBackward, West) => (North, None),
            (Optic::SplitterHorizontal, East | West) => (dir, None),
            (Optic::SplitterVertical, North | South) => (dir, None),
            (Optic::SplitterHorizontal, North | South) => (West, Some(East)),
            (Optic::SplitterVertical, East | West) => (North, Some(South)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Tiles a beam passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Energized {
    width: usize,
    height: usize,
    tiles: BitVec,
}

impl Energized {
    pub fn count(&self) -> usize {
        self.tiles.count_ones()
    }

    pub fn contains(&self, pos: Point) -> bool {
        let in_bounds = pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height;
        in_bounds && self.tiles[pos.y as usize * self.width + pos.x as usize]
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.tiles
            .iter_ones()
            .map(|i| Point::new((i % self.width) as i32, (i / self.width) as i32))
    }
}

/// Follows a beam entering `start` heading `dir` until every branch has left
/// the grid or runs into a (position, direction) pair already traced.
pub fn trace(grid: &Grid<Optic>, start: Point, dir: Direction) -> Energized {
    let tiles = grid.width() * grid.height();
    let mut energized = bitvec![0; tiles];
    let mut seen = bitvec![0; tiles * Direction::ALL.len()];
    let mut beams = vec![(start, dir)];

    while let Some((pos, dir)) = beams.pop() {
        let (Some(index), Some(&optic)) = (grid.index_of(pos), grid.get(pos)) else {
            continue;
        };
        if seen.replace(index * Direction::ALL.len() + dir.index(), true) {
            continue;
        }
        energized.set(index, true);

        beams.extend(optic.deflect(dir).map(|next| (next.step(pos), next)));
    }

    tracing::trace!(?start, ?dir, energized = energized.count_ones(), "beam traced");
    Energized {
        width: grid.width(),
        height: grid.height(),
        tiles: energized,
    }
}

/// Largest number of energized tiles over every edge entry point.
pub fn max_energized_from_edges(grid: &Grid<Optic>) -> usize {
    grid.edge_entries()
        .into_par_iter()
        .map(|(pos, dir)| trace(grid, pos, dir).count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridError;
    use rstest::rstest;

    const CONTRAPTION: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn single_mirror_turns_the_beam_north() -> Result<(), GridError> {
        let grid: Grid<Optic> = ".....\n.....\n../..\n.....\n.....".parse()?;
        let energized = trace(&grid, Point::new(0, 2), Direction::East);
        let mut tiles: Vec<_> = energized.positions().map(|p| (p.x, p.y)).collect();
        tiles.sort();
        assert_eq!(tiles, vec![(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)]);
        assert_eq!(energized.count(), 5);
        Ok(())
    }

    #[rstest]
    #[case(Point::new(0, 1), Direction::East)]
    #[case(Point::new(3, 0), Direction::South)]
    #[case(Point::new(4, 3), Direction::West)]
    #[case(Point::new(2, 3), Direction::North)]
    fn empty_grid_energizes_a_straight_line(
        #[case] start: Point,
        #[case] dir: Direction,
    ) -> Result<(), GridError> {
        let grid: Grid<Optic> = ".....\n.....\n.....\n.....".parse()?;
        let energized = trace(&grid, start, dir);
        let expected = if dir.is_horizontal() {
            grid.width()
        } else {
            grid.height()
        };
        assert_eq!(energized.count(), expected);
        assert!(energized.positions().all(|p| if dir.is_horizontal() {
            p.y == start.y
        } else {
            p.x == start.x
        }));
        Ok(())
    }

    #[test]
    fn splitters_branch_and_loops_terminate() -> Result<(), GridError> {
        let grid: Grid<Optic> = CONTRAPTION.parse()?;
        let energized = trace(&grid, Point::ZERO, Direction::East);
        assert_eq!(energized.count(), 46);
        assert!(energized.contains(Point::new(1, 9)));
        assert!(!energized.contains(Point::new(0, 9)));
        assert!(!energized.contains(Point::new(-1, 0)));
        assert_eq!(trace(&grid, Point::ZERO, Direction::East), energized);
        Ok(())
    }

    #[test]
    fn best_edge_entry() -> Result<(), GridError> {
        let grid: Grid<Optic> = CONTRAPTION.parse()?;
        assert_eq!(max_energized_from_edges(&grid), 51);
        Ok(())
    }

    #[test]
    fn unknown_tiles_are_rejected() {
        assert_eq!(
            "..x".parse::<Grid<Optic>>(),
            Err(GridError::InvalidCell {
                found: 'x',
                x: 2,
                y: 0
            })
        );
        assert_eq!(Optic::try_from('#'), Err('#'));
    }

    #[test]
    fn display_round_trips() -> Result<(), GridError> {
        let grid: Grid<Optic> = CONTRAPTION.parse()?;
        assert_eq!(grid.to_string(), CONTRAPTION);
        Ok(())
    }
}
