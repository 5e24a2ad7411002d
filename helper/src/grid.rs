use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

use crate::geometry::{Direction, Point};
use crate::math::wrap;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum GridError {
    #[error("grid input contains no rows")]
    #[diagnostic(code(helper::grid::empty))]
    Empty,

    #[error("row {line} has {found} cells, expected {expected}")]
    #[diagnostic(
        code(helper::grid::ragged_row),
        help("every row of a grid must have the same length")
    )]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell {found:?} at ({x}, {y})")]
    #[diagnostic(code(helper::grid::invalid_cell))]
    InvalidCell { found: char, x: i32, y: i32 },

    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    #[diagnostic(code(helper::grid::out_of_bounds))]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

/// A dense, row-major 2D grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Parses one row per non-empty line, mapping every character through `cell`.
    pub fn parse(input: &str, mut cell: impl FnMut(char) -> Option<T>) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for line in input.lines().filter(|line| !line.is_empty()) {
            let row_start = cells.len();
            for (x, c) in line.chars().enumerate() {
                let value = cell(c).ok_or(GridError::InvalidCell {
                    found: c,
                    x: x as i32,
                    y: height as i32,
                })?;
                cells.push(value);
            }

            let found = cells.len() - row_start;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::RaggedRow {
                        line: height + 1,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or(GridError::Empty)?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid by calling `f` for every position in row-major order.
    /// A zero width or height gives the 0x0 grid.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Point) -> T) -> Self {
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Point::new(x as i32, y as i32)))
            .map(&mut f)
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Row-major index of `pos`, `None` when out of bounds.
    pub fn index_of(&self, pos: Point) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn point_of(&self, index: usize) -> Point {
        let width = self.width.max(1);
        Point::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, pos: Point) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Point) -> Option<&mut T> {
        self.index_of(pos).map(|i| &mut self.cells[i])
    }

    /// Like [`Grid::get`], but reports the offending position.
    pub fn at(&self, pos: Point) -> Result<&T, GridError> {
        self.get(pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    pub fn set(&mut self, pos: Point, value: T) -> Result<(), GridError> {
        let i = self.index_of(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        self.cells[i] = value;
        Ok(())
    }

    /// Looks `pos` up as if the grid repeated forever in both axes. Panics on
    /// an empty grid.
    pub fn get_wrapped(&self, pos: Point) -> &T {
        let x = wrap(pos.x, self.width as i32) as usize;
        let y = wrap(pos.y, self.height as i32) as usize;
        &self.cells[y * self.width + x]
    }

    /// In-bounds neighbors of `pos`, always in [`Direction::ALL`] order.
    pub fn neighbors(&self, pos: Point) -> impl Iterator<Item = (Direction, Point, &T)> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let next = dir.step(pos);
            self.get(next).map(|cell| (dir, next, cell))
        })
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Point::new(x as i32, y as i32)))
    }

    /// Cells in row-major order together with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<Point> {
        self.cells
            .iter()
            .position(|cell| predicate(cell))
            .map(|i| self.point_of(i))
    }

    /// Every border cell paired with the direction pointing into the grid:
    /// west column heading east, east column heading west, then north row
    /// heading south and south row heading north.
    pub fn edge_entries(&self) -> Vec<(Point, Direction)> {
        let (w, h) = (self.width as i32, self.height as i32);
        let rows = (0..h).flat_map(|y| {
            [
                (Point::new(0, y), Direction::East),
                (Point::new(w - 1, y), Direction::West),
            ]
        });
        let columns = (0..w).flat_map(|x| {
            [
                (Point::new(x, 0), Direction::South),
                (Point::new(x, h - 1), Direction::North),
            ]
        });
        rows.chain(columns).collect()
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn swap(&mut self, a: Point, b: Point) -> Result<(), GridError> {
        let i = self.index_of(a).ok_or_else(|| self.out_of_bounds(a))?;
        let j = self.index_of(b).ok_or_else(|| self.out_of_bounds(b))?;
        self.cells.swap(i, j);
        Ok(())
    }

    fn out_of_bounds(&self, pos: Point) -> GridError {
        GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: TryFrom<char>> FromStr for Grid<T> {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s, |c| T::try_from(c).ok())
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 3)]
    #[case(3, 0)]
    #[case(0, 0)]
    fn empty_grids_have_no_cells(#[case] width: usize, #[case] height: usize) {
        let grid = Grid::from_fn(width, height, |_| 0u8);
        assert_eq!(grid.positions().count(), 0);
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.to_string(), "");
        assert_eq!(grid.find(|_| true), None);
        assert_eq!(grid.point_of(0), Point::new(0, 0));
        assert_eq!(grid.get(Point::new(0, 0)), None);
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert!(grid.edge_entries().is_empty());
    }

    const SAMPLE: &str = "#..#
.##.
#...";

    #[test]
    fn parse_round_trips() -> Result<(), GridError> {
        let grid: Grid<char> = SAMPLE.parse()?;
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.to_string(), SAMPLE);
        Ok(())
    }

    #[test]
    fn parse_skips_blank_and_crlf_lines() -> Result<(), GridError> {
        let grid: Grid<char> = "ab\r\ncd\r\n\r\n".parse()?;
        assert_eq!(grid.to_string(), "ab\ncd");
        Ok(())
    }

    #[rstest]
    #[case("", GridError::Empty)]
    #[case("abc\nab\n", GridError::RaggedRow { line: 2, expected: 3, found: 2 })]
    #[case("12\n3x\n", GridError::InvalidCell { found: 'x', x: 1, y: 1 })]
    fn parse_rejects(#[case] input: &str, #[case] expected: GridError) {
        let parsed = Grid::parse(input, |c| c.to_digit(10).or((c != 'x').then_some(0)));
        assert_eq!(parsed, Err(expected));
    }

    #[rstest]
    #[case(Point::new(-1, 0))]
    #[case(Point::new(0, -1))]
    #[case(Point::new(4, 0))]
    #[case(Point::new(0, 3))]
    fn lookups_reject_out_of_range(#[case] pos: Point) -> Result<(), GridError> {
        let mut grid: Grid<char> = SAMPLE.parse()?;
        assert_eq!(grid.get(pos), None);
        assert!(grid.at(pos).is_err());
        assert!(grid.set(pos, '.').is_err());
        assert!(grid.swap(Point::ZERO, pos).is_err());
        Ok(())
    }

    #[test]
    fn wrapped_lookup_uses_euclidean_modulo() -> Result<(), GridError> {
        let grid: Grid<char> = SAMPLE.parse()?;
        assert_eq!(grid.get_wrapped(Point::new(-1, 0)), &'#');
        assert_eq!(grid.get_wrapped(Point::new(-4, -3)), &'#');
        assert_eq!(grid.get_wrapped(Point::new(5, -2)), &'#');
        assert_eq!(grid.get_wrapped(Point::new(-6, 4)), &'#');
        Ok(())
    }

    #[test]
    fn neighbors_come_in_fixed_order() -> Result<(), GridError> {
        let grid: Grid<char> = SAMPLE.parse()?;
        let around: Vec<_> = grid.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            around,
            vec![
                (Direction::North, Point::new(1, 0), &'.'),
                (Direction::East, Point::new(2, 1), &'#'),
                (Direction::South, Point::new(1, 2), &'.'),
                (Direction::West, Point::new(0, 1), &'.'),
            ]
        );
        let corner: Vec<_> = grid.neighbors(Point::ZERO).map(|(dir, _, _)| dir).collect();
        assert_eq!(corner, vec![Direction::East, Direction::South]);
        Ok(())
    }

    #[test]
    fn edge_entries_cover_the_border() -> Result<(), GridError> {
        let grid: Grid<char> = SAMPLE.parse()?;
        let entries = grid.edge_entries();
        assert_eq!(entries.len(), 2 * (grid.width() + grid.height()));
        assert!(entries.contains(&(Point::new(3, 1), Direction::West)));
        assert!(entries.contains(&(Point::new(2, 2), Direction::North)));
        assert!(entries
            .iter()
            .all(|&(pos, dir)| grid.contains(pos) && grid.contains(dir.step(pos))));
        Ok(())
    }

    #[test]
    fn mutation_and_search() -> Result<(), GridError> {
        let mut grid: Grid<char> = SAMPLE.parse()?;
        assert_eq!(grid.find(|&c| c == '#'), Some(Point::ZERO));
        grid.swap(Point::ZERO, Point::new(1, 0))?;
        grid.set(Point::new(3, 2), 'O')?;
        assert_eq!(grid.to_string(), ".#.#\n.##.\n#..O");
        let counts = grid.map(|&c| u32::from(c == '#'));
        assert_eq!(counts.iter().map(|(_, &n)| n).sum::<u32>(), 5);
        Ok(())
    }
}
