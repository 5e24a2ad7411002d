use std::fmt;

use aoc2023_helper::{Direction, Grid, Point};
use miette::*;
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `L`
    NorthEast,
    /// `J`
    NorthWest,
    /// `7`
    SouthWest,
    /// `F`
    SouthEast,
    Ground,
    Start,
}

impl TryFrom<char> for Tile {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '|' => Ok(Tile::Vertical),
            '-' => Ok(Tile::Horizontal),
            'L' => Ok(Tile::NorthEast),
            'J' => Ok(Tile::NorthWest),
            '7' => Ok(Tile::SouthWest),
            'F' => Ok(Tile::SouthEast),
            '.' => Ok(Tile::Ground),
            'S' => Ok(Tile::Start),
            other => Err(other),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Tile::Vertical => '|',
            Tile::Horizontal => '-',
            Tile::NorthEast => 'L',
            Tile::NorthWest => 'J',
            Tile::SouthWest => '7',
            Tile::SouthEast => 'F',
            Tile::Ground => '.',
            Tile::Start => 'S',
        };
        write!(f, "{c}")
    }
}

impl Tile {
    /// Whether a pipe leaves this tile towards `dir`. The start connects
    /// everywhere.
    pub fn connects(self, dir: Direction) -> bool {
        use Direction::*;

        matches!(
            (self, dir),
            (Tile::Start, _)
                | (Tile::Vertical, North | South)
                | (Tile::Horizontal, East | West)
                | (Tile::NorthEast, North | East)
                | (Tile::NorthWest, North | West)
                | (Tile::SouthWest, South | West)
                | (Tile::SouthEast, South | East)
        )
    }
}

pub struct Maze {
    grid: Grid<Tile>,
    start: Point,
}

impl Maze {
    pub fn parse(input: &str) -> Result<Self> {
        let grid: Grid<Tile> = input.parse()?;
        let start = grid
            .find(|&tile| tile == Tile::Start)
            .ok_or_else(|| miette!("maze has no start tile"))?;
        Ok(Self { grid, start })
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Tiles of the loop through the start, in walking order beginning at the
    /// start.
    pub fn find_loop(&self) -> Result<Vec<Point>> {
        let exits = self.grid.neighbors(self.start).filter_map(|(dir, _, tile)| {
            tile.connects(dir.reverse()).then_some(dir)
        });

        for exit in exits {
            if let Some(tiles) = self.walk(exit) {
                debug!(?exit, length = tiles.len(), "found loop");
                return Ok(tiles);
            }
        }

        Err(miette!("no pipe loop through the start at {}", self.start))
    }

    fn walk(&self, exit: Direction) -> Option<Vec<Point>> {
        let mut tiles = vec![self.start];
        let mut pos = self.start;
        let mut heading = exit;

        loop {
            pos = heading.step(pos);
            if pos == self.start {
                return Some(tiles);
            }
            let tile = *self.grid.get(pos)?;
            if !tile.connects(heading.reverse()) {
                return None;
            }
            heading = Direction::ALL
                .into_iter()
                .find(|&dir| dir != heading.reverse() && tile.connects(dir))?;
            tiles.push(pos);
        }
    }
}
