use std::fmt;

use aoc2023_helper::{Direction, Grid, Point};
use miette::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rock {
    Round,
    Cube,
    Empty,
}

impl TryFrom<char> for Rock {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'O' => Ok(Rock::Round),
            '#' => Ok(Rock::Cube),
            '.' => Ok(Rock::Empty),
            other => Err(other),
        }
    }
}

impl fmt::Display for Rock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Rock::Round => 'O',
            Rock::Cube => '#',
            Rock::Empty => '.',
        };
        write!(f, "{c}")
    }
}

/// The reflector dish platform. Round rocks roll, cube rocks stay put.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Dish {
    grid: Grid<Rock>,
}

impl Dish {
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            grid: input.parse()?,
        })
    }

    /// Rolls every round rock towards `dir` until it hits the edge, a cube
    /// rock or another round rock.
    pub fn tilt(&mut self, dir: Direction) {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        let (lanes, len) = if dir.is_horizontal() { (h, w) } else { (w, h) };

        for lane in 0..lanes {
            // Position `k` cells away from the wall rocks roll towards.
            let cell = |k: i32| match dir {
                Direction::North => Point::new(lane, k),
                Direction::South => Point::new(lane, len - 1 - k),
                Direction::West => Point::new(k, lane),
                Direction::East => Point::new(len - 1 - k, lane),
            };

            let mut free = 0;
            for k in 0..len {
                match self.grid.get(cell(k)).copied() {
                    Some(Rock::Cube) => free = k + 1,
                    Some(Rock::Round) => {
                        if free != k {
                            self.roll(cell(k), cell(free));
                        }
                        free += 1;
                    }
                    _ => {}
                }
            }
        }
    }

    fn roll(&mut self, from: Point, to: Point) {
        if let Some(cell) = self.grid.get_mut(from) {
            *cell = Rock::Empty;
        }
        if let Some(cell) = self.grid.get_mut(to) {
            *cell = Rock::Round;
        }
    }

    /// One spin cycle: tilt north, west, south, then east.
    pub fn spun(&self) -> Self {
        let mut dish = self.clone();
        for dir in [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ] {
            dish.tilt(dir);
        }
        dish
    }

    /// Each round rock weighs as many rows as lie between it and the south
    /// edge, its own row included.
    pub fn north_load(&self) -> usize {
        let height = self.grid.height();
        self.grid
            .iter()
            .filter(|(_, &rock)| rock == Rock::Round)
            .map(|(pos, _)| height - pos.y as usize)
            .sum()
    }
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....";
