use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, warn};

use crate::geometry::{Direction, Point};
use crate::grid::{Grid, GridError};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Plot {
    Garden,
    Rock,
    Start,
}

impl TryFrom<char> for Plot {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Plot::Garden),
            '#' => Ok(Plot::Rock),
            'S' => Ok(Plot::Start),
            other => Err(other),
        }
    }
}

impl fmt::Display for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Plot::Garden => '.',
            Plot::Rock => '#',
            Plot::Start => 'S',
        };
        write!(f, "{c}")
    }
}

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum GardenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Grid(#[from] GridError),

    #[error("garden map has no start position")]
    #[diagnostic(code(helper::reach::missing_start))]
    MissingStart,

    #[error("found another start at {second} after {first}")]
    #[diagnostic(code(helper::reach::multiple_starts))]
    MultipleStarts { first: Point, second: Point },
}

/// Which axes repeat forever.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Wrap {
    pub x: bool,
    pub y: bool,
}

impl Wrap {
    pub const NONE: Wrap = Wrap { x: false, y: false };
    pub const BOTH: Wrap = Wrap { x: true, y: true };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Garden {
    grid: Grid<Plot>,
    start: Point,
}

impl FromStr for Garden {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grid: Grid<Plot> = s.parse()?;
        let starts: Vec<Point> = grid
            .iter()
            .filter(|(_, &plot)| plot == Plot::Start)
            .map(|(pos, _)| pos)
            .take(2)
            .collect();
        let start = match starts[..] {
            [] => return Err(GardenError::MissingStart),
            [start] => start,
            [first, second, ..] => return Err(GardenError::MultipleStarts { first, second }),
        };
        Ok(Self { grid, start })
    }
}

impl Garden {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn grid(&self) -> &Grid<Plot> {
        &self.grid
    }

    fn is_open(&self, pos: Point, wrap: Wrap) -> bool {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        if !wrap.x && !(0..w).contains(&pos.x) {
            return false;
        }
        if !wrap.y && !(0..h).contains(&pos.y) {
            return false;
        }
        *self.grid.get_wrapped(pos) != Plot::Rock
    }

    /// Number of plots in which a walk of exactly `steps` moves from `from`
    /// can end.
    ///
    /// Explores (position, remaining steps) states one step layer at a time,
    /// so every state is visited once. Once a layer repeats the one two steps
    /// earlier the walk has settled into alternating between two layers.
    pub fn count_reachable(&self, from: Point, steps: u64, wrap: Wrap) -> u64 {
        let mut before: Option<HashSet<Point>> = None;
        let mut current: HashSet<Point> = HashSet::from([from]);

        for taken in 1..=steps {
            let next: HashSet<Point> = current
                .iter()
                .flat_map(|&pos| Direction::ALL.map(|dir| dir.step(pos)))
                .filter(|&pos| self.is_open(pos, wrap))
                .collect();

            if before.as_ref() == Some(&next) {
                let remaining = steps - taken;
                debug!(taken, remaining, "reachable plots settled");
                return if remaining % 2 == 0 {
                    next.len() as u64
                } else {
                    current.len() as u64
                };
            }
            before = Some(std::mem::replace(&mut current, next));
        }

        current.len() as u64
    }

    /// [`Garden::count_reachable`] from the start on an infinitely repeating
    /// map, extrapolated for large `steps` when the map's shape allows it.
    ///
    /// The extrapolation samples four step counts `steps % n + n * k`, with
    /// `k` sharing the target's parity, and requires the samples to lie on a
    /// single quadratic. Any unmet precondition falls back to simulation.
    pub fn count_reachable_repeating(&self, steps: u64) -> u64 {
        let simulate = || self.count_reachable(self.start, steps, Wrap::BOTH);

        if let Err(reason) = self.check_repeating_shape() {
            warn!(reason, "shortcut not available, simulating");
            return simulate();
        }

        let n = self.grid.width() as u64;
        let (offset, k) = (steps % n, steps / n);
        let first = 2 + k % 2;
        if k <= first + 6 {
            warn!(steps, "step count too small for the shortcut, simulating");
            return simulate();
        }

        let sample_steps: Vec<u64> = (0..4).map(|i| offset + n * (first + 2 * i)).collect();
        let distances = self.distance_counts(self.start, sample_steps[3]);
        let samples: Vec<i128> = sample_steps
            .iter()
            .map(|&s| distances.reachable_in(s) as i128)
            .collect();

        let d1: Vec<i128> = samples.windows(2).map(|w| w[1] - w[0]).collect();
        let d2: Vec<i128> = d1.windows(2).map(|w| w[1] - w[0]).collect();
        if d2[1] != d2[0] {
            warn!(?samples, "samples are not quadratic, simulating");
            return simulate();
        }

        let j = ((k - first) / 2) as i128;
        let count = samples[0] + j * d1[0] + j * (j - 1) / 2 * d2[0];
        debug!(steps, ?samples, count, "extrapolated reachable plots");
        u64::try_from(count).unwrap_or_else(|_| simulate())
    }

    fn check_repeating_shape(&self) -> Result<(), &'static str> {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        if w != h {
            return Err("map is not square");
        }
        if self.start != Point::new(w / 2, h / 2) || w % 2 == 0 {
            return Err("start is not in the centre of the map");
        }
        let rock = |pos: Point| self.grid.get(pos) == Some(&Plot::Rock);
        if (0..w).any(|i| rock(Point::new(i, self.start.y)) || rock(Point::new(self.start.x, i))) {
            return Err("no direct path from start to the border");
        }
        if (0..w).any(|i| {
            rock(Point::new(i, 0))
                || rock(Point::new(i, h - 1))
                || rock(Point::new(0, i))
                || rock(Point::new(w - 1, i))
        }) {
            return Err("border is not free");
        }
        Ok(())
    }

    /// Breadth-first distances from `from` on the repeating map, up to `limit`.
    fn distance_counts(&self, from: Point, limit: u64) -> DistanceCounts {
        let mut per_distance = vec![1];
        let mut seen = HashSet::from([from]);
        let mut frontier = vec![from];

        for _ in 0..limit {
            let mut next = Vec::new();
            for pos in frontier {
                for dir in Direction::ALL {
                    let pos = dir.step(pos);
                    if self.is_open(pos, Wrap::BOTH) && seen.insert(pos) {
                        next.push(pos);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            per_distance.push(next.len() as u64);
            frontier = next;
        }

        DistanceCounts { per_distance }
    }
}

/// How many plots lie at each shortest distance from a start.
struct DistanceCounts {
    per_distance: Vec<u64>,
}

impl DistanceCounts {
    /// A plot at distance `d <= steps` can be reached in exactly `steps`
    /// moves iff `d` has the same parity, by stepping back and forth.
    fn reachable_in(&self, steps: u64) -> u64 {
        if steps > 0 && self.per_distance.len() == 1 {
            return 0;
        }
        self.per_distance
            .iter()
            .enumerate()
            .take(steps as usize + 1)
            .skip((steps % 2) as usize)
            .step_by(2)
            .map(|(_, &count)| count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EXAMPLE: &str = "...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    const OPEN: &str = ".....
.....
..S..
.....
.....";

    const PILLARS: &str = ".....
.#.#.
..S..
.#.#.
.....";

    #[test]
    fn parses_start() -> Result<(), GardenError> {
        let garden: Garden = EXAMPLE.parse()?;
        assert_eq!(garden.start(), Point::new(5, 5));
        assert_eq!(garden.grid().to_string(), EXAMPLE);
        Ok(())
    }

    #[rstest]
    #[case("...\n...", GardenError::MissingStart)]
    #[case("S..\n..S", GardenError::MultipleStarts { first: Point::new(0, 0), second: Point::new(2, 1) })]
    #[case("S.S\nS..", GardenError::MultipleStarts { first: Point::new(0, 0), second: Point::new(2, 0) })]
    #[case("S.\n.x", GardenError::Grid(GridError::InvalidCell { found: 'x', x: 1, y: 1 }))]
    fn rejects_bad_maps(#[case] input: &str, #[case] expected: GardenError) {
        assert_eq!(input.parse::<Garden>(), Err(expected));
    }

    #[rstest]
    #[case(1, 2)]
    #[case(2, 4)]
    #[case(3, 6)]
    #[case(6, 16)]
    fn bounded_example(#[case] steps: u64, #[case] expected: u64) -> Result<(), GardenError> {
        let garden: Garden = EXAMPLE.parse()?;
        assert_eq!(garden.count_reachable(garden.start(), steps, Wrap::NONE), expected);
        Ok(())
    }

    #[rstest]
    #[case(6, 16)]
    #[case(10, 50)]
    #[case(50, 1594)]
    #[case(100, 6536)]
    fn repeating_example(#[case] steps: u64, #[case] expected: u64) -> Result<(), GardenError> {
        let garden: Garden = EXAMPLE.parse()?;
        assert_eq!(garden.count_reachable(garden.start(), steps, Wrap::BOTH), expected);
        assert_eq!(garden.count_reachable_repeating(steps), expected);
        Ok(())
    }

    #[test]
    fn bounded_counts_never_shrink_within_a_parity() -> Result<(), GardenError> {
        let garden: Garden = EXAMPLE.parse()?;
        let counts: Vec<u64> = (0..30)
            .map(|steps| garden.count_reachable(garden.start(), steps, Wrap::NONE))
            .collect();
        assert!(counts.windows(3).all(|w| w[2] >= w[0]), "{counts:?}");
        Ok(())
    }

    #[test]
    fn negative_coordinates_wrap_into_the_map() -> Result<(), GardenError> {
        let garden: Garden = ".#.\n.S.\n...".parse()?;
        assert_eq!(garden.count_reachable(Point::new(-3, -2), 0, Wrap::BOTH), 1);
        assert_eq!(garden.count_reachable(Point::new(-3, -3), 1, Wrap::BOTH), 3);
        assert_eq!(garden.count_reachable(Point::new(-3, -3), 1, Wrap::NONE), 0);
        Ok(())
    }

    #[rstest]
    #[case(OPEN, 64)]
    #[case(OPEN, 65)]
    #[case(OPEN, 66)]
    #[case(OPEN, 100)]
    #[case(PILLARS, 64)]
    #[case(PILLARS, 65)]
    #[case(PILLARS, 66)]
    #[case(PILLARS, 100)]
    fn shortcut_matches_simulation(#[case] input: &str, #[case] steps: u64) -> Result<(), GardenError> {
        let garden: Garden = input.parse()?;
        assert_eq!(garden.check_repeating_shape(), Ok(()));
        let simulated = garden.count_reachable(garden.start(), steps, Wrap::BOTH);
        assert_eq!(garden.count_reachable_repeating(steps), simulated);
        if input == OPEN {
            assert_eq!(simulated, (steps + 1).pow(2));
        }
        Ok(())
    }

    #[test]
    fn distance_counts_agree_with_layers() -> Result<(), GardenError> {
        let garden: Garden = EXAMPLE.parse()?;
        let distances = garden.distance_counts(garden.start(), 40);
        for steps in [0, 1, 2, 7, 20, 33, 40] {
            assert_eq!(
                distances.reachable_in(steps),
                garden.count_reachable(garden.start(), steps, Wrap::BOTH),
                "steps {steps}"
            );
        }
        Ok(())
    }

    #[test]
    fn walled_in_start_goes_nowhere() -> Result<(), GardenError> {
        let garden: Garden = "###\n#S#\n###".parse()?;
        assert_eq!(garden.count_reachable(garden.start(), 0, Wrap::BOTH), 1);
        assert_eq!(garden.count_reachable(garden.start(), 5, Wrap::BOTH), 0);
        assert_eq!(garden.distance_counts(garden.start(), 5).reachable_in(4), 0);
        Ok(())
    }
}
