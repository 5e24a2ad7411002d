use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::geometry::{Direction, Point};
use crate::grid::{Grid, GridError};

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid run limits: min {min}, max {max}")]
    #[diagnostic(
        code(helper::pathfinding::invalid_limits),
        help("run limits must satisfy 1 <= min <= max")
    )]
    InvalidLimits { min: u32, max: u32 },

    #[error("no path from {start} to {goal}")]
    #[diagnostic(code(helper::pathfinding::no_path))]
    NoPath { start: Point, goal: Point },

    #[error("found better way to settled state at {pos} ({settled} -> {found})")]
    #[diagnostic(code(helper::pathfinding::regression))]
    Regression { pos: Point, settled: u32, found: u32 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Grid(#[from] GridError),
}

/// How far a path may go in a straight line: at least `min` moves before it
/// may turn, at most `max` moves before it must.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RunLimits {
    min: u32,
    max: u32,
}

impl RunLimits {
    pub fn new(min: u32, max: u32) -> Result<Self, SearchError> {
        if min == 0 || min > max {
            return Err(SearchError::InvalidLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// No constraint besides never reversing.
    pub fn unbounded() -> Self {
        Self { min: 1, max: u32::MAX }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SearchState {
    pub pos: Point,
    /// Direction of the last move, `None` before the first one.
    pub dir: Option<Direction>,
    /// Consecutive moves made in `dir`.
    pub run: u32,
}

impl SearchState {
    fn origin(pos: Point) -> Self {
        Self {
            pos,
            dir: None,
            run: 0,
        }
    }

    fn advance(self, dir: Direction, limits: RunLimits) -> Option<Self> {
        let run = match self.dir {
            None => 1,
            Some(last) if last == dir => {
                if self.run >= limits.max {
                    return None;
                }
                self.run + 1
            }
            Some(last) if last.reverse() == dir => return None,
            Some(_) => {
                if self.run < limits.min {
                    return None;
                }
                1
            }
        };
        Some(Self {
            pos: dir.step(self.pos),
            dir: Some(dir),
            run,
        })
    }

    fn order_key(&self) -> (i32, i32, Option<Direction>, u32) {
        (self.pos.y, self.pos.x, self.dir, self.run)
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Route {
    pub cost: u32,
    /// Every visited position, `start` and `goal` included.
    pub path: Vec<Point>,
}

/// Cheapest way from `start` to `goal` where entering a cell costs its value.
///
/// Dijkstra over (position, direction, run length). A path may never reverse,
/// must respect `limits` and only counts as arrived once its final run is at
/// least `limits.min()` long.
pub fn shortest_path(
    grid: &Grid<u32>,
    start: Point,
    goal: Point,
    limits: RunLimits,
) -> Result<Route, SearchError> {
    grid.at(start)?;
    grid.at(goal)?;

    let origin = SearchState::origin(start);
    let mut best: HashMap<SearchState, u32> = HashMap::from([(origin, 0)]);
    let mut settled: HashMap<SearchState, u32> = HashMap::new();
    let mut previous: HashMap<SearchState, SearchState> = HashMap::new();
    let mut frontier = BinaryHeap::from([Reverse((0, origin))]);

    while let Some(Reverse((cost, state))) = frontier.pop() {
        if let Some(&done) = settled.get(&state) {
            if cost < done {
                return Err(SearchError::Regression {
                    pos: state.pos,
                    settled: done,
                    found: cost,
                });
            }
            continue;
        }
        if best.get(&state).is_some_and(|&known| cost > known) {
            continue;
        }
        settled.insert(state, cost);

        if state.pos == goal && (state.dir.is_none() || state.run >= limits.min) {
            debug!(cost, settled = settled.len(), "reached goal");
            return Ok(Route {
                cost,
                path: unwind(&previous, state),
            });
        }

        for dir in Direction::ALL {
            let Some(next) = state.advance(dir, limits) else {
                continue;
            };
            let Some(&tile) = grid.get(next.pos) else {
                continue;
            };
            let next_cost = cost + tile;
            if settled.contains_key(&next) || best.get(&next).is_some_and(|&known| known <= next_cost) {
                continue;
            }
            best.insert(next, next_cost);
            previous.insert(next, state);
            frontier.push(Reverse((next_cost, next)));
        }
    }

    Err(SearchError::NoPath { start, goal })
}

fn unwind(previous: &HashMap<SearchState, SearchState>, end: SearchState) -> Vec<Point> {
    let mut path = vec![end.pos];
    let mut current = end;
    while let Some(&before) = previous.get(&current) {
        path.push(before.pos);
        current = before;
    }
    path.reverse();
    path
}

/// Renders the cost grid with the route drawn as `#`.
pub fn render_route(grid: &Grid<u32>, route: &Route) -> String {
    let mut canvas = grid.map(|&cost| char::from_digit(cost, 10).unwrap_or('?'));
    for &pos in &route.path {
        if let Some(cell) = canvas.get_mut(pos) {
            *cell = '#';
        }
    }
    canvas.to_string()
}
