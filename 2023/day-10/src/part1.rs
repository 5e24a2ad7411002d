use miette::*;

use crate::maze::Maze;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let maze = Maze::parse(input)?;
    let tiles = maze.find_loop()?;
    Ok((tiles.len() / 2).to_string())
}
