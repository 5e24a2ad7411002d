use std::collections::HashMap;

use miette::*;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alphanumeric1, char, line_ending, multispace0, multispace1},
    combinator::{all_consuming, value},
    multi::{many1, separated_list1},
    sequence::{delimited, separated_pair, terminated},
    IResult,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Turn {
    Left,
    Right,
}

/// Turn instructions plus the left/right successors of every node.
#[derive(Debug)]
pub struct Network<'a> {
    turns: Vec<Turn>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

fn turns(input: &str) -> IResult<&str, Vec<Turn>> {
    many1(alt((
        value(Turn::Left, char('L')),
        value(Turn::Right, char('R')),
    )))(input)
}

fn node(input: &str) -> IResult<&str, (&str, (&str, &str))> {
    separated_pair(
        alphanumeric1,
        tag(" = "),
        delimited(
            char('('),
            separated_pair(alphanumeric1, tag(", "), alphanumeric1),
            char(')'),
        ),
    )(input)
}

fn network(input: &str) -> IResult<&str, Network<'_>> {
    let (input, turns) = turns(input)?;
    let (input, _) = multispace1(input)?;
    let (input, nodes) = separated_list1(line_ending, node)(input)?;
    Ok((
        input,
        Network {
            turns,
            nodes: nodes.into_iter().collect(),
        },
    ))
}

impl<'a> Network<'a> {
    pub fn parse(input: &'a str) -> Result<Self> {
        let (_, network) = all_consuming(terminated(network, multispace0))(input)
            .map_err(|e| miette!("Parse failed: {}", e))?;
        Ok(network)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.nodes.keys().copied()
    }

    /// Steps taken from `from`, following the turns over and over, until a
    /// node satisfying `arrived` is entered.
    pub fn steps(&self, from: &'a str, arrived: impl Fn(&str) -> bool) -> Result<u64> {
        // After this many steps some (node, turn index) pair has repeated.
        let limit = (self.turns.len() * self.nodes.len()) as u64;
        let mut current = from;

        for (taken, turn) in (1..).zip(self.turns.iter().cycle()) {
            let &(left, right) = self
                .nodes
                .get(current)
                .ok_or_else(|| miette!("unknown node {current}"))?;
            current = match turn {
                Turn::Left => left,
                Turn::Right => right,
            };
            if arrived(current) {
                return Ok(taken);
            }
            if taken > limit {
                break;
            }
        }

        Err(miette!("walking from {from} never arrives"))
    }
}
