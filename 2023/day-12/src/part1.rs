use aoc2023_helper::memo::JsonMemo;
use miette::*;

use crate::springs::{parse, total_arrangements};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    process_with_memo(input, &JsonMemo::in_memory())
}

#[tracing::instrument(skip(memo))]
pub fn process_with_memo(input: &str, memo: &JsonMemo) -> Result<String> {
    let records = parse(input)?;
    let total = total_arrangements(&records, memo, "part1")?;
    Ok(total.to_string())
}
