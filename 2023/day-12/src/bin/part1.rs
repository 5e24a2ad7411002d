use aoc2023_day_12::part1::process_with_memo;
use aoc2023_helper::memo::JsonMemo;
use miette::{Context, IntoDiagnostic};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt::init();

    let file = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/input.txt"))
        .into_diagnostic()
        .wrap_err("reading input.txt")?;
    let memo = JsonMemo::open(concat!(env!("CARGO_MANIFEST_DIR"), "/cache.json"))?;
    let result = process_with_memo(&file, &memo).context("process part 1")?;
    println!("-> part 1: {}", result);
    Ok(())
}
