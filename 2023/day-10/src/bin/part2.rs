use aoc2023_day_10::part2::process;
use miette::{Context, IntoDiagnostic};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt::init();

    let file = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/input.txt"))
        .into_diagnostic()
        .wrap_err("reading input.txt")?;
    let result = process(&file).context("process part 2")?;
    println!("-> part 2: {}", result);
    Ok(())
}
