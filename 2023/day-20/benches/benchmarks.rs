use aoc2023_day_20::*;

const EXAMPLE: &str = "broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output";

fn main() {
    // Run registered benchmarks.
    divan::main();
}

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(EXAMPLE)).unwrap();
}
