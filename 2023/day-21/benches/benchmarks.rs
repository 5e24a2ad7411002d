use aoc2023_day_21::*;

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

fn main() {
    // Run registered benchmarks.
    divan::main();
}

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(EXAMPLE)).unwrap();
}

#[divan::bench(args = [6, 50, 100])]
fn part2(steps: u64) {
    part2::process_steps(divan::black_box(EXAMPLE), steps).unwrap();
}
