pub mod dish;
pub mod part1;
pub mod part2;
