pub mod network;
pub mod part1;
pub mod part2;
