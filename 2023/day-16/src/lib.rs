pub mod part1;
pub mod part2;

#[cfg(test)]
pub(crate) const EXAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";
