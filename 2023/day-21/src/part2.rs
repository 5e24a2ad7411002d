use aoc2023_helper::reach::Garden;
use miette::*;

pub const STEPS: u64 = 26_501_365;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    process_steps(input, STEPS)
}

/// Garden plots reachable in exactly `steps` steps on the infinitely
/// repeating map.
pub fn process_steps(input: &str, steps: u64) -> Result<String> {
    let garden: Garden = input.parse()?;
    Ok(garden.count_reachable_repeating(steps).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXAMPLE;
    use aoc2023_helper::reach::Wrap;
    use rstest::rstest;

    #[rstest]
    #[case(6, "16")]
    #[case(10, "50")]
    #[case(50, "1594")]
    #[case(100, "6536")]
    fn it_works(#[case] steps: u64, #[case] expected: &str) -> Result<()> {
        assert_eq!(expected, process_steps(EXAMPLE, steps)?);
        Ok(())
    }

    #[rstest]
    #[case(131)]
    #[case(160)]
    fn shortcut_agrees_with_walking(#[case] steps: u64) -> Result<()> {
        // Scattered single rocks, open through the centre and along the border.
        let input = ".........
.#.....#.
...#.....
.#.....#.
....S....
..#...#..
.........
.#.....#.
.........";
        let garden: Garden = input.parse()?;
        let walked = garden.count_reachable(garden.start(), steps, Wrap::BOTH);
        assert_eq!(walked.to_string(), process_steps(input, steps)?);
        Ok(())
    }
}
