use aoc2023_helper::memo::JsonMemo;
use miette::*;

use crate::springs::{parse, total_arrangements, Record};

const FOLDS: usize = 5;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    process_with_memo(input, &JsonMemo::in_memory())
}

#[tracing::instrument(skip(memo))]
pub fn process_with_memo(input: &str, memo: &JsonMemo) -> Result<String> {
    let records: Vec<Record> = parse(input)?
        .iter()
        .map(|record| record.unfold(FOLDS))
        .collect();
    let total = total_arrangements(&records, memo, "part2")?;
    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1";
        assert_eq!("525152", process(input)?);
        Ok(())
    }
}
