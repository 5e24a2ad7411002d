use aoc2023_helper::memo::JsonMemo;
use chumsky::prelude::*;
use indicatif::ParallelProgressIterator;
use miette::*;
use rayon::prelude::*;
use tracing::info;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Spring {
    Operational,
    Damaged,
    Unknown,
}

/// One row of the survey: spring conditions and the sizes of the contiguous
/// damaged groups, in order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Record {
    springs: Vec<Spring>,
    groups: Vec<usize>,
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Record>, extra::Err<Rich<'a, char>>> {
    let spring = choice((
        just('.').to(Spring::Operational),
        just('#').to(Spring::Damaged),
        just('?').to(Spring::Unknown),
    ));
    let groups = text::int(10)
        .from_str::<usize>()
        .unwrapped()
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<_>>();

    let record = spring
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(just(' ').repeated().at_least(1))
        .then(groups)
        .map(|(springs, groups)| Record { springs, groups });

    record
        .separated_by(text::newline().repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect()
}

pub fn parse(input: &str) -> Result<Vec<Record>> {
    parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))
}

impl Record {
    /// The record repeated `times` times, joined by unknown springs.
    pub fn unfold(&self, times: usize) -> Self {
        let mut springs = Vec::with_capacity((self.springs.len() + 1) * times);
        for copy in 0..times {
            if copy > 0 {
                springs.push(Spring::Unknown);
            }
            springs.extend_from_slice(&self.springs);
        }
        Self {
            springs,
            groups: self.groups.repeat(times),
        }
    }

    /// Number of ways to fill in the unknown springs so the damaged groups
    /// come out as recorded.
    pub fn arrangements(&self) -> u64 {
        let (n, m) = (self.springs.len(), self.groups.len());
        // ways[i * (m + 1) + j]: arrangements of springs[i..] with groups[j..].
        let mut ways = vec![0u64; (n + 1) * (m + 1)];
        let at = |i: usize, j: usize| i * (m + 1) + j;
        ways[at(n, m)] = 1;

        for i in (0..n).rev() {
            for j in (0..=m).rev() {
                let mut count = 0;
                if self.springs[i] != Spring::Damaged {
                    count += ways[at(i + 1, j)];
                }
                if self.springs[i] != Spring::Operational && j < m && self.fits(i, self.groups[j]) {
                    let after = (i + self.groups[j] + 1).min(n);
                    count += ways[at(after, j + 1)];
                }
                ways[at(i, j)] = count;
            }
        }

        ways[at(0, 0)]
    }

    /// Whether a damaged group of `len` springs can start at `start`.
    fn fits(&self, start: usize, len: usize) -> bool {
        let end = start + len;
        end <= self.springs.len()
            && self.springs[start..end]
                .iter()
                .all(|&spring| spring != Spring::Operational)
            && self.springs.get(end) != Some(&Spring::Damaged)
    }
}

/// Sum of [`Record::arrangements`] over every record, each line looked up in
/// and stored to `memo` under `id`.
pub fn total_arrangements(records: &[Record], memo: &JsonMemo, id: &str) -> Result<u64> {
    let total = records
        .par_iter()
        .enumerate()
        .progress_count(records.len() as u64)
        .map(|(index, record)| {
            memo.get_or_insert_with(JsonMemo::key(id, index), || record.arrangements())
        })
        .sum::<std::result::Result<u64, _>>()?;

    info!(id, records = records.len(), memoized = memo.len(), "counted arrangements");
    Ok(total)
}
