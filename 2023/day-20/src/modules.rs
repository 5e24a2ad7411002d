use std::collections::{HashMap, VecDeque};
use std::ops::AddAssign;

use miette::*;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, line_ending, multispace0},
    combinator::{all_consuming, map},
    multi::separated_list1,
    sequence::{preceded, terminated},
    IResult,
};
use tracing::trace;

/// A module's kind together with the memory it carries between pulses.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Broadcaster,
    FlipFlop { on: bool },
    /// Last pulse seen from each input, in the order of `Module::inputs`.
    Conjunction { memory: Vec<bool> },
    /// Only ever named as an output.
    Sink,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Module {
    name: String,
    kind: Kind,
    inputs: Vec<usize>,
    outputs: Vec<usize>,
}

/// A pulse between two modules. Pulses from the button have no sender.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pulse {
    pub from: Option<usize>,
    pub to: usize,
    pub high: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct PulseCount {
    pub low: u64,
    pub high: u64,
}

impl AddAssign for PulseCount {
    fn add_assign(&mut self, other: Self) {
        self.low += other.low;
        self.high += other.high;
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Network {
    modules: Vec<Module>,
    broadcaster: usize,
}

enum Prefix {
    Broadcast,
    FlipFlop,
    Conjunction,
}

fn declaration(input: &str) -> IResult<&str, (Prefix, &str, Vec<&str>)> {
    let (input, (prefix, name)) = alt((
        map(tag("broadcaster"), |name| (Prefix::Broadcast, name)),
        map(preceded(char('%'), alpha1), |name| (Prefix::FlipFlop, name)),
        map(preceded(char('&'), alpha1), |name| (Prefix::Conjunction, name)),
    ))(input)?;
    let (input, _) = tag(" -> ")(input)?;
    let (input, outputs) = separated_list1(tag(", "), alpha1)(input)?;
    Ok((input, (prefix, name, outputs)))
}

impl Network {
    pub fn parse(input: &str) -> Result<Self> {
        let (_, declarations) =
            all_consuming(terminated(separated_list1(line_ending, declaration), multispace0))(input)
                .map_err(|e| miette!("Parse failed: {}", e))?;

        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut modules = Vec::new();
        for (prefix, name, _) in declarations.iter() {
            if ids.insert(*name, modules.len()).is_some() {
                bail!("module {name} is declared twice");
            }
            let kind = match prefix {
                Prefix::Broadcast => Kind::Broadcaster,
                Prefix::FlipFlop => Kind::FlipFlop { on: false },
                Prefix::Conjunction => Kind::Conjunction { memory: Vec::new() },
            };
            modules.push(Module {
                name: name.to_string(),
                kind,
                inputs: Vec::new(),
                outputs: Vec::new(),
            });
        }

        for (from, (_, _, outputs)) in declarations.iter().enumerate() {
            for &output in outputs {
                let to = *ids.entry(output).or_insert_with(|| {
                    modules.push(Module {
                        name: output.to_string(),
                        kind: Kind::Sink,
                        inputs: Vec::new(),
                        outputs: Vec::new(),
                    });
                    modules.len() - 1
                });
                modules[from].outputs.push(to);
                modules[to].inputs.push(from);
            }
        }

        for module in &mut modules {
            if let Kind::Conjunction { memory } = &mut module.kind {
                *memory = vec![false; module.inputs.len()];
            }
        }

        let broadcaster = *ids
            .get("broadcaster")
            .ok_or_else(|| miette!("network has no broadcaster"))?;
        Ok(Self {
            modules,
            broadcaster,
        })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|module| module.name == name)
    }

    pub fn name(&self, index: usize) -> &str {
        &self.modules[index].name
    }

    pub fn kind(&self, index: usize) -> &Kind {
        &self.modules[index].kind
    }

    /// Modules sending to `index`, in declaration order.
    pub fn inputs(&self, index: usize) -> &[usize] {
        &self.modules[index].inputs
    }

    /// Every module's memory, without the wiring.
    pub fn state(&self) -> Vec<Kind> {
        self.modules.iter().map(|module| module.kind.clone()).collect()
    }

    /// Pushes the button once and delivers pulses in the order they are
    /// sent until none are left, showing each one to `observe`.
    pub fn push(&mut self, mut observe: impl FnMut(&Pulse)) -> PulseCount {
        let mut count = PulseCount::default();
        let mut queue = VecDeque::from([Pulse {
            from: None,
            to: self.broadcaster,
            high: false,
        }]);

        while let Some(pulse) = queue.pop_front() {
            observe(&pulse);
            if pulse.high {
                count.high += 1;
            } else {
                count.low += 1;
            }

            let module = &mut self.modules[pulse.to];
            let send = match &mut module.kind {
                Kind::Broadcaster => Some(pulse.high),
                Kind::FlipFlop { .. } if pulse.high => None,
                Kind::FlipFlop { on } => {
                    *on = !*on;
                    Some(*on)
                }
                Kind::Conjunction { memory } => {
                    if let Some(slot) = pulse
                        .from
                        .and_then(|from| module.inputs.iter().position(|&input| input == from))
                    {
                        memory[slot] = pulse.high;
                    }
                    Some(!memory.iter().all(|&high| high))
                }
                Kind::Sink => None,
            };

            if let Some(high) = send {
                trace!(from = %module.name, high, "sending");
                queue.extend(module.outputs.iter().map(|&to| Pulse {
                    from: Some(pulse.to),
                    to,
                    high,
                }));
            }
        }

        count
    }

    pub fn pushed(&self) -> Self {
        let mut network = self.clone();
        network.push(|_| {});
        network
    }
}

#[cfg(test)]
pub(crate) const FIRST_EXAMPLE: &str = "broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a";

#[cfg(test)]
pub(crate) const SECOND_EXAMPLE: &str = "broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wires_inputs_and_sinks() -> Result<()> {
        let network = Network::parse(SECOND_EXAMPLE)?;
        let con = network.index_of("con").ok_or_else(|| miette!("con"))?;
        let output = network.index_of("output").ok_or_else(|| miette!("output"))?;
        let inputs: Vec<&str> = network.inputs(con).iter().map(|&i| network.name(i)).collect();
        assert_eq!(inputs, vec!["a", "b"]);
        assert_eq!(network.kind(output), &Kind::Sink);
        assert_eq!(
            network.kind(con),
            &Kind::Conjunction {
                memory: vec![false, false]
            }
        );
        Ok(())
    }

    #[test]
    fn first_push_of_the_first_example() -> Result<()> {
        let mut network = Network::parse(FIRST_EXAMPLE)?;
        let mut sent = Vec::new();
        let count = network.push(|pulse| sent.push(*pulse));
        assert_eq!(count, PulseCount { low: 8, high: 4 });
        assert_eq!(sent.len(), 12);
        // Every flip-flop toggled on and back off.
        assert_eq!(network.state(), Network::parse(FIRST_EXAMPLE)?.state());
        Ok(())
    }

    #[test]
    fn second_example_cycles_every_four_pushes() -> Result<()> {
        let start = Network::parse(SECOND_EXAMPLE)?;
        let mut network = start.clone();
        let counts: Vec<PulseCount> = (0..4).map(|_| network.push(|_| {})).collect();
        assert_eq!(
            counts,
            vec![
                PulseCount { low: 4, high: 4 },
                PulseCount { low: 4, high: 2 },
                PulseCount { low: 5, high: 3 },
                PulseCount { low: 4, high: 2 },
            ]
        );
        assert_eq!(network, start);
        Ok(())
    }

    #[test]
    fn rejects_bad_networks() {
        assert!(Network::parse("%a -> b\n%b -> a").is_err());
        assert!(Network::parse("broadcaster -> a\n%a -> b\n%a -> c").is_err());
        assert!(Network::parse("broadcaster => a").is_err());
    }
}
