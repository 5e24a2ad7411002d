use miette::*;

use crate::network::Network;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = Network::parse(input)?;
    let steps = network.steps("AAA", |node| node == "ZZZ")?;
    Ok(steps.to_string())
}
