//! Configuration for linearization, chaining and seeding.

use std::str::FromStr;

use crate::error::{PangenomeError, Result};

/// How a node's coordinate is derived from the arrival costs
/// propagated by its predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Longest-path coordinate.
    Max,
    /// Truncating integer mean of the arrival costs.
    Mean,
}

impl Default for Aggregation {
    fn default() -> Self {
        Aggregation::Max
    }
}

impl Aggregation {
    /// Aggregate a list of arrival costs. An empty list (a node
    /// without predecessors) aggregates to 0.
    pub fn aggregate(&self, costs: &[usize]) -> usize {
        if costs.is_empty() {
            return 0;
        }
        match self {
            Aggregation::Max => costs.iter().copied().max().unwrap_or(0),
            Aggregation::Mean => costs.iter().sum::<usize>() / costs.len(),
        }
    }
}

impl FromStr for Aggregation {
    type Err = PangenomeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "max" => Ok(Aggregation::Max),
            "mean" => Ok(Aggregation::Mean),
            other => Err(PangenomeError::InvalidConfig(format!(
                "unknown aggregation mode '{}', expected 'max' or 'mean'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregation::Max => write!(f, "max"),
            Aggregation::Mean => write!(f, "mean"),
        }
    }
}

/// Parameters for adding sequences to a pangenome graph.
///
/// # Default Values
/// - `aggregation`: [`Aggregation::Max`]
/// - `reward`: 10 per chained seed
/// - `kmer_size`: 3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Linearization mode used to place seeds on the graph axis
    pub aggregation: Aggregation,

    /// Score awarded for every seed in a chain
    pub reward: i64,

    /// Length of the exact matches used as seeds
    pub kmer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            aggregation: Aggregation::Max,
            reward: 10,
            kmer_size: 3,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_reward(mut self, reward: i64) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_kmer_size(mut self, kmer_size: usize) -> Self {
        self.kmer_size = kmer_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.kmer_size == 0 {
            return Err(PangenomeError::InvalidConfig(
                "k-mer size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_modes() {
        let costs = [3, 8, 4];
        assert_eq!(Aggregation::Max.aggregate(&costs), 8);
        assert_eq!(Aggregation::Mean.aggregate(&costs), 5);
        assert_eq!(Aggregation::Mean.aggregate(&[1, 2]), 1);
        assert_eq!(Aggregation::Max.aggregate(&[]), 0);
        assert_eq!(Aggregation::Mean.aggregate(&[]), 0);
    }

    #[test]
    fn parse_aggregation() {
        assert_eq!("max".parse::<Aggregation>().unwrap(), Aggregation::Max);
        assert_eq!("mean".parse::<Aggregation>().unwrap(), Aggregation::Mean);
        assert!("median".parse::<Aggregation>().is_err());
    }

    #[test]
    fn builder_and_validation() {
        let config = Config::new()
            .with_aggregation(Aggregation::Mean)
            .with_reward(4)
            .with_kmer_size(5);
        assert_eq!(config.aggregation, Aggregation::Mean);
        assert_eq!(config.reward, 4);
        assert!(config.validate().is_ok());

        assert!(Config::new().with_kmer_size(0).validate().is_err());
    }
}
