use crate::BotError;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, time::Duration};

/// How many hypothetical deals to roll out per decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alternates {
    Fixed(usize),
    /// At least `min`, then keep starting new ones until `millis` have passed,
    /// but never more than `max`.
    Budget { min: usize, max: usize, millis: u64 },
}

impl Alternates {
    pub fn min(&self) -> usize {
        match self {
            Alternates::Fixed(n) => *n,
            Alternates::Budget { min, .. } => *min,
        }
    }

    pub fn max(&self) -> usize {
        match self {
            Alternates::Fixed(n) => *n,
            Alternates::Budget { max, .. } => *max,
        }
    }

    pub fn budget(&self) -> Option<Duration> {
        match self {
            Alternates::Fixed(_) => None,
            Alternates::Budget { millis, .. } => Some(Duration::from_millis(*millis)),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    Standard,
    Modified,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub alternates: Alternates,
    /// Size of the rollout pool, zero to roll out on the calling thread.
    pub workers: usize,
    /// Visit every possible deal once when there are no more of them than
    /// the alternate limit.
    pub exhaustive: bool,
    pub score: ScoreType,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alternates: Alternates::Budget {
                min: 30,
                max: 2000,
                millis: 250,
            },
            workers: 0,
            exhaustive: false,
            score: ScoreType::Standard,
        }
    }
}

impl SearchConfig {
    pub fn fixed(alternates: usize) -> Self {
        Self {
            alternates: Alternates::Fixed(alternates),
            ..Self::default()
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BotError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: SearchConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, BotError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BotError> {
        let (min, max) = (self.alternates.min(), self.alternates.max());
        if max == 0 {
            return Err(BotError::InvalidConfig(
                "at least one alternate is required".to_string(),
            ));
        }
        if min > max {
            return Err(BotError::InvalidConfig(format!(
                "min alternates {} exceeds max {}",
                min, max
            )));
        }
        Ok(())
    }
}
