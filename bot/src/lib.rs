mod annotator;
mod config;
mod duck;
mod error;
mod monte_carlo;
mod random;
mod stats;
mod tournament;

pub use annotator::*;
pub use config::*;
pub use duck::*;
pub use error::*;
pub use monte_carlo::*;
pub use random::*;
pub use stats::*;
pub use tournament::*;

use moonshot_api::{Card, KnowableState, Strategy};
use rand::RngCore;
use std::sync::Arc;

pub enum Bot {
    Duck(DuckBot),
    MonteCarlo(MonteCarloBot),
    Random(RandomBot),
}

impl Bot {
    /// A rollout search that plays out every alternate with `DuckBot`.
    pub fn monte_carlo(config: SearchConfig) -> Result<Self, BotError> {
        Ok(Bot::MonteCarlo(MonteCarloBot::new(Arc::new(DuckBot::new()), config)?))
    }
}

impl Strategy for Bot {
    fn choose_play(&self, state: &KnowableState, rng: &mut dyn RngCore) -> Card {
        match self {
            Bot::Duck(bot) => bot.choose_play(state, rng),
            Bot::MonteCarlo(bot) => bot.choose_play(state, rng),
            Bot::Random(bot) => bot.choose_play(state, rng),
        }
    }
}
