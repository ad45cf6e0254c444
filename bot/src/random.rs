use moonshot_api::{Card, HeartsState, KnowableState, Strategy};
use rand::{Rng, RngCore};

pub struct RandomBot;

impl RandomBot {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RandomBot {
    fn choose_play(&self, state: &KnowableState, rng: &mut dyn RngCore) -> Card {
        let cards = state.legal_plays();
        let n = rng.gen_range(0..cards.len());
        cards.into_iter().nth(n).unwrap_or_else(|| cards.min())
    }
}
