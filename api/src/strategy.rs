use crate::{Card, KnowableState};
use rand::RngCore;

/// Chooses a legal play from what the current seat can know.
pub trait Strategy: Send + Sync {
    fn choose_play(&self, state: &KnowableState, rng: &mut dyn RngCore) -> Card;
}
