use moonshot_api::{Card, Cards, HeartsState, KnowableState, Strategy};
use rand::RngCore;

/// Leads low, stays under the card to beat, and sheds points when void.
pub struct DuckBot;

impl DuckBot {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for DuckBot {
    fn choose_play(&self, state: &KnowableState, _: &mut dyn RngCore) -> Card {
        let cards = state.legal_plays();
        let high = match state.high_card_on_table() {
            Some(high) => high,
            None => return lowest(cards, state.hand()),
        };
        if !high.suit().cards().contains_any(cards) {
            if cards.contains(Card::QueenSpades) {
                return Card::QueenSpades;
            }
            let hearts = cards & Cards::HEARTS;
            if !hearts.is_empty() {
                return hearts.max();
            }
            return cards
                .into_iter()
                .max_by_key(|card| score(*card, state.hand()))
                .unwrap_or_else(|| cards.max());
        }
        let duck = cards.below(high);
        if !duck.is_empty() {
            return duck.max();
        }
        // taking it anyway, so take it high unless it would collect the queen
        let top = cards.max();
        if top == Card::QueenSpades && cards.len() > 1 {
            (cards - Card::QueenSpades).max()
        } else {
            top
        }
    }
}

fn lowest(cards: Cards, hand: Cards) -> Card {
    cards
        .into_iter()
        .min_by_key(|card| score(*card, hand))
        .unwrap_or_else(|| cards.min())
}

fn score(card: Card, hand: Cards) -> usize {
    14 * card.rank() as usize + 13 - (card.suit().cards() & hand).len()
}
