use crate::{possible_arrangements, possible_deals, Card, Cards, Hands, Seat};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deals `cards` into `hands` as arrangement number `index`.
///
/// Cards are placed in ascending order. Each card goes to the first seat whose
/// share of the remaining arrangements covers what is left of `index`, so every
/// index in `0..possible_arrangements(cards, hands)` produces a distinct deal
/// and every hand ends up exactly full.
pub fn deal_by_index(cards: Cards, hands: &mut Hands, mut index: u128) {
    let mut arrangements = possible_arrangements(cards, hands);
    assert!(
        index < arrangements,
        "index {} out of range {}",
        index,
        arrangements
    );
    let mut remaining = cards.len() as u128;
    for card in cards {
        let mut weight = 0;
        let mut dealt = false;
        for &seat in &Seat::VALUES {
            index -= weight;
            weight = arrangements * hands[seat].available() as u128 / remaining;
            if index < weight {
                hands[seat].insert(card);
                dealt = true;
                break;
            }
        }
        assert!(dealt, "{} could not be dealt into {:?}", card, hands);
        arrangements = weight;
        remaining -= 1;
    }
    debug_assert!(hands.is_full());
}

pub fn deal_random(cards: Cards, hands: &mut Hands, rng: &mut dyn RngCore) -> u128 {
    let index = rng.gen_range(0..possible_arrangements(cards, hands));
    deal_by_index(cards, hands, index);
    index
}

/// A full deal of the deck, addressed by its index.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    index: u128,
    hands: [Cards; 4],
}

impl Deal {
    pub fn new(index: u128) -> Self {
        let mut hands = Hands::with_capacities([13; 4]);
        deal_by_index(Cards::ALL, &mut hands, index);
        Self {
            index,
            hands: hands.cards(),
        }
    }

    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::new(rng.gen_range(0..possible_deals()))
    }

    pub fn index(&self) -> u128 {
        self.index
    }

    pub fn hand(&self, seat: Seat) -> Cards {
        self.hands[seat.idx()]
    }

    pub fn hands(&self) -> [Cards; 4] {
        self.hands
    }

    /// The seat holding the two of clubs, which leads the first trick.
    pub fn start_seat(&self) -> Seat {
        Seat::VALUES
            .iter()
            .copied()
            .find(|&seat| self.hand(seat).contains(Card::TwoClubs))
            .unwrap_or(Seat::North)
    }
}

impl fmt::Debug for Deal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deal {:x}", self.index)?;
        for &seat in &Seat::VALUES {
            write!(f, ", {} [{}]", seat, self.hand(seat))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_first_deal() {
        let deal = Deal::new(0);
        assert_eq!(deal.hand(Seat::North), Cards::CLUBS);
        assert_eq!(deal.hand(Seat::East), Cards::DIAMONDS);
        assert_eq!(deal.hand(Seat::South), Cards::SPADES);
        assert_eq!(deal.hand(Seat::West), Cards::HEARTS);
        assert_eq!(deal.start_seat(), Seat::North);
    }

    #[test]
    fn test_second_deal() {
        let deal = Deal::new(1);
        assert_eq!(
            deal.hand(Seat::South),
            Cards::SPADES - Card::AceSpades | Card::TwoHearts
        );
        assert_eq!(
            deal.hand(Seat::West),
            Cards::HEARTS - Card::TwoHearts | Card::AceSpades
        );
    }

    #[test]
    fn test_third_deal() {
        let deal = Deal::new(2);
        assert_eq!(
            deal.hand(Seat::South),
            Cards::SPADES - Card::AceSpades | Card::ThreeHearts
        );
        assert!(deal.hand(Seat::West).contains(Card::AceSpades));
        assert!(deal.hand(Seat::West).contains(Card::TwoHearts));
    }

    #[test]
    fn test_last_deal() {
        let deal = Deal::new(possible_deals() - 1);
        assert_eq!(deal.hand(Seat::North), Cards::HEARTS);
        assert_eq!(deal.hand(Seat::East), Cards::SPADES);
        assert_eq!(deal.hand(Seat::South), Cards::DIAMONDS);
        assert_eq!(deal.hand(Seat::West), Cards::CLUBS);
        assert_eq!(deal.start_seat(), Seat::West);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range() {
        Deal::new(possible_deals());
    }

    #[test]
    fn test_random_deal() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let deal = Deal::random(&mut rng);
        assert_eq!(Deal::new(deal.index()), deal);
        let all = deal.hands().iter().copied().collect::<Cards>();
        assert_eq!(all, Cards::ALL);
        for &seat in &Seat::VALUES {
            assert_eq!(deal.hand(seat).len(), 13);
        }
    }

    #[test]
    fn test_bijection() {
        let cards = "AKQJT9S 2H".parse().unwrap();
        let hands = Hands::with_capacities([2, 0, 3, 2]);
        let count = possible_arrangements(cards, &hands);
        assert_eq!(count, 210);
        let mut seen = HashSet::new();
        for index in 0..count {
            let mut dealt = hands;
            deal_by_index(cards, &mut dealt, index);
            assert!(dealt.is_full());
            assert_eq!(dealt.all_cards(), cards);
            assert!(seen.insert(dealt.cards()));
        }
    }
}
