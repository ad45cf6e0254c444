use crate::{Card, Cards, Hands, Seat};
use std::{
    fmt,
    ops::{AddAssign, MulAssign},
};

/// Per card, per seat counts of how many arrangements put the card in that
/// seat's hand.
#[derive(Clone, Eq, PartialEq)]
pub struct Distribution {
    counts: [[u128; 4]; 52],
}

impl Distribution {
    pub fn new() -> Self {
        Self {
            counts: [[0; 4]; 52],
        }
    }

    pub fn get(&self, card: Card, seat: Seat) -> u128 {
        self.counts[card.idx()][seat.idx()]
    }

    pub fn add(&mut self, card: Card, seat: Seat, count: u128) {
        self.counts[card.idx()][seat.idx()] += count;
    }

    /// Total count for `card` across all seats.
    pub fn total(&self, card: Card) -> u128 {
        self.counts[card.idx()].iter().sum()
    }

    pub fn distribute_to_seat(&mut self, cards: Cards, seat: Seat, count: u128) {
        for card in cards {
            self.add(card, seat, count);
        }
    }

    /// Spreads `possibilities` arrangements of `cards` over seats in proportion
    /// to the room each seat has left.
    pub fn distribute_remaining(&mut self, cards: Cards, available: [usize; 4], possibilities: u128) {
        let total = cards.len() as u128;
        if total == 0 {
            return;
        }
        debug_assert_eq!(available.iter().sum::<usize>(), cards.len());
        for &seat in &Seat::VALUES {
            let available = available[seat.idx()] as u128;
            if available > 0 {
                self.distribute_to_seat(cards, seat, possibilities * available / total);
            }
        }
    }

    /// Counts one occurrence of every card in every hand.
    pub fn count_occurrences(&mut self, hands: &Hands) {
        for &seat in &Seat::VALUES {
            self.distribute_to_seat(hands[seat].cards(), seat, 1);
        }
    }

    pub fn as_probabilities(&self) -> [[f32; 4]; 52] {
        let mut probabilities = [[0.0; 4]; 52];
        for (card, counts) in self.counts.iter().enumerate() {
            let total = counts.iter().sum::<u128>();
            if total == 0 {
                continue;
            }
            for seat in 0..4 {
                probabilities[card][seat] = (counts[seat] as f64 / total as f64) as f32;
            }
        }
        probabilities
    }

    /// Every unplayed card is placed somewhere in exactly `possibilities`
    /// arrangements and played cards never are.
    pub fn validate(&self, unplayed: Cards, possibilities: u128) {
        for n in 0..52 {
            let card = Card::from(n);
            let expected = if unplayed.contains(card) {
                possibilities
            } else {
                0
            };
            assert_eq!(
                self.total(card),
                expected,
                "{} is counted {:?}",
                card,
                self.counts[card.idx()]
            );
        }
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::new()
    }
}

impl AddAssign<&Distribution> for Distribution {
    fn add_assign(&mut self, rhs: &Distribution) {
        for (row, other) in self.counts.iter_mut().zip(rhs.counts.iter()) {
            for (count, other) in row.iter_mut().zip(other.iter()) {
                *count += other;
            }
        }
    }
}

impl MulAssign<u128> for Distribution {
    fn mul_assign(&mut self, rhs: u128) {
        for row in self.counts.iter_mut() {
            for count in row.iter_mut() {
                *count *= rhs;
            }
        }
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (card, counts) in self.counts.iter().enumerate() {
            if counts.iter().any(|&count| count != 0) {
                writeln!(f, "{}: {:?}", Card::from(card as u8), counts)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distribute_remaining() {
        let cards = "AKQS".parse().unwrap();
        let mut dist = Distribution::new();
        dist.distribute_remaining(cards, [0, 1, 3, 0], 4);
        assert_eq!(dist.get(Card::AceSpades, Seat::East), 1);
        assert_eq!(dist.get(Card::AceSpades, Seat::South), 3);
        assert_eq!(dist.get(Card::AceSpades, Seat::North), 0);
        dist.validate(cards, 4);
    }

    #[test]
    fn test_arithmetic() {
        let mut dist = Distribution::new();
        dist.add(Card::TwoClubs, Seat::West, 3);
        let mut other = dist.clone();
        other *= 2;
        dist += &other;
        assert_eq!(dist.get(Card::TwoClubs, Seat::West), 9);
        assert_eq!(dist.total(Card::TwoClubs), 9);
    }

    #[test]
    fn test_probabilities() {
        let mut dist = Distribution::new();
        dist.add(Card::QueenSpades, Seat::North, 1);
        dist.add(Card::QueenSpades, Seat::South, 3);
        let probabilities = dist.as_probabilities();
        assert_eq!(probabilities[Card::QueenSpades.idx()], [0.25, 0.0, 0.75, 0.0]);
        assert_eq!(probabilities[Card::TwoClubs.idx()], [0.0; 4]);
    }

    #[test]
    #[should_panic]
    fn test_validate() {
        let mut dist = Distribution::new();
        dist.add(Card::QueenSpades, Seat::North, 1);
        dist.validate(Cards::NONE, 1);
    }
}
