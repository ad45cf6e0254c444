use crate::{Cards, Hands, Seat, Suit};
use std::{cmp::Reverse, fmt, fmt::Formatter};

/// Which seats are known to hold no cards of which suits.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct VoidState {
    state: u16,
}

impl VoidState {
    pub fn new() -> Self {
        Self { state: 0 }
    }

    #[must_use]
    pub fn mark_void(self, seat: Seat, suit: Suit) -> VoidState {
        Self {
            state: self.state | 1 << (4 * seat.idx() + suit.idx()),
        }
    }

    pub fn is_void(self, seat: Seat, suit: Suit) -> bool {
        self.state & (1 << (4 * seat.idx() + suit.idx())) != 0
    }

    /// Forgets everything known about `seat`.
    #[must_use]
    pub fn for_others(self, seat: Seat) -> VoidState {
        Self {
            state: self.state & !(0xf << (4 * seat.idx())),
        }
    }

    pub fn count_in_suit(self, suit: Suit) -> usize {
        Seat::VALUES
            .iter()
            .filter(|&&seat| self.is_void(seat, suit))
            .count()
    }

    /// Seats other than `seat` that may still hold `suit`.
    pub fn holders(self, seat: Seat, suit: Suit) -> impl Iterator<Item = Seat> {
        (0..4)
            .map(|n| Seat::VALUES[n])
            .filter(move |&other| other != seat && !self.is_void(other, suit))
    }

    pub fn verify(self, hands: &Hands) {
        for &seat in &Seat::VALUES {
            for &suit in &Suit::VALUES {
                if self.is_void(seat, suit) {
                    assert!(
                        !hands[seat].cards().contains_any(suit.cards()),
                        "{} is void in {} but holds {}",
                        seat,
                        suit,
                        hands[seat].cards()
                    );
                }
            }
        }
    }
}

impl fmt::Debug for VoidState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        for &seat in &Seat::VALUES {
            if seat != Seat::North {
                write!(f, ", ")?;
            }
            write!(f, "{} [", seat)?;
            for &suit in &Suit::VALUES {
                if self.is_void(seat, suit) {
                    write!(f, "{}", suit.char())?;
                }
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Suits ordered so the most constrained one is resolved first.
#[derive(Clone, Debug)]
pub struct SuitPriority {
    suits: Vec<(Suit, usize)>,
}

impl SuitPriority {
    /// Voids must already exclude the seat whose hand is known. A suit with no
    /// unknown cards counts as fully void so it is never branched on.
    pub fn new(voids: VoidState, unknown: Cards) -> Self {
        let mut suits = Suit::VALUES
            .iter()
            .map(|&suit| {
                if unknown.contains_any(suit.cards()) {
                    (suit, voids.count_in_suit(suit))
                } else {
                    (suit, 3)
                }
            })
            .collect::<Vec<_>>();
        // popped from the back: most voids first, then lowest suit
        suits.sort_by_key(|&(suit, count)| (count, Reverse(suit)));
        Self { suits }
    }

    pub fn pop(&mut self) -> Option<(Suit, usize)> {
        self.suits.pop()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Card, Hand};

    #[test]
    fn test_mark_void() {
        let void = VoidState::new()
            .mark_void(Seat::East, Suit::Hearts)
            .mark_void(Seat::West, Suit::Hearts);
        assert!(void.is_void(Seat::East, Suit::Hearts));
        assert!(!void.is_void(Seat::East, Suit::Spades));
        assert!(!void.is_void(Seat::North, Suit::Hearts));
        assert_eq!(void.count_in_suit(Suit::Hearts), 2);
        assert_eq!(
            format!("{:?}", void),
            "North [], East [H], South [], West [H]"
        );
    }

    #[test]
    fn test_for_others() {
        let void = VoidState::new()
            .mark_void(Seat::North, Suit::Clubs)
            .mark_void(Seat::South, Suit::Clubs)
            .for_others(Seat::North);
        assert!(!void.is_void(Seat::North, Suit::Clubs));
        assert!(void.is_void(Seat::South, Suit::Clubs));
        assert_eq!(
            void.holders(Seat::North, Suit::Clubs).collect::<Vec<_>>(),
            vec![Seat::East, Seat::West]
        );
    }

    #[test]
    #[should_panic]
    fn test_verify() {
        let void = VoidState::new().mark_void(Seat::East, Suit::Diamonds);
        let mut hands = Hands::default();
        hands[Seat::East] = Hand::exact(Card::TwoDiamonds.into());
        void.verify(&hands);
    }

    #[test]
    fn test_priority() {
        let void = VoidState::new()
            .mark_void(Seat::East, Suit::Spades)
            .mark_void(Seat::East, Suit::Diamonds)
            .mark_void(Seat::South, Suit::Diamonds)
            .mark_void(Seat::West, Suit::Hearts);
        let unknown = Cards::ALL - Cards::CLUBS;
        let mut priority = SuitPriority::new(void, unknown);
        assert_eq!(priority.pop(), Some((Suit::Clubs, 3)));
        assert_eq!(priority.pop(), Some((Suit::Diamonds, 2)));
        assert_eq!(priority.pop(), Some((Suit::Spades, 1)));
        assert_eq!(priority.pop(), Some((Suit::Hearts, 1)));
        assert_eq!(priority.pop(), None);
    }
}
