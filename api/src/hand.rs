use crate::{Card, Cards, Seat};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A set of cards being dealt toward a target size.
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct Hand {
    cards: Cards,
    capacity: usize,
}

impl Hand {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity <= 13, "capacity={}", capacity);
        Self {
            cards: Cards::NONE,
            capacity,
        }
    }

    /// A hand that is already complete.
    pub fn exact(cards: Cards) -> Self {
        Self {
            cards,
            capacity: cards.len(),
        }
    }

    pub fn cards(&self) -> Cards {
        self.cards
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn available(&self) -> usize {
        self.capacity - self.cards.len()
    }

    pub fn is_full(&self) -> bool {
        self.available() == 0
    }

    pub fn insert(&mut self, card: Card) {
        assert!(self.available() > 0, "{} does not fit in {:?}", card, self);
        assert!(!self.cards.contains(card), "{} is already in {:?}", card, self);
        self.cards |= card;
    }

    pub fn merge(&mut self, cards: Cards) {
        assert!(
            !self.cards.contains_any(cards),
            "{} overlaps {:?}",
            cards,
            self
        );
        assert!(
            cards.len() <= self.available(),
            "{} does not fit in {:?}",
            cards,
            self
        );
        self.cards |= cards;
    }

    /// Removes a played card, shrinking the target size with it.
    pub fn remove(&mut self, card: Card) {
        assert!(self.cards.contains(card), "{} is not in {:?}", card, self);
        self.cards -= card;
        self.capacity -= 1;
    }

    /// Narrows the hand so only `available` more cards fit, returning the
    /// capacity to pass to `restore_capacity`.
    pub fn reduce_available_to(&mut self, available: usize) -> usize {
        assert!(available <= self.available(), "{} > {:?}", available, self);
        let prev = self.capacity;
        self.capacity = self.cards.len() + available;
        prev
    }

    pub fn restore_capacity(&mut self, capacity: usize) {
        assert!(capacity >= self.cards.len(), "{} < {:?}", capacity, self);
        self.capacity = capacity;
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.cards, self.cards.len(), self.capacity)
    }
}

/// One hand per seat.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Hands([Hand; 4]);

impl Hands {
    pub fn with_capacities(capacities: [usize; 4]) -> Self {
        let mut hands = Self::default();
        for &seat in &Seat::VALUES {
            hands[seat] = Hand::with_capacity(capacities[seat.idx()]);
        }
        hands
    }

    pub fn total_available(&self) -> usize {
        self.0.iter().map(|hand| hand.available()).sum()
    }

    pub fn available(&self) -> [usize; 4] {
        [
            self.0[0].available(),
            self.0[1].available(),
            self.0[2].available(),
            self.0[3].available(),
        ]
    }

    pub fn all_cards(&self) -> Cards {
        self.0.iter().map(|hand| hand.cards()).collect()
    }

    pub fn cards(&self) -> [Cards; 4] {
        [
            self.0[0].cards(),
            self.0[1].cards(),
            self.0[2].cards(),
            self.0[3].cards(),
        ]
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|hand| hand.is_full())
    }
}

impl Index<Seat> for Hands {
    type Output = Hand;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.0[seat.idx()]
    }
}

impl IndexMut<Seat> for Hands {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.0[seat.idx()]
    }
}
