use crate::{Card, Cards, Seat, Suit};
use std::{fmt, fmt::Formatter};

const EMPTY: u32 = 0x80_80_80_80;

/// Up to four cards, packed one per byte with the lead in the highest used byte.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Trick {
    state: u32,
}

impl Trick {
    pub fn new() -> Self {
        Self { state: EMPTY }
    }

    pub fn is_empty(self) -> bool {
        self.state == EMPTY
    }

    pub fn len(self) -> usize {
        (4 - (self.state ^ EMPTY).leading_zeros() / 8) as usize
    }

    pub fn is_complete(self) -> bool {
        self.state & EMPTY == 0
    }

    pub fn lead(self) -> Card {
        debug_assert!(!self.is_empty());
        let shift = 8 * (self.len() - 1);
        Card::from((self.state >> shift) as u8)
    }

    pub fn suit(self) -> Suit {
        self.lead().suit()
    }

    pub fn cards(self) -> Cards {
        self.into_iter().collect()
    }

    pub fn points(self) -> u32 {
        self.cards().points()
    }

    /// The highest card of the led suit.
    pub fn winning_card(self) -> Card {
        (self.cards() & self.suit().cards()).max()
    }

    pub fn winning_seat(self, leader: Seat) -> Seat {
        let winner = self.winning_card();
        let index = self
            .into_iter()
            .position(|card| card == winner)
            .unwrap_or(0);
        leader.offset(index)
    }

    #[must_use]
    pub fn push(self, card: Card) -> Trick {
        debug_assert!(!self.is_complete());
        Self {
            state: (self.state << 8) | (card as u8 as u32),
        }
    }
}

impl Default for Trick {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Trick {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let mut list = f.debug_list();
        for card in *self {
            list.entry(&card);
        }
        list.finish()
    }
}

impl IntoIterator for Trick {
    type Item = Card;
    type IntoIter = TrickIter;

    fn into_iter(self) -> Self::IntoIter {
        TrickIter(self)
    }
}

/// Yields cards in the order they were played.
pub struct TrickIter(Trick);

impl Iterator for TrickIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            return None;
        }
        let len = self.0.len();
        let card = self.0.lead();
        let mask = (1u64 << (8 * (len - 1))) - 1;
        self.0.state = (EMPTY & !(mask as u32)) | (self.0.state & mask as u32);
        Some(card)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for TrickIter {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_empty() {
        let trick = Trick::new();
        assert!(trick.is_empty());
        assert_eq!(trick.len(), 0);
        assert!(!trick.push(Card::FiveClubs).is_empty());
    }

    #[test]
    fn test_len() {
        let mut trick = Trick::new();
        for (i, &card) in [Card::TwoClubs, Card::AceHearts, Card::QueenSpades, Card::NineClubs]
            .iter()
            .enumerate()
        {
            assert!(!trick.is_complete());
            trick = trick.push(card);
            assert_eq!(trick.len(), i + 1);
        }
        assert!(trick.is_complete());
    }

    #[test]
    fn test_suit() {
        let mut trick = Trick::new().push(Card::FiveClubs);
        assert_eq!(trick.suit(), Suit::Clubs);
        trick = trick.push(Card::ThreeHearts);
        assert_eq!(trick.suit(), Suit::Clubs);
    }

    #[test]
    fn test_iter() {
        let trick = Trick::new()
            .push(Card::TwoClubs)
            .push(Card::AceHearts)
            .push(Card::QueenSpades);
        assert_eq!(
            trick.into_iter().collect::<Vec<_>>(),
            vec![Card::TwoClubs, Card::AceHearts, Card::QueenSpades]
        );
        assert_eq!(format!("{:?}", trick), "[2C, AH, QS]");
    }

    #[test]
    fn test_winning_seat() {
        let trick = Trick::new()
            .push(Card::FiveDiamonds)
            .push(Card::AceHearts)
            .push(Card::KingDiamonds)
            .push(Card::SevenDiamonds);
        assert_eq!(trick.winning_card(), Card::KingDiamonds);
        assert_eq!(trick.winning_seat(Seat::East), Seat::West);
        assert_eq!(trick.winning_seat(Seat::South), Seat::North);
        assert_eq!(trick.points(), 1);
    }

    #[test]
    fn test_lead_wins() {
        let trick = Trick::new()
            .push(Card::TwoClubs)
            .push(Card::AceHearts)
            .push(Card::QueenSpades)
            .push(Card::AceDiamonds);
        assert_eq!(trick.winning_seat(Seat::North), Seat::North);
        assert_eq!(trick.points(), 14);
    }
}
