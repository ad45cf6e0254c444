use crate::Cards;
use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    fmt::{Debug, Display, Write},
    mem,
};

const SUITS: [char; 4] = ['C', 'D', 'S', 'H'];

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Spades,
    Hearts,
}

impl Suit {
    pub const VALUES: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn char(self) -> char {
        SUITS[self.idx()]
    }

    pub fn cards(self) -> Cards {
        Cards {
            bits: 0x1fff << (13 * self as u64),
        }
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Self {
        assert!(n < 4, "n={}", n);
        unsafe { mem::transmute(n) }
    }
}

impl TryFrom<char> for Suit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        SUITS
            .iter()
            .position(|&s| s == c)
            .map(|n| Self::from(n as u8))
            .ok_or(c)
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.char())
    }
}

impl Debug for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Card;

    #[test]
    fn test_cards() {
        assert_eq!(Suit::Clubs.cards(), Cards::CLUBS);
        assert_eq!(Suit::Diamonds.cards(), Cards::DIAMONDS);
        assert_eq!(Suit::Spades.cards(), Cards::SPADES);
        assert_eq!(Suit::Hearts.cards(), Cards::HEARTS);
        assert_eq!(Suit::Hearts.cards().min(), Card::TwoHearts);
        assert_eq!(Suit::Spades.cards().max(), Card::AceSpades);
    }

    #[test]
    fn test_char() {
        assert_eq!(Suit::try_from('S'), Ok(Suit::Spades));
        assert_eq!(Suit::try_from('X'), Err('X'));
        assert_eq!(Suit::Hearts.to_string(), "H");
    }
}
