use crate::{Cards, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    fmt::{Debug, Display, Write},
    mem,
    ops::BitOr,
    str::FromStr,
};

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub enum Card {
    TwoClubs = 0,
    ThreeClubs,
    FourClubs,
    FiveClubs,
    SixClubs,
    SevenClubs,
    EightClubs,
    NineClubs,
    TenClubs,
    JackClubs,
    QueenClubs,
    KingClubs,
    AceClubs,
    TwoDiamonds,
    ThreeDiamonds,
    FourDiamonds,
    FiveDiamonds,
    SixDiamonds,
    SevenDiamonds,
    EightDiamonds,
    NineDiamonds,
    TenDiamonds,
    JackDiamonds,
    QueenDiamonds,
    KingDiamonds,
    AceDiamonds,
    TwoSpades,
    ThreeSpades,
    FourSpades,
    FiveSpades,
    SixSpades,
    SevenSpades,
    EightSpades,
    NineSpades,
    TenSpades,
    JackSpades,
    QueenSpades,
    KingSpades,
    AceSpades,
    TwoHearts,
    ThreeHearts,
    FourHearts,
    FiveHearts,
    SixHearts,
    SevenHearts,
    EightHearts,
    NineHearts,
    TenHearts,
    JackHearts,
    QueenHearts,
    KingHearts,
    AceHearts,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self::from(13 * suit as u8 + rank as u8)
    }

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn rank(self) -> Rank {
        Rank::from(self as u8 % 13)
    }

    pub fn suit(self) -> Suit {
        Suit::from(self as u8 / 13)
    }

    pub fn points(self) -> u32 {
        match self {
            Card::QueenSpades => 13,
            _ if self.suit() == Suit::Hearts => 1,
            _ => 0,
        }
    }

    pub fn above(self) -> Cards {
        Cards::ALL.above(self)
    }

    pub fn below(self) -> Cards {
        Cards::ALL.below(self)
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "n={}", n);
        unsafe { mem::transmute(n) }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.rank().char())?;
        f.write_char(self.suit().char())
    }
}

impl Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => {
                let rank = Rank::try_from(r).map_err(|c| format!("bad rank {}", c))?;
                let suit = Suit::try_from(s).map_err(|c| format!("bad suit {}", c))?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(format!("{:?} is not a card", s)),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Card::from_str(&s)
    }
}

impl From<Card> for String {
    fn from(c: Card) -> Self {
        c.to_string()
    }
}

impl BitOr<Card> for Card {
    type Output = Cards;

    fn bitor(self, rhs: Card) -> Self::Output {
        Cards::from(self) | rhs
    }
}
