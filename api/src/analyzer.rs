use crate::{
    combinations, deal_by_index, possible_arrangements, Cards, Distribution, Hands, Seat, Suit,
    SuitPriority, VoidState,
};
use log::trace;
use std::{fmt, fmt::Display};

/// Counts, enumerates and summarizes every arrangement of the unknown cards
/// that is consistent with the known voids.
///
/// The tree resolves one suit per node, most constrained suit first. A suit
/// only one other seat can hold goes to that seat outright. A suit two other
/// seats can hold branches on how many of its cards the first of them gets.
/// Once no constrained suit is left the remaining cards are dealt freely.
#[derive(Clone, Debug)]
pub enum Analyzer {
    /// No consistent arrangement exists.
    Impossible,
    /// Every card is accounted for.
    Complete,
    NoVoids {
        cards: Cards,
        available: [usize; 4],
        possibilities: u128,
    },
    SingleOwner {
        suit: Suit,
        cards: Cards,
        owner: Seat,
        next: Box<Analyzer>,
    },
    TwoOwners {
        suit: Suit,
        cards: Cards,
        owners: [Seat; 2],
        ways: Vec<Ways>,
        possibilities: u128,
    },
}

/// One split of a suit between two owners: the first owner takes `first`
/// of the suit's cards and the second owner takes the rest.
#[derive(Clone, Debug)]
pub struct Ways {
    first: usize,
    arrangements: u128,
    possibilities: u128,
    next: Analyzer,
}

impl Analyzer {
    /// `voids` must already exclude `seat`, whose hand is fully known. `hands`
    /// carries the room each seat has left for the `unknown` cards.
    pub fn build(
        seat: Seat,
        voids: VoidState,
        mut priority: SuitPriority,
        unknown: Cards,
        hands: Hands,
    ) -> Self {
        while let Some((suit, count)) = priority.pop() {
            let cards = unknown & suit.cards();
            let rest = unknown - cards;
            match count {
                0 => break,
                1 => {
                    let mut holders = voids.holders(seat, suit);
                    let owners = match (holders.next(), holders.next()) {
                        (Some(first), Some(second)) => [first, second],
                        _ => panic!("{} should have two holders in {:?}", suit, voids),
                    };
                    return Self::two_owners(seat, voids, priority, suit, cards, owners, rest, hands);
                }
                2 => {
                    let owner = match voids.holders(seat, suit).next() {
                        Some(owner) => owner,
                        None => panic!("{} should have a holder in {:?}", suit, voids),
                    };
                    return Self::single_owner(seat, voids, priority, suit, cards, owner, rest, hands);
                }
                _ => continue,
            }
        }
        if unknown.is_empty() {
            debug_assert!(hands.is_full());
            Analyzer::Complete
        } else {
            Analyzer::NoVoids {
                cards: unknown,
                available: hands.available(),
                possibilities: possible_arrangements(unknown, &hands),
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn single_owner(
        seat: Seat,
        voids: VoidState,
        priority: SuitPriority,
        suit: Suit,
        cards: Cards,
        owner: Seat,
        rest: Cards,
        mut hands: Hands,
    ) -> Self {
        if hands[owner].available() < cards.len() {
            trace!("{} cannot take {} {}", owner, cards.len(), suit);
            return Analyzer::Impossible;
        }
        hands[owner].merge(cards);
        let next = Self::build(seat, voids, priority, rest, hands);
        if next.possibilities() == 0 {
            return Analyzer::Impossible;
        }
        Analyzer::SingleOwner {
            suit,
            cards,
            owner,
            next: Box::new(next),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn two_owners(
        seat: Seat,
        voids: VoidState,
        priority: SuitPriority,
        suit: Suit,
        cards: Cards,
        owners: [Seat; 2],
        rest: Cards,
        hands: Hands,
    ) -> Self {
        let [a, b] = owners;
        let n = cards.len();
        let ways = (0..=n)
            .map(|first| {
                let arrangements = combinations(n, first);
                let next = if hands[a].available() < first || hands[b].available() < n - first {
                    Analyzer::Impossible
                } else {
                    let mut hands = hands;
                    let lowest = cards.lowest(first);
                    hands[a].merge(lowest);
                    hands[b].merge(cards - lowest);
                    Self::build(seat, voids, priority.clone(), rest, hands)
                };
                Ways {
                    first,
                    arrangements,
                    possibilities: arrangements * next.possibilities(),
                    next,
                }
            })
            .collect::<Vec<_>>();
        let possibilities = ways.iter().map(|way| way.possibilities).sum();
        Analyzer::TwoOwners {
            suit,
            cards,
            owners,
            ways,
            possibilities,
        }
    }

    /// Number of consistent arrangements.
    pub fn possibilities(&self) -> u128 {
        match self {
            Analyzer::Impossible => 0,
            Analyzer::Complete => 1,
            Analyzer::NoVoids { possibilities, .. } => *possibilities,
            Analyzer::SingleOwner { next, .. } => next.possibilities(),
            Analyzer::TwoOwners { possibilities, .. } => *possibilities,
        }
    }

    /// Deals arrangement number `index` into `hands`, which must have the same
    /// room left as the hands the analyzer was built from.
    pub fn actualize(&self, index: u128, hands: &mut Hands) {
        match self {
            Analyzer::Impossible => panic!("cannot actualize an impossible arrangement"),
            Analyzer::Complete => assert_eq!(index, 0, "only one arrangement is possible"),
            Analyzer::NoVoids { cards, .. } => deal_by_index(*cards, hands, index),
            Analyzer::SingleOwner {
                cards, owner, next, ..
            } => {
                hands[*owner].merge(*cards);
                next.actualize(index, hands);
            }
            Analyzer::TwoOwners {
                cards,
                owners,
                ways,
                possibilities,
                ..
            } => {
                assert!(
                    index < *possibilities,
                    "index {} out of range {}",
                    index,
                    possibilities
                );
                let mut index = index;
                for way in ways {
                    if index < way.possibilities {
                        way.actualize(*cards, *owners, index, hands);
                        return;
                    }
                    index -= way.possibilities;
                }
                unreachable!();
            }
        }
    }

    pub fn distribution(&self) -> Distribution {
        let mut dist = Distribution::new();
        self.expected_distribution(&mut dist);
        dist
    }

    /// Adds, for every unknown card and seat, the number of arrangements that
    /// put the card in that seat's hand.
    pub fn expected_distribution(&self, dist: &mut Distribution) {
        match self {
            Analyzer::Impossible | Analyzer::Complete => {}
            Analyzer::NoVoids {
                cards,
                available,
                possibilities,
            } => dist.distribute_remaining(*cards, *available, *possibilities),
            Analyzer::SingleOwner {
                cards, owner, next, ..
            } => {
                dist.distribute_to_seat(*cards, *owner, next.possibilities());
                next.expected_distribution(dist);
            }
            Analyzer::TwoOwners {
                cards,
                owners,
                ways,
                ..
            } => {
                for way in ways.iter().filter(|way| way.possibilities > 0) {
                    way.expected_distribution(*cards, *owners, dist);
                }
            }
        }
    }

    /// Renders the tree in Graphviz dot format.
    pub fn dot(&self) -> Dot<'_> {
        Dot(self)
    }

    fn write_dot(&self, f: &mut fmt::Formatter<'_>, next_id: &mut usize) -> Result<usize, fmt::Error> {
        let id = *next_id;
        *next_id += 1;
        match self {
            Analyzer::Impossible => writeln!(f, "  n{} [label=\"Impossible\"];", id)?,
            Analyzer::Complete => writeln!(f, "  n{} [label=\"Complete\"];", id)?,
            Analyzer::NoVoids {
                cards,
                possibilities,
                ..
            } => writeln!(
                f,
                "  n{} [label=\"NoVoids {} cards\\n{}\"];",
                id,
                cards.len(),
                possibilities
            )?,
            Analyzer::SingleOwner {
                suit,
                cards,
                owner,
                next,
            } => {
                writeln!(
                    f,
                    "  n{} [label=\"SingleOwner {} {}{}\"];",
                    id,
                    owner,
                    cards.len(),
                    suit
                )?;
                let child = next.write_dot(f, next_id)?;
                writeln!(f, "  n{} -> n{};", id, child)?;
            }
            Analyzer::TwoOwners {
                suit,
                cards,
                owners,
                ways,
                possibilities,
            } => {
                writeln!(
                    f,
                    "  n{} [label=\"TwoOwners {}/{} {}{}\\n{}\"];",
                    id,
                    owners[0],
                    owners[1],
                    cards.len(),
                    suit,
                    possibilities
                )?;
                for way in ways {
                    let child = way.next.write_dot(f, next_id)?;
                    writeln!(
                        f,
                        "  n{} -> n{} [label=\"{}:{} x{}\"];",
                        id,
                        child,
                        way.first,
                        cards.len() - way.first,
                        way.arrangements
                    )?;
                }
            }
        }
        Ok(id)
    }
}

impl Ways {
    fn actualize(&self, cards: Cards, owners: [Seat; 2], index: u128, hands: &mut Hands) {
        let next_possibilities = self.next.possibilities();
        let arrangement = index / next_possibilities;
        let mut saved = [0; 4];
        for &seat in &Seat::VALUES {
            let available = if seat == owners[0] {
                self.first
            } else if seat == owners[1] {
                cards.len() - self.first
            } else {
                0
            };
            saved[seat.idx()] = hands[seat].reduce_available_to(available);
        }
        deal_by_index(cards, hands, arrangement);
        for &seat in &Seat::VALUES {
            hands[seat].restore_capacity(saved[seat.idx()]);
        }
        self.next.actualize(index % next_possibilities, hands);
    }

    fn expected_distribution(&self, cards: Cards, owners: [Seat; 2], dist: &mut Distribution) {
        let n = cards.len();
        let next_possibilities = self.next.possibilities();
        // each card of the suit sits with the first owner in C(n-1, k-1) of the C(n, k) splits
        if self.first > 0 {
            let count = combinations(n - 1, self.first - 1) * next_possibilities;
            dist.distribute_to_seat(cards, owners[0], count);
        }
        if self.first < n {
            let count = combinations(n - 1, self.first) * next_possibilities;
            dist.distribute_to_seat(cards, owners[1], count);
        }
        let mut rest = Distribution::new();
        self.next.expected_distribution(&mut rest);
        rest *= self.arrangements;
        *dist += &rest;
    }
}

pub struct Dot<'a>(&'a Analyzer);

impl Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph analyzer {{")?;
        self.0.write_dot(f, &mut 0)?;
        writeln!(f, "}}")
    }
}
