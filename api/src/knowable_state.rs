use crate::{
    Analyzer, Card, Cards, Distribution, GameState, Hand, Hands, HeartsState, PublicState, Seat,
    SuitPriority,
};
use rand::{Rng, RngCore};

/// The game as seen by the seat to play.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct KnowableState {
    public: PublicState,
    hand: Cards,
}

impl KnowableState {
    pub fn new(public: PublicState, hand: Cards) -> Self {
        debug_assert!(public.unplayed.contains_all(hand));
        Self { public, hand }
    }

    pub fn hand(&self) -> Cards {
        self.hand
    }

    /// Unplayed cards held by the other seats.
    pub fn unknown_cards(&self) -> Cards {
        self.public.unplayed - self.hand
    }

    /// Hands to deal the unknown cards into. The current seat's hand is
    /// complete and seats that already played to this trick hold one card
    /// fewer than seats still to play.
    pub fn prepare_hands(&self) -> Hands {
        let trick_start = self.public.play & !3;
        let max_holding = (52 - trick_start) / 4;
        let current = self.current_seat();
        let mut hands = Hands::default();
        for &seat in &Seat::VALUES {
            hands[seat] = if seat == current {
                Hand::exact(self.hand)
            } else if self.public.has_played_in_trick(seat) {
                Hand::with_capacity(max_holding - 1)
            } else {
                Hand::with_capacity(max_holding)
            };
        }
        assert_eq!(
            hands.total_available(),
            self.unknown_cards().len(),
            "{:?} cannot hold {}",
            hands,
            self.unknown_cards()
        );
        hands
    }

    pub fn analyze(&self) -> Analyzer {
        let seat = self.current_seat();
        let voids = self.public.void.for_others(seat);
        let unknown = self.unknown_cards();
        Analyzer::build(
            seat,
            voids,
            SuitPriority::new(voids, unknown),
            unknown,
            self.prepare_hands(),
        )
    }

    /// Every seat's hand in arrangement number `index` of `analyzer`.
    pub fn hypothetical_hands(&self, analyzer: &Analyzer, index: u128) -> Hands {
        let mut hands = self.prepare_hands();
        analyzer.actualize(index, &mut hands);
        self.public.void.verify(&hands);
        hands
    }

    pub fn hypothetical_state(&self, analyzer: &Analyzer, index: u128) -> GameState {
        GameState::from_knowable(self, &self.hypothetical_hands(analyzer, index))
    }

    pub fn random_state(&self, analyzer: &Analyzer, rng: &mut dyn RngCore) -> GameState {
        let index = rng.gen_range(0..analyzer.possibilities());
        self.hypothetical_state(analyzer, index)
    }

    /// Exact counts of where every unplayed card lies across all arrangements,
    /// the current seat's own cards included.
    pub fn distribution(&self, analyzer: &Analyzer) -> Distribution {
        let mut dist = analyzer.distribution();
        dist.distribute_to_seat(self.hand, self.current_seat(), analyzer.possibilities());
        dist
    }

    /// A quick estimate that spreads each unknown card over the seats that
    /// could hold it, in proportion to their room left.
    pub fn probabilities(&self) -> [[f32; 4]; 52] {
        let mut probabilities = [[0.0; 4]; 52];
        let current = self.current_seat();
        let available = self.prepare_hands().available();
        for card in self.hand {
            probabilities[card.idx()][current.idx()] = 1.0;
        }
        for card in self.unknown_cards() {
            let holders = self
                .public
                .void
                .holders(current, card.suit())
                .filter(|seat| available[seat.idx()] > 0)
                .collect::<Vec<_>>();
            let total = holders.iter().map(|seat| available[seat.idx()]).sum::<usize>();
            for seat in holders {
                probabilities[card.idx()][seat.idx()] = available[seat.idx()] as f32 / total as f32;
            }
        }
        probabilities
    }

    pub fn is_known(&self, card: Card) -> bool {
        self.hand.contains(card) || !self.public.unplayed.contains(card)
    }
}

impl HeartsState for KnowableState {
    fn public(&self) -> &PublicState {
        &self.public
    }

    fn current_hand(&self) -> Cards {
        self.hand
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{combinations, possible_deals, Deal, Strategy};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    struct Highest;

    impl Strategy for Highest {
        fn choose_play(&self, state: &KnowableState, _: &mut dyn RngCore) -> Card {
            state.legal_plays().max()
        }
    }

    fn advance(game: &mut GameState, plays: usize, rng: &mut dyn RngCore) {
        for _ in 0..plays {
            game.next_play(&Highest, rng);
        }
    }

    #[test]
    fn test_opening_possibilities() {
        let game = GameState::from_deal(&Deal::new(0));
        let knowable = game.knowable();
        assert_eq!(knowable.unknown_cards().len(), 39);
        let analyzer = knowable.analyze();
        assert_eq!(
            analyzer.possibilities(),
            possible_deals() / combinations(52, 13)
        );
    }

    #[test]
    fn test_prepare_hands_mid_trick() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut game = GameState::from_deal(&Deal::random(&mut rng));
        advance(&mut game, 6, &mut rng);
        let knowable = game.knowable();
        let hands = knowable.prepare_hands();
        let leader = knowable.public().leader;
        assert_eq!(hands[leader].available(), 11);
        assert_eq!(hands[leader.left()].available(), 11);
        assert_eq!(hands[leader.across()], Hand::exact(knowable.hand()));
        assert_eq!(hands[leader.right()].available(), 12);
    }

    #[test]
    fn test_hypothetical_states() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for plays in &[1, 9, 22, 31, 40, 47] {
            let deal = Deal::random(&mut rng);
            let mut game = GameState::from_deal(&deal);
            advance(&mut game, *plays, &mut rng);
            let knowable = game.knowable();
            let analyzer = knowable.analyze();
            assert!(analyzer.possibilities() > 0);

            for _ in 0..20 {
                let state = knowable.random_state(&analyzer, &mut rng);
                assert_eq!(state.knowable(), knowable);
            }
            // the real deal is one of the arrangements
            if analyzer.possibilities() <= 1000 {
                let all = (0..analyzer.possibilities())
                    .map(|index| knowable.hypothetical_state(&analyzer, index))
                    .collect::<HashSet<_>>();
                assert!(all.contains(&game));
            }

            let dist = knowable.distribution(&analyzer);
            dist.validate(game.public().unplayed, analyzer.possibilities());
        }
    }

    #[test]
    fn test_voids_respected() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut checked = 0;
        while checked < 5 {
            let mut game = GameState::from_deal(&Deal::random(&mut rng));
            advance(&mut game, 28, &mut rng);
            let knowable = game.knowable();
            let void = knowable.public().void.for_others(knowable.current_seat());
            if void == Default::default() {
                continue;
            }
            checked += 1;
            let analyzer = knowable.analyze();
            let dist = knowable.distribution(&analyzer);
            for card in knowable.unknown_cards() {
                for &seat in &Seat::VALUES {
                    if void.is_void(seat, card.suit()) {
                        assert_eq!(dist.get(card, seat), 0);
                    }
                }
            }
            for _ in 0..10 {
                knowable.random_state(&analyzer, &mut rng);
            }
        }
    }

    #[test]
    fn test_probabilities() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut game = GameState::from_deal(&Deal::random(&mut rng));
        advance(&mut game, 13, &mut rng);
        let knowable = game.knowable();
        let probabilities = knowable.probabilities();
        for card in knowable.hand() {
            assert_eq!(probabilities[card.idx()][knowable.current_seat().idx()], 1.0);
        }
        for card in knowable.unknown_cards() {
            let total: f32 = probabilities[card.idx()].iter().sum();
            assert!((total - 1.0).abs() < 1e-5, "{} {:?}", card, probabilities[card.idx()]);
            assert_eq!(probabilities[card.idx()][knowable.current_seat().idx()], 0.0);
        }
        assert!(knowable.is_known(Card::TwoClubs));
    }
}
