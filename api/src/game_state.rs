use crate::{
    Card, Cards, Deal, GameOutcome, Hands, KnowableState, RulesError, Seat, Strategy, Trick,
    VoidState,
};
use log::trace;
use rand::RngCore;

/// Everything every seat can see.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PublicState {
    pub play: usize,
    pub leader: Seat,
    pub trick: Trick,
    pub points_played: u32,
    pub points: [u32; 4],
    pub point_tricks: [u32; 4],
    pub void: VoidState,
    pub unplayed: Cards,
}

impl PublicState {
    pub fn new(leader: Seat) -> Self {
        Self {
            play: 0,
            leader,
            trick: Trick::new(),
            points_played: 0,
            points: [0; 4],
            point_tricks: [0; 4],
            void: VoidState::new(),
            unplayed: Cards::ALL,
        }
    }

    pub fn current_seat(&self) -> Seat {
        self.leader.offset(self.play % 4)
    }

    pub fn is_done(&self) -> bool {
        self.play == 52
    }

    pub fn has_played_in_trick(&self, seat: Seat) -> bool {
        (seat.idx() + 4 - self.leader.idx()) % 4 < self.trick.len()
    }

    pub fn legal_plays(&self, hand: Cards) -> Cards {
        // the opening lead is always the two of clubs
        if self.play == 0 {
            debug_assert!(hand.contains(Card::TwoClubs));
            return Card::TwoClubs.into();
        }

        let mut plays = if self.trick.is_empty() {
            // until points are played, you must lead a non-point card if you have one
            if self.points_played == 0 {
                hand - Cards::POINTS
            } else {
                hand
            }
        } else {
            // you must follow suit
            hand & self.trick.suit().cards()
        };

        // if nothing is left
        if plays.is_empty() {
            // you still cannot dump points on the first trick, unless that is all you have
            if self.play < 4 {
                plays = hand - Cards::POINTS;
            }
            if plays.is_empty() {
                plays = hand;
            }
        }

        // once every point is out, nothing you play matters
        if self.points_played == 26 && !plays.is_empty() {
            return plays.min().into();
        }
        plays
    }

    /// Records `card` for the current seat, returning the winner if it
    /// completes a trick.
    fn apply(&mut self, card: Card) -> Option<Seat> {
        let seat = self.current_seat();
        if !self.trick.is_empty() && card.suit() != self.trick.suit() {
            self.void = self.void.mark_void(seat, self.trick.suit());
        }
        self.unplayed -= card;
        self.trick = self.trick.push(card);
        self.play += 1;
        if !self.trick.is_complete() {
            return None;
        }
        let winner = self.trick.winning_seat(self.leader);
        let points = self.trick.points();
        trace!("{} wins {:?} for {} points", winner, self.trick, points);
        self.points[winner.idx()] += points;
        if points > 0 {
            self.point_tricks[winner.idx()] += 1;
        }
        self.points_played += points;
        self.leader = winner;
        self.trick = Trick::new();
        Some(winner)
    }
}

/// Read access shared by complete and partial views of a game.
pub trait HeartsState {
    fn public(&self) -> &PublicState;

    /// The hand of the seat to play.
    fn current_hand(&self) -> Cards;

    fn current_seat(&self) -> Seat {
        self.public().current_seat()
    }

    fn is_done(&self) -> bool {
        self.public().is_done()
    }

    fn legal_plays(&self) -> Cards {
        self.public().legal_plays(self.current_hand())
    }

    fn points_on_table(&self) -> u32 {
        self.public().trick.points()
    }

    fn high_card_on_table(&self) -> Option<Card> {
        let trick = self.public().trick;
        if trick.is_empty() {
            None
        } else {
            Some(trick.winning_card())
        }
    }

    fn is_last_to_play(&self) -> bool {
        self.public().trick.len() == 3
    }

    /// Whether `card` beats everything on the table so far.
    fn might_take_trick(&self, card: Card) -> bool {
        match self.high_card_on_table() {
            None => true,
            Some(high) => card.suit() == high.suit() && card > high,
        }
    }

    /// Whether `card` is certain to take the trick.
    fn will_take_trick(&self, card: Card) -> bool {
        self.is_last_to_play() && self.might_take_trick(card)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct GameState {
    public: PublicState,
    hands: [Cards; 4],
}

impl GameState {
    pub fn new(hands: [Cards; 4]) -> Self {
        let all = hands.iter().copied().collect::<Cards>();
        assert_eq!(all, Cards::ALL, "{:?}", hands);
        assert_eq!(hands.iter().map(|hand| hand.len()).sum::<usize>(), 52);
        let leader = Seat::VALUES
            .iter()
            .copied()
            .find(|seat| hands[seat.idx()].contains(Card::TwoClubs))
            .unwrap_or(Seat::North);
        Self {
            public: PublicState::new(leader),
            hands,
        }
    }

    pub fn from_deal(deal: &Deal) -> Self {
        Self::new(deal.hands())
    }

    /// A complete state matching `state`, with the hidden hands taken from
    /// `hands`.
    pub fn from_knowable(state: &KnowableState, hands: &Hands) -> Self {
        let public = *state.public();
        assert!(hands.is_full(), "{:?}", hands);
        assert_eq!(hands.all_cards(), public.unplayed);
        assert_eq!(hands[public.current_seat()].cards(), state.hand());
        Self {
            public,
            hands: hands.cards(),
        }
    }

    pub fn hand(&self, seat: Seat) -> Cards {
        self.hands[seat.idx()]
    }

    /// What the seat to play can see.
    pub fn knowable(&self) -> KnowableState {
        KnowableState::new(self.public, self.current_hand())
    }

    /// Plays `card` for the current seat, returning the winner if it completes
    /// a trick. Playing an illegal card is a bug in the caller.
    pub fn play_card(&mut self, card: Card) -> Option<Seat> {
        let legal = self.legal_plays();
        assert!(
            legal.contains(card),
            "{} cannot play {}, legal plays are {}",
            self.current_seat(),
            card,
            legal
        );
        let seat = self.current_seat();
        self.hands[seat.idx()] -= card;
        self.public.apply(card)
    }

    pub fn try_play(&mut self, card: Card) -> Result<Option<Seat>, RulesError> {
        if self.is_done() {
            return Err(RulesError::GameComplete);
        }
        let seat = self.current_seat();
        if !self.hand(seat).contains(card) {
            return Err(RulesError::NotYourCard(seat, card));
        }
        let legal = self.legal_plays();
        if !legal.contains(card) {
            return Err(RulesError::IllegalPlay(card, legal));
        }
        Ok(self.play_card(card))
    }

    /// Makes one play, asking `strategy` only when there is a real choice.
    pub fn next_play(&mut self, strategy: &dyn Strategy, rng: &mut dyn RngCore) -> Option<Seat> {
        let legal = self.legal_plays();
        let card = if legal.len() == 1 {
            legal.min()
        } else {
            strategy.choose_play(&self.knowable(), rng)
        };
        self.play_card(card)
    }

    /// Plays to the end with one strategy for every seat.
    pub fn play_out(&mut self, strategy: &dyn Strategy, rng: &mut dyn RngCore) -> GameOutcome {
        while !self.is_done() {
            self.next_play(strategy, rng);
        }
        self.outcome()
    }

    pub fn play_game(
        &mut self,
        strategies: &[&dyn Strategy; 4],
        rng: &mut dyn RngCore,
    ) -> GameOutcome {
        while !self.is_done() {
            let strategy = strategies[self.current_seat().idx()];
            self.next_play(strategy, rng);
        }
        self.outcome()
    }

    pub fn outcome(&self) -> GameOutcome {
        assert!(self.is_done(), "the game is still in progress");
        GameOutcome::new(self.public.points, self.public.point_tricks)
    }
}

impl HeartsState for GameState {
    fn public(&self) -> &PublicState {
        &self.public
    }

    fn current_hand(&self) -> Cards {
        self.hands[self.public.current_seat().idx()]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{possible_deals, Suit};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    macro_rules! c {
        ($($cards:tt)*) => {
            stringify!($($cards)*).parse::<Cards>().unwrap()
        };
    }

    struct Lowest;

    impl Strategy for Lowest {
        fn choose_play(&self, state: &KnowableState, _: &mut dyn RngCore) -> Card {
            state.legal_plays().min()
        }
    }

    struct Random;

    impl Strategy for Random {
        fn choose_play(&self, state: &KnowableState, rng: &mut dyn RngCore) -> Card {
            let legal = state.legal_plays();
            let n = rng.gen_range(0..legal.len());
            legal.into_iter().nth(n).unwrap()
        }
    }

    #[test]
    fn test_opening_play() {
        let game = GameState::from_deal(&Deal::new(0));
        assert_eq!(game.current_seat(), Seat::North);
        assert_eq!(game.legal_plays(), Cards::from(Card::TwoClubs));

        let game = GameState::from_deal(&Deal::new(possible_deals() - 1));
        assert_eq!(game.current_seat(), Seat::West);
        assert_eq!(game.legal_plays(), Cards::from(Card::TwoClubs));
    }

    #[test]
    fn test_follow_suit() {
        let mut game = GameState::new([
            c!(AKQJT98765432C),
            c!(AKQJT98765432D),
            c!(AKQJT98765432S),
            c!(AKQJT98765432H),
        ]);
        assert_eq!(game.play_card(Card::TwoClubs), None);
        // void in clubs on the first trick, points are not allowed
        assert_eq!(game.legal_plays(), c!(AKQJT98765432D));
        assert_eq!(
            game.try_play(Card::TwoHearts),
            Err(RulesError::NotYourCard(Seat::East, Card::TwoHearts))
        );
        game.play_card(Card::AceDiamonds);
        assert!(game.public().void.is_void(Seat::East, Suit::Clubs));
        assert_eq!(game.legal_plays(), c!(AKJT98765432S));
        game.play_card(Card::KingSpades);
        // nothing but points
        assert_eq!(game.legal_plays(), c!(AKQJT98765432H));
        assert_eq!(game.play_card(Card::TwoHearts), Some(Seat::North));
        assert_eq!(game.public().points, [1, 0, 0, 0]);
        assert_eq!(game.public().point_tricks, [1, 0, 0, 0]);
        assert_eq!(game.current_seat(), Seat::North);
        // points are out, anything may be led
        assert_eq!(game.legal_plays(), c!(AKQJT9876543C));
    }

    #[test]
    fn test_second_trick() {
        let mut game = GameState::new([
            c!(AKQJT98765432C),
            c!(AKQJT98765432D),
            c!(AKQJT98765432S),
            c!(AKQJT98765432H),
        ]);
        for &card in &[Card::TwoClubs, Card::TwoDiamonds, Card::TwoSpades, Card::TwoHearts] {
            game.play_card(card);
        }
        assert_eq!(game.current_seat(), Seat::North);
        game.play_card(Card::ThreeClubs);
        // void after the first trick, anything goes
        assert_eq!(game.legal_plays(), c!(AKQJT9876543D));
        game.play_card(Card::ThreeDiamonds);
        game.play_card(Card::QueenSpades);
        assert_eq!(game.play_card(Card::ThreeHearts), Some(Seat::North));
        assert_eq!(game.public().points_played, 15);
        assert_eq!(game.public().points, [15, 0, 0, 0]);
        assert_eq!(game.public().point_tricks, [2, 0, 0, 0]);
    }

    #[test]
    fn test_lead_restricted_before_points() {
        let mut game = GameState::new([
            c!(QJT98765432H 32C),
            c!(AKH AKQJT987654C),
            c!(AKQJT98765432D),
            c!(AKQJT98765432S),
        ]);
        game.play_card(Card::TwoClubs);
        game.play_card(Card::AceClubs);
        assert_eq!(game.legal_plays(), c!(AKQJT98765432D));
        game.play_card(Card::TwoDiamonds);
        // the queen is a point card
        assert_eq!(game.legal_plays(), c!(AKJT98765432S));
        assert_eq!(game.play_card(Card::TwoSpades), Some(Seat::East));
        assert_eq!(game.public().points_played, 0);
        assert_eq!(game.legal_plays(), c!(KQJT987654C));
        assert_eq!(
            game.try_play(Card::AceHearts),
            Err(RulesError::IllegalPlay(Card::AceHearts, c!(KQJT987654C)))
        );
    }

    #[test]
    fn test_first_trick_only_points() {
        let mut game = GameState::from_deal(&Deal::new(0));
        game.play_card(Card::TwoClubs);
        game.play_card(Card::TwoDiamonds);
        game.play_card(Card::TwoSpades);
        // West holds only hearts, which are allowed when nothing else is
        assert_eq!(game.legal_plays(), Cards::HEARTS);
        game.play_card(Card::AceHearts);
        assert_eq!(game.public().points, [1, 0, 0, 0]);
    }

    #[test]
    fn test_illegal_play() {
        let mut game = GameState::from_deal(&Deal::new(0));
        assert_eq!(
            game.try_play(Card::ThreeClubs),
            Err(RulesError::IllegalPlay(Card::ThreeClubs, Card::TwoClubs.into()))
        );
    }

    #[test]
    #[should_panic]
    fn test_play_card_illegal() {
        let mut game = GameState::from_deal(&Deal::new(0));
        game.play_card(Card::ThreeClubs);
    }

    #[test]
    fn test_all_points_played() {
        let mut public = PublicState::new(Seat::North);
        public.play = 40;
        public.points_played = 26;
        assert_eq!(public.legal_plays(c!(AK2S 3D)), Cards::from(Card::ThreeDiamonds));
    }

    #[test]
    fn test_play_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let deal = Deal::random(&mut rng);
            let mut game = GameState::from_deal(&deal);
            let strategies: [&dyn Strategy; 4] = [&Lowest, &Random, &Lowest, &Random];
            let outcome = game.play_game(&strategies, &mut rng);
            assert!(game.is_done());
            assert_eq!(game.public().unplayed, Cards::NONE);
            assert_eq!(game.try_play(Card::TwoClubs), Err(RulesError::GameComplete));
            let total: u32 = Seat::VALUES.iter().map(|&s| outcome.points_taken(s)).sum();
            assert_eq!(total, 26);
        }
    }

    #[test]
    fn test_voids_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let deal = Deal::random(&mut rng);
        let mut game = GameState::from_deal(&deal);
        while !game.is_done() {
            game.next_play(&Random, &mut rng);
            let void = game.public().void;
            for &seat in &Seat::VALUES {
                for &suit in &Suit::VALUES {
                    if void.is_void(seat, suit) {
                        assert!(!game.hand(seat).contains_any(suit.cards()));
                    }
                }
            }
        }
    }
}
