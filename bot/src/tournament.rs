use log::{debug, info};
use moonshot_api::{Deal, GameState, Seat, Strategy};
use rand::RngCore;
use std::{fmt, sync::Arc};

/// The six ways to seat two champions and two opponents, `true` marking a
/// champion. Each strategy sits in every seat three times.
pub const SEATINGS: [[bool; 4]; 6] = [
    [true, true, false, false],
    [true, false, true, false],
    [true, false, false, true],
    [false, false, true, true],
    [false, true, false, true],
    [false, true, true, false],
];

const CHAMPION: usize = 0;
const OPPONENT: usize = 1;

/// Standard scores from one match, by strategy and by seat.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MatchScores {
    /// Champion total, then opponent total.
    pub players: [f32; 2],
    pub seats: [f32; 4],
    /// Per strategy, per seat.
    pub cross: [[f32; 4]; 2],
    pub games: usize,
    pub moons: usize,
}

impl MatchScores {
    fn accumulate(&mut self, seating: &[bool; 4], scores: [f32; 4], moon: bool) {
        for &seat in &Seat::VALUES {
            let player = if seating[seat.idx()] { CHAMPION } else { OPPONENT };
            let score = scores[seat.idx()];
            self.players[player] += score;
            self.seats[seat.idx()] += score;
            self.cross[player][seat.idx()] += score;
        }
        self.games += 1;
        if moon {
            self.moons += 1;
        }
    }
}

impl fmt::Display for MatchScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let games = self.games.max(1) as f32;
        for (name, player) in [("c", CHAMPION), ("o", OPPONENT)].iter() {
            write!(f, "{} ", name)?;
            for score in &self.cross[*player] {
                write!(f, "{:5.1} ", score * 2.0 / games)?;
            }
            writeln!(f, "| {:5.1}", self.players[*player] / games)?;
        }
        for score in &self.seats {
            write!(f, "{:5.1} ", score / games)?;
        }
        Ok(())
    }
}

/// Plays a champion strategy against an opponent strategy. Every deal is
/// played once per seating so neither side profits from the cards alone.
pub struct Tournament {
    champion: Arc<dyn Strategy>,
    opponent: Arc<dyn Strategy>,
}

impl Tournament {
    pub fn new(champion: Arc<dyn Strategy>, opponent: Arc<dyn Strategy>) -> Self {
        Self { champion, opponent }
    }

    /// Plays `deal_index` under all six seatings.
    pub fn run_match(&self, deal_index: u128, rng: &mut dyn RngCore) -> MatchScores {
        let deal = Deal::new(deal_index);
        debug!("{:?}", deal);
        let mut scores = MatchScores::default();
        for seating in &SEATINGS {
            let strategies: [&dyn Strategy; 4] = [
                self.seat(seating[0]),
                self.seat(seating[1]),
                self.seat(seating[2]),
                self.seat(seating[3]),
            ];
            let outcome = GameState::from_deal(&deal).play_game(&strategies, rng);
            let mut game = [0.0; 4];
            for &seat in &Seat::VALUES {
                game[seat.idx()] = outcome.standard_score(seat);
            }
            debug!(
                "{:?} scored {:?}{}",
                seating,
                game,
                if outcome.shot_the_moon() { ", shot the moon" } else { "" }
            );
            scores.accumulate(seating, game, outcome.shot_the_moon());
        }
        debug!("deal {:x}\n{}", deal_index, scores);
        scores
    }

    /// Plays a match on every deal and returns the champion's mean score
    /// per game. Lower is better.
    pub fn run(&self, deals: &[u128], rng: &mut dyn RngCore) -> f32 {
        let mut players = [0.0; 2];
        let mut games = 0;
        for &deal in deals {
            let scores = self.run_match(deal, rng);
            players[CHAMPION] += scores.players[CHAMPION];
            players[OPPONENT] += scores.players[OPPONENT];
            games += scores.games;
        }
        if games == 0 {
            return 0.0;
        }
        let champion = players[CHAMPION] / games as f32;
        let opponent = players[OPPONENT] / games as f32;
        info!(
            "champion {:.2}, opponent {:.2} over {} games",
            champion, opponent, games
        );
        champion
    }

    fn seat(&self, champion: bool) -> &dyn Strategy {
        if champion {
            &*self.champion
        } else {
            &*self.opponent
        }
    }
}
