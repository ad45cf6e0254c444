use crate::ScoreType;
use moonshot_api::{Card, Cards, GameOutcome, MoonEvent, Seat, STOP_THE_MOON_PENALTY};
use serde::Serialize;
use std::ops::AddAssign;

/// Offsets applied to the chance of the current seat or another seat shooting.
const CURRENT_SHOT_OFFSET: f32 = -39.5;
const OTHER_SHOT_OFFSET: f32 = 13.0;

/// Integer totals for one candidate play, summed over alternates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CandidateStats {
    pub points: u64,
    pub trick_wins: u64,
    pub moon_counts: [u64; 4],
}

impl AddAssign<&CandidateStats> for CandidateStats {
    fn add_assign(&mut self, rhs: &CandidateStats) {
        self.points += rhs.points;
        self.trick_wins += rhs.trick_wins;
        for (count, other) in self.moon_counts.iter_mut().zip(rhs.moon_counts.iter()) {
            *count += other;
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    alternates: u64,
    candidates: Vec<CandidateStats>,
}

impl Stats {
    pub fn new(candidates: usize) -> Self {
        Self {
            alternates: 0,
            candidates: vec![CandidateStats::default(); candidates],
        }
    }

    pub fn alternates(&self) -> u64 {
        self.alternates
    }

    pub fn candidate(&self, i: usize) -> &CandidateStats {
        &self.candidates[i]
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn record(&mut self, i: usize, seat: Seat, won_trick: bool, outcome: &GameOutcome) {
        let candidate = &mut self.candidates[i];
        candidate.points += outcome.points_taken(seat) as u64;
        if won_trick {
            candidate.trick_wins += 1;
        }
        if let Some(event) = outcome.moon_event(seat) {
            candidate.moon_counts[event.idx()] += 1;
        }
    }

    pub fn finish_alternate(&mut self) {
        self.alternates += 1;
    }

    /// Per candidate expectations, in the order the candidates were played.
    pub fn summarize(&self, choices: Cards, score: ScoreType, offset: u32) -> Vec<CandidateSummary> {
        assert_eq!(choices.len(), self.candidates.len());
        assert!(self.alternates > 0, "no alternates were played");
        let scale = 1.0 / self.alternates as f32;
        choices
            .into_iter()
            .zip(self.candidates.iter())
            .map(|(card, stats)| {
                let p = |event: MoonEvent| stats.moon_counts[event.idx()] as f32 * scale;
                let current_shot = p(MoonEvent::CurrentShot);
                let other_shot = p(MoonEvent::OtherShot);
                let mean = stats.points as f32 * scale;
                let mut expected_score =
                    mean - 6.5 + CURRENT_SHOT_OFFSET * current_shot + OTHER_SHOT_OFFSET * other_shot;
                if score == ScoreType::Modified {
                    expected_score += STOP_THE_MOON_PENALTY
                        * (p(MoonEvent::OtherStopped) - p(MoonEvent::CurrentStopped));
                }
                CandidateSummary {
                    card,
                    expected_score,
                    expected_points: (mean - offset as f32) / 26.0,
                    moon_probabilities: [
                        current_shot,
                        other_shot,
                        1.0 - current_shot - other_shot,
                    ],
                    trick_win_probability: stats.trick_wins as f32 * scale,
                }
            })
            .collect()
    }
}

impl AddAssign<&Stats> for Stats {
    fn add_assign(&mut self, rhs: &Stats) {
        assert_eq!(self.candidates.len(), rhs.candidates.len());
        self.alternates += rhs.alternates;
        for (candidate, other) in self.candidates.iter_mut().zip(rhs.candidates.iter()) {
            *candidate += other;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub card: Card,
    /// Lower is better.
    pub expected_score: f32,
    /// Points still to come, relative to what the seat already has, over 26.
    pub expected_points: f32,
    /// Current seat shoots, another seat shoots, nobody shoots.
    pub moon_probabilities: [f32; 3],
    pub trick_win_probability: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Decision {
    pub seat: Seat,
    pub card: Card,
    pub alternates: u64,
    pub candidates: Vec<CandidateSummary>,
}

impl Decision {
    /// Picks the lowest expected score, the earliest candidate on ties.
    pub fn new(seat: Seat, alternates: u64, candidates: Vec<CandidateSummary>) -> Self {
        let mut best = 0;
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.expected_score < candidates[best].expected_score {
                best = i;
            }
        }
        Self {
            seat,
            card: candidates[best].card,
            alternates,
            candidates,
        }
    }
}
