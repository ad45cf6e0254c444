use crate::Seat;
use serde::{Deserialize, Serialize};

/// Points swung between the seat that stops a moon attempt and the seat that
/// was stopped, in the modified score.
pub const STOP_THE_MOON_PENALTY: f32 = 6.0;

const TOTAL_POINTS: u32 = 26;

/// Moon results that involve the seat whose outcome is being scored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonEvent {
    CurrentShot,
    OtherShot,
    CurrentStopped,
    OtherStopped,
}

impl MoonEvent {
    pub const VALUES: [MoonEvent; 4] = [
        MoonEvent::CurrentShot,
        MoonEvent::OtherShot,
        MoonEvent::CurrentStopped,
        MoonEvent::OtherStopped,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GameOutcome {
    points: [u32; 4],
    point_tricks: [u32; 4],
}

impl GameOutcome {
    pub fn new(points: [u32; 4], point_tricks: [u32; 4]) -> Self {
        assert_eq!(points.iter().sum::<u32>(), TOTAL_POINTS, "{:?}", points);
        for seat in 0..4 {
            assert_eq!(
                points[seat] == 0,
                point_tricks[seat] == 0,
                "{:?} {:?}",
                points,
                point_tricks
            );
        }
        Self {
            points,
            point_tricks,
        }
    }

    pub fn points_taken(&self, seat: Seat) -> u32 {
        self.points[seat.idx()]
    }

    pub fn point_tricks(&self, seat: Seat) -> u32 {
        self.point_tricks[seat.idx()]
    }

    /// The seat that took every point, when the other three took no point tricks.
    pub fn shooter(&self) -> Option<Seat> {
        let takers = self.takers();
        if takers.len() != 1 {
            return None;
        }
        let shooter = takers[0];
        assert_eq!(self.points_taken(shooter), TOTAL_POINTS);
        Some(shooter)
    }

    pub fn shot_the_moon(&self) -> bool {
        self.shooter().is_some()
    }

    /// The seat that took a single heart-only trick while one other seat took
    /// every other point, paired with that other seat.
    pub fn stopper(&self) -> Option<(Seat, Seat)> {
        let takers = self.takers();
        if takers.len() != 2 {
            return None;
        }
        let stops = |seat: Seat| self.point_tricks(seat) == 1 && self.points_taken(seat) < 13;
        if stops(takers[0]) {
            Some((takers[0], takers[1]))
        } else if stops(takers[1]) {
            Some((takers[1], takers[0]))
        } else {
            None
        }
    }

    pub fn moon_event(&self, current: Seat) -> Option<MoonEvent> {
        if let Some(shooter) = self.shooter() {
            return Some(if shooter == current {
                MoonEvent::CurrentShot
            } else {
                MoonEvent::OtherShot
            });
        }
        match self.stopper() {
            Some((stopper, _)) if stopper == current => Some(MoonEvent::CurrentStopped),
            Some((_, stopped)) if stopped == current => Some(MoonEvent::OtherStopped),
            _ => None,
        }
    }

    /// Raw points taken, ignoring the moon.
    pub fn boring_score(&self, seat: Seat) -> f32 {
        self.points_taken(seat) as f32
    }

    /// Zero mean score where shooting the moon gives everyone else the points.
    pub fn standard_score(&self, seat: Seat) -> f32 {
        match self.shooter() {
            None => self.points_taken(seat) as f32 - 6.5,
            Some(shooter) if shooter == seat => -19.5,
            Some(_) => 6.5,
        }
    }

    /// Standard score that also rewards stopping the moon and penalizes being
    /// stopped.
    pub fn modified_score(&self, seat: Seat) -> f32 {
        let score = self.standard_score(seat);
        match self.stopper() {
            Some((stopper, _)) if stopper == seat => score - STOP_THE_MOON_PENALTY,
            Some((_, stopped)) if stopped == seat => score + STOP_THE_MOON_PENALTY,
            _ => score,
        }
    }

    fn takers(&self) -> Vec<Seat> {
        Seat::VALUES
            .iter()
            .copied()
            .filter(|&seat| self.point_tricks(seat) > 0)
            .collect()
    }
}
