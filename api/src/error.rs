use crate::{Card, Cards, Seat};
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum RulesError {
    #[error("the game is already complete")]
    GameComplete,
    #[error("{0} is not a legal play, legal plays are {1}")]
    IllegalPlay(Card, Cards),
    #[error("{0} does not hold {1}")]
    NotYourCard(Seat, Card),
}
