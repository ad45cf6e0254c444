mod analyzer;
mod card;
mod cards;
mod combinatorics;
mod deal;
mod distribution;
mod error;
mod game_state;
mod hand;
mod knowable_state;
mod outcome;
mod rank;
mod seat;
mod strategy;
mod suit;
mod trick;
mod void;

pub use analyzer::*;
pub use card::*;
pub use cards::*;
pub use combinatorics::*;
pub use deal::*;
pub use distribution::*;
pub use error::*;
pub use game_state::*;
pub use hand::*;
pub use knowable_state::*;
pub use outcome::*;
pub use rank::*;
pub use seat::*;
pub use strategy::*;
pub use suit::*;
pub use trick::*;
pub use void::*;
