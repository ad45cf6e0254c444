use log::{info, LevelFilter};
use moonshot_api::{Deal, GameState, HeartsState, Seat, Strategy};
use moonshot_bot::{Bot, BotError, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::env;

fn main() -> Result<(), BotError> {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .filter_module("moonshot_bot", LevelFilter::Debug)
        .try_init();
    let config = match env::args().nth(1) {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };
    let seed = env::args()
        .nth(2)
        .and_then(|seed| seed.parse().ok())
        .unwrap_or(0);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let search = Bot::monte_carlo(config)?;
    let duck = Bot::Duck(moonshot_bot::DuckBot::new());
    let strategies: [&dyn Strategy; 4] = [&search, &duck, &duck, &duck];

    let deal = Deal::random(&mut rng);
    info!("deal {}", deal.index());
    for &seat in &Seat::VALUES {
        println!("{:>5}: {}", seat, deal.hand(seat));
    }
    let mut game = GameState::from_deal(&deal);
    while !game.is_done() {
        let seat = game.current_seat();
        let card = strategies[seat.idx()].choose_play(&game.knowable(), &mut rng);
        if let Some(winner) = game.play_card(card) {
            println!("{:>5} plays {}, {} wins the trick", seat, card, winner);
        } else {
            println!("{:>5} plays {}", seat, card);
        }
    }
    let outcome = game.outcome();
    for &seat in &Seat::VALUES {
        println!(
            "{:>5}: {:>2} points, score {:>6.1}",
            seat,
            outcome.points_taken(seat),
            outcome.standard_score(seat)
        );
    }
    Ok(())
}
