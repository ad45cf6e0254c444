use log::LevelFilter;
use moonshot_api::possible_deals;
use moonshot_bot::{Bot, BotError, DuckBot, SearchConfig, Tournament};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{env, sync::Arc};

fn main() -> Result<(), BotError> {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .filter_module("moonshot_bot::tournament", LevelFilter::Debug)
        .try_init();
    let matches = env::args()
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or(4);
    let config = match env::args().nth(2) {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::fixed(50),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let deals = (0..matches)
        .map(|_| rng.gen_range(0..possible_deals()))
        .collect::<Vec<u128>>();

    let tournament = Tournament::new(
        Arc::new(Bot::monte_carlo(config)?),
        Arc::new(DuckBot::new()),
    );
    let champion = tournament.run(&deals, &mut rng);
    println!("champion mean score {:.2}", champion);
    Ok(())
}
