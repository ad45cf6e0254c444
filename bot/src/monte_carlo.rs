use crate::{Annotator, BotError, Decision, SearchConfig, Stats};
use log::debug;
use moonshot_api::{Analyzer, Card, Cards, HeartsState, KnowableState, Strategy};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use std::{ops::Range, sync::Arc, time::Instant};

/// One worker's share of a search.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Work {
    Sample { min: usize, max: usize },
    Indices(Range<u128>),
}

/// Picks the play with the best average outcome over rollouts of sampled
/// deals, using `intuition` for every later play by every seat.
pub struct MonteCarloBot {
    intuition: Arc<dyn Strategy>,
    config: SearchConfig,
    pool: Option<ThreadPool>,
    annotator: Option<Arc<dyn Annotator>>,
}

impl MonteCarloBot {
    pub fn new(intuition: Arc<dyn Strategy>, config: SearchConfig) -> Result<Self, BotError> {
        config.validate()?;
        let pool = if config.workers == 0 {
            None
        } else {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(config.workers)
                    .thread_name(|i| format!("rollout-{}", i))
                    .build()?,
            )
        };
        Ok(Self {
            intuition,
            config,
            pool,
            annotator: None,
        })
    }

    pub fn with_annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches every legal play, or returns `None` when the play is forced.
    pub fn decide(&self, state: &KnowableState, rng: &mut dyn RngCore) -> Option<Decision> {
        let choices = state.legal_plays();
        if choices.len() == 1 {
            return None;
        }
        let seat = state.current_seat();
        let analyzer = state.analyze();
        let stats = self.run(state, &analyzer, choices, rng);
        let candidates = stats.summarize(choices, self.config.score, state.public().points[seat.idx()]);
        for candidate in &candidates {
            debug!(
                "{}: score={:.2}, moon={:.2?}, win={:.2}",
                candidate.card,
                candidate.expected_score,
                candidate.moon_probabilities,
                candidate.trick_win_probability
            );
        }
        let decision = Decision::new(seat, stats.alternates(), candidates);
        debug!(
            "{} plays {} after {} of {} alternates",
            seat,
            decision.card,
            decision.alternates,
            analyzer.possibilities()
        );
        if let Some(annotator) = &self.annotator {
            annotator.on_decision(state, &analyzer, &decision);
        }
        Some(decision)
    }

    /// Rolls out every candidate in `choices` and merges the workers' totals.
    pub fn run(
        &self,
        state: &KnowableState,
        analyzer: &Analyzer,
        choices: Cards,
        rng: &mut dyn RngCore,
    ) -> Stats {
        let mut total = Stats::new(choices.len());
        for stats in self.run_tasks(state, analyzer, choices, rng) {
            total += &stats;
        }
        total
    }

    /// Each worker's totals, one entry per worker.
    pub fn run_tasks(
        &self,
        state: &KnowableState,
        analyzer: &Analyzer,
        choices: Cards,
        rng: &mut dyn RngCore,
    ) -> Vec<Stats> {
        let tasks = self
            .plan(analyzer.possibilities())
            .into_iter()
            .map(|work| (work, rng.next_u64()))
            .collect::<Vec<_>>();
        let deadline = self
            .config
            .alternates
            .budget()
            .map(|budget| Instant::now() + budget);
        let run = |(work, seed): (Work, u64)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            self.run_task(state, analyzer, choices, work, deadline, &mut rng)
        };
        match &self.pool {
            None => tasks.into_iter().map(run).collect(),
            Some(pool) => pool.install(|| tasks.into_par_iter().map(run).collect()),
        }
    }

    fn plan(&self, possibilities: u128) -> Vec<Work> {
        let workers = self.config.workers.max(1);
        let alternates = self.config.alternates;
        if self.config.exhaustive && possibilities <= alternates.max() as u128 {
            let mut start = 0;
            split(possibilities, workers)
                .into_iter()
                .map(|n| {
                    let range = start..start + n;
                    start += n;
                    Work::Indices(range)
                })
                .collect()
        } else {
            split(alternates.min() as u128, workers)
                .into_iter()
                .zip(split(alternates.max() as u128, workers))
                .map(|(min, max)| Work::Sample {
                    min: min as usize,
                    max: max as usize,
                })
                .collect()
        }
    }

    fn run_task(
        &self,
        state: &KnowableState,
        analyzer: &Analyzer,
        choices: Cards,
        work: Work,
        deadline: Option<Instant>,
        rng: &mut dyn RngCore,
    ) -> Stats {
        let mut stats = Stats::new(choices.len());
        match work {
            Work::Indices(range) => {
                for index in range {
                    self.play_alternate(state, analyzer, index, choices, rng, &mut stats);
                }
            }
            Work::Sample { min, max } => {
                let possibilities = analyzer.possibilities();
                for done in 0..max {
                    // the budget only stops new alternates from starting
                    if done >= min && deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                        break;
                    }
                    let index = rng.gen_range(0..possibilities);
                    self.play_alternate(state, analyzer, index, choices, rng, &mut stats);
                }
            }
        }
        stats
    }

    fn play_alternate(
        &self,
        state: &KnowableState,
        analyzer: &Analyzer,
        index: u128,
        choices: Cards,
        rng: &mut dyn RngCore,
        stats: &mut Stats,
    ) {
        let seat = state.current_seat();
        let alternate = state.hypothetical_state(analyzer, index);
        let intuition = &*self.intuition;
        for (i, card) in choices.into_iter().enumerate() {
            let mut game = alternate;
            let mut winner = game.play_card(card);
            while winner.is_none() {
                winner = game.next_play(intuition, rng);
            }
            let outcome = game.play_out(intuition, rng);
            stats.record(i, seat, winner == Some(seat), &outcome);
        }
        stats.finish_alternate();
    }
}

impl Strategy for MonteCarloBot {
    fn choose_play(&self, state: &KnowableState, rng: &mut dyn RngCore) -> Card {
        match self.decide(state, rng) {
            Some(decision) => decision.card,
            None => state.legal_plays().min(),
        }
    }
}

/// Splits `total` into `parts` shares that differ by at most one, larger
/// shares first.
pub fn split(total: u128, parts: usize) -> Vec<u128> {
    let base = total / parts as u128;
    let extra = (total % parts as u128) as usize;
    (0..parts)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}
