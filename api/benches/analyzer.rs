use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use moonshot_api::{Card, Deal, GameState, HeartsState, KnowableState, Strategy};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

struct Highest;

impl Strategy for Highest {
    fn choose_play(&self, state: &KnowableState, _: &mut dyn RngCore) -> Card {
        state.legal_plays().max()
    }
}

fn knowable(plays: usize) -> KnowableState {
    let mut rng = ChaCha8Rng::seed_from_u64(plays as u64);
    let mut state = GameState::from_deal(&Deal::random(&mut rng));
    for _ in 0..plays {
        state.next_play(&Highest, &mut rng);
    }
    state.knowable()
}

pub fn deal(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    c.bench_function("deal", |b| b.iter(|| Deal::random(&mut rng)));
}

pub fn analyze(c: &mut Criterion) {
    let mut g = c.benchmark_group("analyze");
    for &plays in &[1, 21, 37] {
        g.bench_with_input(BenchmarkId::from_parameter(plays), &knowable(plays), |b, state| {
            b.iter(|| state.analyze());
        });
    }
}

pub fn actualize(c: &mut Criterion) {
    let mut g = c.benchmark_group("actualize");
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for &plays in &[1, 21, 37] {
        let state = knowable(plays);
        let analyzer = state.analyze();
        g.bench_with_input(BenchmarkId::from_parameter(plays), &state, |b, state| {
            b.iter(|| {
                let index = rng.gen_range(0..analyzer.possibilities());
                state.hypothetical_hands(&analyzer, index)
            });
        });
    }
}

pub fn distribution(c: &mut Criterion) {
    let state = knowable(29);
    let analyzer = state.analyze();
    c.bench_with_input(BenchmarkId::new("distribution", ""), &analyzer, |b, analyzer| {
        b.iter(|| analyzer.distribution());
    });
}

criterion_group!(benches, deal, analyze, actualize, distribution);
criterion_main!(benches);
