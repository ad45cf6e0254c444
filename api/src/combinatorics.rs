use crate::{Cards, Hands, Seat};

/// Binomial coefficient `n` choose `k`.
pub fn combinations(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// Number of distinct ways to deal a full deck into four 13 card hands.
pub fn possible_deals() -> u128 {
    combinations(52, 13) * combinations(39, 13) * combinations(26, 13)
}

/// Number of ways to distribute `cards` so every hand reaches its capacity.
pub fn possible_arrangements(cards: Cards, hands: &Hands) -> u128 {
    assert_eq!(
        cards.len(),
        hands.total_available(),
        "{} do not fill {:?}",
        cards,
        hands
    );
    let mut remaining = cards.len();
    let mut total = 1;
    for &seat in &Seat::VALUES {
        let available = hands[seat].available();
        total *= combinations(remaining, available);
        remaining -= available;
    }
    total
}
