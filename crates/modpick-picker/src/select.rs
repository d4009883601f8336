//! Bounded random sampling of unique members.

use rand::Rng;

use modpick_core::UserId;

/// Draw up to `count` unique members from `pool`, uniformly at random.
///
/// Returns `None` for an empty pool (nothing to pick). Otherwise the result
/// holds exactly `min(count, pool.len())` pairwise-distinct members of the
/// pool: the draw loop's only exits are "enough selected" and "pool
/// exhausted", so a pool smaller than `count` degrades to the whole pool
/// instead of looping forever.
pub fn pick_unique<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[UserId],
    count: usize,
) -> Option<Vec<UserId>> {
    if pool.is_empty() {
        return None;
    }

    let mut selected: Vec<UserId> = Vec::with_capacity(count.min(pool.len()));
    while selected.len() < count && selected.len() != pool.len() {
        let candidate = &pool[rng.random_range(0..pool.len())];
        if !selected.contains(candidate) {
            selected.push(candidate.clone());
        }
    }
    Some(selected)
}
