/*!
 * Random word sampling.
 *
 * Draws a fixed-size subset of the candidate pool uniformly at random and
 * without replacement, using an in-place Fisher–Yates shuffle over a copy.
 */

use rand::Rng;

/// Default number of words drawn per refresh
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Sample `n` words from `pool` using the thread-local generator.
///
/// Returns a permutation of the whole pool when it holds `n` words or fewer.
pub fn sample(pool: &[String], n: usize) -> Vec<String> {
    sample_with_rng(pool, n, &mut rand::rng())
}

/// Sample `n` words from `pool` using the given generator
pub fn sample_with_rng<R: Rng + ?Sized>(pool: &[String], n: usize, rng: &mut R) -> Vec<String> {
    let mut shuffled = pool.to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }

    shuffled.truncate(n);
    shuffled
}
