//! Unbiased weekly draws: sampling without replacement over `[1, max_number]`.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::config::GameConfig;

/// Numbers kept inline before spilling to the heap.
pub type NumberSet = SmallVec<[u32; 8]>;

/// Winning numbers for one simulated week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draw(NumberSet);

impl Draw {
    /// Wrap numbers produced by a draw source.
    #[must_use]
    pub fn from_numbers(numbers: impl IntoIterator<Item = u32>) -> Self {
        Self(numbers.into_iter().collect())
    }

    #[must_use]
    pub fn numbers(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy with the numbers in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut numbers = self.0.clone();
        numbers.sort_unstable();
        Self(numbers)
    }
}

/// Sampling parameters that make unbiased draws impossible.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("cannot draw {ticket_size} unique numbers from 1-{max_number}")]
    Precondition { max_number: u32, ticket_size: usize },
}

/// Anything that can produce the next week's draw.
pub trait DrawSource {
    /// Produce `config.ticket_size()` distinct numbers in `[1, config.max_number()]`.
    fn next_draw(&mut self, config: &GameConfig) -> Draw;
}

impl<S: DrawSource + ?Sized> DrawSource for &mut S {
    fn next_draw(&mut self, config: &GameConfig) -> Draw {
        (**self).next_draw(config)
    }
}

impl<S: DrawSource + ?Sized> DrawSource for Box<S> {
    fn next_draw(&mut self, config: &GameConfig) -> Draw {
        (**self).next_draw(config)
    }
}

/// Draw `ticket_size` unique numbers from `[1, max_number]` in one call.
///
/// # Errors
///
/// Returns [`DrawError::Precondition`] unless `1 <= ticket_size <= max_number`.
pub fn draw<R: Rng>(
    rng: &mut R,
    max_number: u32,
    ticket_size: usize,
) -> Result<Draw, DrawError> {
    check_shape(max_number, ticket_size)?;
    let mut pool = Vec::new();
    Ok(sample_into(rng, &mut pool, max_number, ticket_size))
}

fn check_shape(max_number: u32, ticket_size: usize) -> Result<(), DrawError> {
    let fits = usize::try_from(max_number).is_ok_and(|max| ticket_size <= max);
    if ticket_size == 0 || !fits {
        return Err(DrawError::Precondition {
            max_number,
            ticket_size,
        });
    }
    Ok(())
}

// Partial Fisher-Yates: each pick comes from the unconsumed suffix, then is
// swapped into the consumed prefix.
fn sample_into<R: Rng>(
    rng: &mut R,
    pool: &mut Vec<u32>,
    max_number: u32,
    ticket_size: usize,
) -> Draw {
    pool.clear();
    pool.extend(1..=max_number);
    let mut picked = NumberSet::with_capacity(ticket_size);
    for i in 0..ticket_size {
        let j = rng.gen_range(i..pool.len());
        picked.push(pool[j]);
        pool.swap(i, j);
    }
    Draw(picked)
}

/// RNG-backed draw source reusing its number pool between weeks.
#[derive(Debug, Clone)]
pub struct RandomDraw<R = SmallRng> {
    rng: R,
    pool: Vec<u32>,
    draws: u64,
}

impl<R: Rng> RandomDraw<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            pool: Vec::new(),
            draws: 0,
        }
    }

    /// Number of draws produced so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Precondition`] unless `1 <= ticket_size <= max_number`.
    pub fn draw(&mut self, max_number: u32, ticket_size: usize) -> Result<Draw, DrawError> {
        check_shape(max_number, ticket_size)?;
        self.draws = self.draws.saturating_add(1);
        Ok(sample_into(
            &mut self.rng,
            &mut self.pool,
            max_number,
            ticket_size,
        ))
    }
}

impl RandomDraw<SmallRng> {
    /// Reproducible source for a given seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> DrawSource for RandomDraw<R> {
    fn next_draw(&mut self, config: &GameConfig) -> Draw {
        // GameConfig guarantees 1 <= ticket_size <= max_number.
        self.draws = self.draws.saturating_add(1);
        sample_into(
            &mut self.rng,
            &mut self.pool,
            config.max_number(),
            config.ticket_size(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeSet, HashMap};

    #[test]
    fn draws_are_unique_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        for (max_number, ticket_size) in [(1, 1), (5, 2), (39, 7), (48, 6), (50, 5), (50, 50)] {
            for _ in 0..200 {
                let drawn = draw(&mut rng, max_number, ticket_size).unwrap();
                assert_eq!(drawn.len(), ticket_size);
                let unique: BTreeSet<u32> = drawn.numbers().iter().copied().collect();
                assert_eq!(unique.len(), ticket_size, "duplicate in {drawn:?}");
                assert!(unique.iter().all(|n| (1..=max_number).contains(n)));
            }
        }
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let mut source = RandomDraw::from_seed(11);
        let drawn = source.draw(12, 12).unwrap().sorted();
        assert_eq!(drawn.numbers(), (1..=12).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn precondition_violations_fail_fast() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            draw(&mut rng, 5, 6),
            Err(DrawError::Precondition {
                max_number: 5,
                ticket_size: 6
            })
        );
        assert!(draw(&mut rng, 5, 0).is_err());
        assert!(draw(&mut rng, 0, 1).is_err());

        let mut source = RandomDraw::from_seed(1);
        assert!(source.draw(3, 4).is_err());
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn pairs_are_uniform_over_five_numbers() {
        const TRIALS: u32 = 50_000;
        // Chi-squared critical value for 9 degrees of freedom at p = 0.001.
        const CRITICAL: f64 = 27.877;

        let mut source = RandomDraw::new(ChaCha8Rng::seed_from_u64(0xC0FFEE));
        let config = GameConfig::new("Pairs", 5, 2).unwrap();
        let mut counts: HashMap<(u32, u32), u32> = HashMap::new();
        for _ in 0..TRIALS {
            let pair = source.next_draw(&config).sorted();
            let [low, high] = pair.numbers() else {
                panic!("expected a pair, got {pair:?}");
            };
            *counts.entry((*low, *high)).or_default() += 1;
        }

        assert_eq!(counts.len(), 10, "every pair should appear");
        let expected = f64::from(TRIALS) / 10.0;
        let chi_squared: f64 = counts
            .values()
            .map(|&observed| {
                let delta = f64::from(observed) - expected;
                delta * delta / expected
            })
            .sum();
        assert!(
            chi_squared < CRITICAL,
            "pair frequencies look biased: chi^2 = {chi_squared:.2}, counts {counts:?}"
        );
        assert_eq!(source.draws(), u64::from(TRIALS));
    }

    #[test]
    fn entropy_source_draws_valid_sets() {
        let config = GameConfig::vikinglotto();
        let mut source = RandomDraw::from_entropy();
        let drawn = source.next_draw(&config).sorted();
        assert_eq!(drawn.len(), 6);
        assert!(drawn.numbers().windows(2).all(|pair| pair[0] < pair[1]));
        assert!(drawn.numbers().iter().all(|&n| config.contains(n)));
    }

    #[test]
    fn seeded_sources_repeat() {
        let config = GameConfig::eurojackpot();
        let mut a = RandomDraw::from_seed(99);
        let mut b = RandomDraw::from_seed(99);
        for _ in 0..20 {
            assert_eq!(a.next_draw(&config), b.next_draw(&config));
        }
    }
}
