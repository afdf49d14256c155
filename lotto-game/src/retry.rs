//! Outer policy loop: re-run whole simulations until a result is acceptable.
use serde::{Deserialize, Serialize};

use crate::constants::YEARS_IN_A_LIFETIME;
use crate::draw::DrawSource;
use crate::simulation::{RunOutcome, SimulationLoop, SimulationObserver, SimulationResult};

/// Accepts results that arrive within a human lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimePolicy {
    pub max_years: u64,
}

impl LifetimePolicy {
    #[must_use]
    pub const fn new(max_years: u64) -> Self {
        Self { max_years }
    }

    #[must_use]
    pub const fn accepts(&self, result: &SimulationResult) -> bool {
        result.years_elapsed <= self.max_years
    }
}

impl Default for LifetimePolicy {
    fn default() -> Self {
        Self::new(YEARS_IN_A_LIFETIME)
    }
}

/// Safety bounds for the retry loop; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryLimits {
    pub max_attempts: Option<u32>,
    pub max_weeks_per_attempt: Option<u64>,
}

/// Why the retry loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryStop {
    /// The predicate accepted the last attempt.
    Accepted,
    /// `max_attempts` results were all rejected.
    AttemptsExhausted,
    /// The last attempt hit `max_weeks_per_attempt` without a jackpot.
    WeeksExhausted,
}

/// Every attempt made, in order, and how the loop ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryOutcome {
    pub attempts: Vec<RunOutcome>,
    pub stop: RetryStop,
}

impl RetryOutcome {
    /// The accepted result, if any.
    #[must_use]
    pub fn accepted(&self) -> Option<&SimulationResult> {
        match self.stop {
            RetryStop::Accepted => self.attempts.last().and_then(RunOutcome::result),
            RetryStop::AttemptsExhausted | RetryStop::WeeksExhausted => None,
        }
    }

    /// Number of simulations started.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }
}

/// Observer hooks for the retry loop on top of the per-week ones.
pub trait RetryObserver: SimulationObserver {
    fn on_attempt_start(&mut self, _attempt: u32) {}

    fn on_rejected(&mut self, _attempt: u32, _result: &SimulationResult) {}
}

impl RetryObserver for () {}

/// Run fresh simulations built by `new_run` until `accept` approves a result.
///
/// `new_run` receives the zero-based attempt index. An exhausted week budget
/// ends the loop since there is no result to judge.
pub fn play_until_accepted<S, F, A, O>(
    mut new_run: F,
    mut accept: A,
    observer: &mut O,
    limits: RetryLimits,
) -> RetryOutcome
where
    S: DrawSource,
    F: FnMut(u32) -> SimulationLoop<S>,
    A: FnMut(&SimulationResult) -> bool,
    O: RetryObserver,
{
    let mut attempts = Vec::new();
    let mut attempt: u32 = 0;
    loop {
        if limits.max_attempts.is_some_and(|max| attempt >= max) {
            return RetryOutcome {
                attempts,
                stop: RetryStop::AttemptsExhausted,
            };
        }

        observer.on_attempt_start(attempt);
        let mut run = new_run(attempt);
        let outcome = match limits.max_weeks_per_attempt {
            Some(max_weeks) => run.run_bounded(observer, max_weeks),
            None => RunOutcome::Won(run.run(observer)),
        };

        let stop = match &outcome {
            RunOutcome::Exhausted { weeks_elapsed } => {
                log::info!("attempt {attempt}: no jackpot within {weeks_elapsed} week(s)");
                Some(RetryStop::WeeksExhausted)
            }
            RunOutcome::Won(result) if accept(result) => Some(RetryStop::Accepted),
            RunOutcome::Won(result) => {
                log::info!(
                    "attempt {attempt}: rejected result of {} year(s)",
                    result.years_elapsed
                );
                observer.on_rejected(attempt, result);
                None
            }
        };
        attempts.push(outcome);
        if let Some(stop) = stop {
            return RetryOutcome { attempts, stop };
        }
        attempt = attempt.saturating_add(1);
    }
}
