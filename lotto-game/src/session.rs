use serde::Serialize;

use crate::config::GameConfig;
use crate::retry::{LifetimePolicy, RetryLimits, RetryObserver, RetryOutcome, play_until_accepted};
use crate::seed::attempt_draws;
use crate::simulation::SimulationLoop;
use crate::ticket::{Ticket, ValidationError};

/// High-level session binding a game, a ticket and a seed to the retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JackpotSession {
    config: GameConfig,
    ticket: Ticket,
    seed: u64,
    policy: LifetimePolicy,
    limits: RetryLimits,
}

impl JackpotSession {
    /// Construct a session with the default lifetime policy and no bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `ticket` does not fit `config`.
    pub fn new(config: GameConfig, ticket: Ticket, seed: u64) -> Result<Self, ValidationError> {
        ticket.check_fits(&config)?;
        Ok(Self {
            config,
            ticket,
            seed,
            policy: LifetimePolicy::default(),
            limits: RetryLimits::default(),
        })
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: LifetimePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_limits(mut self, limits: RetryLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn policy(&self) -> LifetimePolicy {
        self.policy
    }

    #[must_use]
    pub const fn limits(&self) -> RetryLimits {
        self.limits
    }

    /// Play attempts until one lands within the lifetime policy.
    ///
    /// Each attempt draws from its own stream derived from the session seed,
    /// so the same seed replays the same session.
    pub fn play(&self, observer: &mut impl RetryObserver) -> RetryOutcome {
        let policy = self.policy;
        play_until_accepted(
            |attempt| {
                SimulationLoop::assemble(
                    self.config.clone(),
                    self.ticket.clone(),
                    attempt_draws(self.seed, attempt),
                )
            },
            |result| policy.accepts(result),
            observer,
            self.limits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryStop;

    fn tiny_session(seed: u64) -> JackpotSession {
        let config = GameConfig::new("Tiny", 6, 2).unwrap();
        let ticket = Ticket::new([2, 5], &config).unwrap();
        JackpotSession::new(config, ticket, seed).unwrap()
    }

    #[test]
    fn mismatched_ticket_is_rejected_up_front() {
        let wide = GameConfig::new("Wide", 9, 2).unwrap();
        let ticket = Ticket::new([4, 8], &wide).unwrap();
        let narrow = GameConfig::new("Narrow", 6, 2).unwrap();
        assert_eq!(
            JackpotSession::new(narrow, ticket, 1),
            Err(ValidationError::OutOfRange {
                value: 8,
                max_number: 6
            })
        );
    }

    #[test]
    fn same_seed_replays_the_session() {
        let first = tiny_session(77).play(&mut ());
        let second = tiny_session(77).play(&mut ());
        assert_eq!(first, second);
        assert_eq!(first.stop, RetryStop::Accepted);
    }

    #[test]
    fn week_budget_is_forwarded_to_each_attempt() {
        let session = tiny_session(5).with_limits(RetryLimits {
            max_attempts: None,
            max_weeks_per_attempt: Some(1),
        });
        let outcome = session.play(&mut ());
        assert_eq!(outcome.attempt_count(), 1);
        match outcome.stop {
            RetryStop::Accepted => {
                assert_eq!(outcome.accepted().map(|r| r.weeks_elapsed), Some(1));
            }
            RetryStop::WeeksExhausted => assert_eq!(
                outcome.attempts,
                vec![crate::simulation::RunOutcome::Exhausted { weeks_elapsed: 1 }]
            ),
            RetryStop::AttemptsExhausted => panic!("attempts were unbounded"),
        }
    }
}
