//! Week-by-week jackpot simulation.
//!
//! A [`SimulationLoop`] owns its ticket, draw source and milestone state. Each
//! call to [`SimulationLoop::step`] simulates one week and returns a
//! [`WeekOutcome`]; once the ticket fully matches the loop is `Won` and
//! yields nothing further. Rendering is left to a [`SimulationObserver`].
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::GameConfig;
use crate::constants::WEEKS_PER_YEAR;
use crate::draw::{Draw, DrawSource};
use crate::matching::MatchEngine;
use crate::ticket::{Ticket, ValidationError};

/// Simulated time expressed in whole weeks and whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElapsedTime {
    pub weeks: u64,
    pub years: u64,
}

impl ElapsedTime {
    #[must_use]
    pub const fn from_weeks(weeks: u64) -> Self {
        Self {
            weeks,
            years: weeks / WEEKS_PER_YEAR,
        }
    }
}

/// First time `target` numbers were right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub target: usize,
    pub weeks_elapsed: u64,
    pub years_elapsed: u64,
}

/// Milestones fired in a single week; jumps of several levels are common.
pub type MilestoneSet = SmallVec<[Milestone; 4]>;

/// Everything that happened in one simulated week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOutcome {
    /// One-based week counter.
    pub week: u64,
    /// The week's draw in ascending order.
    pub draw: Draw,
    pub matches: usize,
    #[serde(default)]
    pub milestones: MilestoneSet,
    pub won: bool,
}

/// Final result of a run that hit the jackpot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub game: String,
    pub weeks_elapsed: u64,
    pub years_elapsed: u64,
}

impl SimulationResult {
    #[must_use]
    pub const fn elapsed(&self) -> ElapsedTime {
        ElapsedTime {
            weeks: self.weeks_elapsed,
            years: self.years_elapsed,
        }
    }
}

/// How a bounded run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Won(SimulationResult),
    /// The week budget ran out before the jackpot.
    Exhausted { weeks_elapsed: u64 },
}

impl RunOutcome {
    #[must_use]
    pub const fn result(&self) -> Option<&SimulationResult> {
        match self {
            Self::Won(result) => Some(result),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Loop phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationPhase {
    Running,
    Won,
}

/// Per-run progress counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneState {
    pub next_target: usize,
    pub weeks_elapsed: u64,
}

impl Default for MilestoneState {
    fn default() -> Self {
        Self {
            next_target: 1,
            weeks_elapsed: 0,
        }
    }
}

/// Receives loop events for presentation. Every hook defaults to a no-op.
pub trait SimulationObserver {
    fn on_week(&mut self, _outcome: &WeekOutcome) {}

    fn on_milestone(&mut self, _milestone: &Milestone, _outcome: &WeekOutcome) {}

    fn on_jackpot(&mut self, _result: &SimulationResult) {}
}

impl SimulationObserver for () {}

impl<O: SimulationObserver + ?Sized> SimulationObserver for &mut O {
    fn on_week(&mut self, outcome: &WeekOutcome) {
        (**self).on_week(outcome);
    }

    fn on_milestone(&mut self, milestone: &Milestone, outcome: &WeekOutcome) {
        (**self).on_milestone(milestone, outcome);
    }

    fn on_jackpot(&mut self, result: &SimulationResult) {
        (**self).on_jackpot(result);
    }
}

/// Jackpot hunt for one ticket in one game.
#[derive(Debug, Clone)]
pub struct SimulationLoop<S> {
    config: GameConfig,
    ticket: Ticket,
    engine: MatchEngine,
    source: S,
    state: MilestoneState,
    phase: SimulationPhase,
}

impl<S: DrawSource> SimulationLoop<S> {
    /// Start a fresh run.
    ///
    /// # Errors
    ///
    /// Returns an error if `ticket` does not fit `config`; such a ticket
    /// could never hit the jackpot.
    pub fn new(config: GameConfig, ticket: Ticket, source: S) -> Result<Self, ValidationError> {
        ticket.check_fits(&config)?;
        Ok(Self::assemble(config, ticket, source))
    }

    /// Start a run for a ticket already checked against `config`.
    pub(crate) fn assemble(config: GameConfig, ticket: Ticket, source: S) -> Self {
        let engine = MatchEngine::new(&ticket);
        Self {
            config,
            ticket,
            engine,
            source,
            state: MilestoneState::default(),
            phase: SimulationPhase::Running,
        }
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
    pub const fn state(&self) -> MilestoneState {
        self.state
    }

    #[must_use]
    pub const fn phase(&self) -> SimulationPhase {
        self.phase
    }

    #[must_use]
    pub const fn elapsed(&self) -> ElapsedTime {
        ElapsedTime::from_weeks(self.state.weeks_elapsed)
    }

    /// Result of the run once it has been won.
    #[must_use]
    pub fn result(&self) -> Option<SimulationResult> {
        match self.phase {
            SimulationPhase::Won => Some(self.snapshot_result()),
            SimulationPhase::Running => None,
        }
    }

    fn snapshot_result(&self) -> SimulationResult {
        let elapsed = self.elapsed();
        SimulationResult {
            game: self.config.name().to_string(),
            weeks_elapsed: elapsed.weeks,
            years_elapsed: elapsed.years,
        }
    }

    /// Simulate one week. Returns `None` once the jackpot has been hit.
    pub fn step(&mut self) -> Option<WeekOutcome> {
        if self.phase == SimulationPhase::Won {
            return None;
        }

        let draw = self.source.next_draw(&self.config).sorted();
        self.state.weeks_elapsed = self.state.weeks_elapsed.saturating_add(1);
        let matches = self.engine.count(draw.numbers());

        let elapsed = self.elapsed();
        let mut milestones = MilestoneSet::new();
        while matches >= self.state.next_target
            && self.state.next_target <= self.engine.ticket_size()
        {
            milestones.push(Milestone {
                target: self.state.next_target,
                weeks_elapsed: elapsed.weeks,
                years_elapsed: elapsed.years,
            });
            self.state.next_target += 1;
        }

        let won = self.engine.is_jackpot(matches);
        if won {
            self.phase = SimulationPhase::Won;
            log::debug!(
                "{}: jackpot after {} week(s)",
                self.config.name(),
                elapsed.weeks
            );
        }

        Some(WeekOutcome {
            week: elapsed.weeks,
            draw,
            matches,
            milestones,
            won,
        })
    }

    /// Run until the jackpot, however long it takes.
    pub fn run(&mut self, observer: &mut impl SimulationObserver) -> SimulationResult {
        loop {
            if let RunOutcome::Won(result) = self.run_bounded(observer, u64::MAX) {
                return result;
            }
        }
    }

    /// Run for at most `max_weeks` further weeks.
    pub fn run_bounded(
        &mut self,
        observer: &mut impl SimulationObserver,
        max_weeks: u64,
    ) -> RunOutcome {
        for _ in 0..max_weeks {
            let Some(outcome) = self.step() else {
                break;
            };
            observer.on_week(&outcome);
            for milestone in &outcome.milestones {
                observer.on_milestone(milestone, &outcome);
            }
            if outcome.won {
                let result = self.snapshot_result();
                observer.on_jackpot(&result);
                return RunOutcome::Won(result);
            }
        }
        match self.result() {
            Some(result) => RunOutcome::Won(result),
            None => RunOutcome::Exhausted {
                weeks_elapsed: self.state.weeks_elapsed,
            },
        }
    }

    /// Consume the loop, returning its draw source.
    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: DrawSource> Iterator for SimulationLoop<S> {
    type Item = WeekOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}
