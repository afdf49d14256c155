//! Lotto Jackpot Simulator
//!
//! Platform-agnostic core for simulating weekly lottery draws against a fixed
//! ticket until the jackpot is hit. This crate never prints; it produces
//! structured week outcomes, milestones and results for a front-end to render.

pub mod config;
pub mod constants;
pub mod draw;
pub mod matching;
pub mod retry;
pub mod seed;
pub mod session;
pub mod simulation;
pub mod ticket;

// Re-export commonly used types
pub use config::{
    ConfigError, GameConfig, GameConfigError, PresetCatalog, PresetSource, PresetText,
    parse_preset_list,
};
pub use constants::{WEEKS_PER_YEAR, YEARS_IN_A_LIFETIME};
pub use draw::{Draw, DrawError, DrawSource, NumberSet, RandomDraw, draw};
pub use matching::{MatchEngine, count_matches};
pub use retry::{
    LifetimePolicy, RetryLimits, RetryObserver, RetryOutcome, RetryStop, play_until_accepted,
};
pub use seed::{attempt_draws, derive_attempt_seed};
pub use session::JackpotSession;
pub use simulation::{
    ElapsedTime, Milestone, MilestoneSet, MilestoneState, RunOutcome, SimulationLoop,
    SimulationObserver, SimulationPhase, SimulationResult, WeekOutcome,
};
pub use ticket::{Ticket, ValidationError};

/// Resolve the selectable games, surfacing any preset error to the caller.
///
/// Without a source the built-in catalog is used.
///
/// # Errors
///
/// Returns the source's [`ConfigError`]; callers typically fall back to
/// [`PresetCatalog::fallback`].
pub fn resolve_catalog(source: Option<&impl PresetSource>) -> Result<PresetCatalog, ConfigError> {
    match source {
        Some(source) => PresetCatalog::load(source),
        None => Ok(PresetCatalog::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_uses_builtins() {
        let catalog = resolve_catalog(None::<&PresetText<'_>>).unwrap();
        assert_eq!(catalog, PresetCatalog::builtin());
    }

    #[test]
    fn malformed_source_falls_back_to_finnish_lotto() {
        let resolved = resolve_catalog(Some(&PresetText("Lotto;thirty-nine;7")));
        assert!(resolved.is_err());
        let catalog = resolved.unwrap_or_else(|_| PresetCatalog::fallback());
        let game = catalog.sole().unwrap();
        assert_eq!(game.max_number(), 39);
        assert_eq!(game.ticket_size(), 7);
        assert_eq!(game, &GameConfig::finnish_lotto());
    }
}
