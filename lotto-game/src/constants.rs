//! Calendar and policy constants for the jackpot simulation.
//!
//! Simulated time only advances in whole weeks, one draw per week. Years are
//! derived by integer division so a partial year never counts.

/// Draws per simulated year (`365 / 7`, truncated).
pub const WEEKS_PER_YEAR: u64 = 365 / 7;

/// Default lifetime threshold used by the outer retry policy.
pub const YEARS_IN_A_LIFETIME: u64 = 120;

/// Domain tag mixed into per-attempt seeds.
pub(crate) const DRAW_STREAM_TAG: &[u8] = b"lotto-draw";

/// Field separator in external preset lists.
pub(crate) const PRESET_FIELD_SEPARATOR: char = ';';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_year_is_fifty_two_weeks() {
        assert_eq!(WEEKS_PER_YEAR, 52);
    }
}
