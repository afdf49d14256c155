//! Player tickets, validated before any simulation starts.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::draw::{DrawSource, NumberSet};

/// Ways a proposed ticket can violate its game's shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected {expected} numbers, got {got}")]
    WrongCount { expected: usize, got: usize },
    #[error("number {value} is outside 1-{max_number}")]
    OutOfRange { value: u32, max_number: u32 },
    #[error("number {value} appears more than once")]
    Duplicate { value: u32 },
    #[error("`{token}` is not a number")]
    NotANumber { token: String },
}

/// Numbers chosen by the player for one run, kept in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(NumberSet);

impl Ticket {
    /// Validate `numbers` against `config`.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: count, then range, then duplicates,
    /// checked in input order.
    pub fn new(
        numbers: impl IntoIterator<Item = u32>,
        config: &GameConfig,
    ) -> Result<Self, ValidationError> {
        let numbers: NumberSet = numbers.into_iter().collect();
        if numbers.len() != config.ticket_size() {
            return Err(ValidationError::WrongCount {
                expected: config.ticket_size(),
                got: numbers.len(),
            });
        }
        let mut seen = NumberSet::with_capacity(numbers.len());
        for &value in &numbers {
            if !config.contains(value) {
                return Err(ValidationError::OutOfRange {
                    value,
                    max_number: config.max_number(),
                });
            }
            if seen.contains(&value) {
                return Err(ValidationError::Duplicate { value });
            }
            seen.push(value);
        }
        seen.sort_unstable();
        Ok(Self(seen))
    }

    /// Parse textual numbers, e.g. command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotANumber`] for unparsable tokens, then the
    /// same checks as [`Ticket::new`].
    pub fn parse<S: AsRef<str>>(tokens: &[S], config: &GameConfig) -> Result<Self, ValidationError> {
        if tokens.len() != config.ticket_size() {
            return Err(ValidationError::WrongCount {
                expected: config.ticket_size(),
                got: tokens.len(),
            });
        }
        let numbers = tokens
            .iter()
            .map(|token| {
                let token = token.as_ref().trim();
                token.parse::<u32>().map_err(|_| ValidationError::NotANumber {
                    token: token.to_string(),
                })
            })
            .collect::<Result<NumberSet, _>>()?;
        Self::new(numbers, config)
    }

    /// Quick pick: a ticket drawn from `source` like a weekly draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the source breaks its contract.
    pub fn random(
        source: &mut impl DrawSource,
        config: &GameConfig,
    ) -> Result<Self, ValidationError> {
        Self::new(source.next_draw(config).numbers().iter().copied(), config)
    }

    #[must_use]
    pub fn numbers(&self) -> &[u32] {
        &self.0
    }

    /// Check that this ticket can be played in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the ticket was built for a game of another shape.
    pub fn check_fits(&self, config: &GameConfig) -> Result<(), ValidationError> {
        if self.len() != config.ticket_size() {
            return Err(ValidationError::WrongCount {
                expected: config.ticket_size(),
                got: self.len(),
            });
        }
        match self.0.iter().find(|&&value| !config.contains(value)) {
            Some(&value) => Err(ValidationError::OutOfRange {
                value,
                max_number: config.max_number(),
            }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RandomDraw;

    #[test]
    fn valid_ticket_is_sorted() {
        let ticket = Ticket::new([7, 3, 39, 1, 12, 20, 5], &GameConfig::finnish_lotto()).unwrap();
        assert_eq!(ticket.numbers(), &[1, 3, 5, 7, 12, 20, 39]);
        assert_eq!(ticket.len(), 7);
    }

    #[test]
    fn rejects_each_shape_violation() {
        let config = GameConfig::eurojackpot();
        assert_eq!(
            Ticket::new([1, 2, 3], &config),
            Err(ValidationError::WrongCount {
                expected: 5,
                got: 3
            })
        );
        assert_eq!(
            Ticket::new([1, 2, 3, 4, 51], &config),
            Err(ValidationError::OutOfRange {
                value: 51,
                max_number: 50
            })
        );
        assert_eq!(
            Ticket::new([0, 2, 3, 4, 5], &config),
            Err(ValidationError::OutOfRange {
                value: 0,
                max_number: 50
            })
        );
        assert_eq!(
            Ticket::new([1, 2, 2, 4, 5], &config),
            Err(ValidationError::Duplicate { value: 2 })
        );
    }

    #[test]
    fn parses_argument_tokens() {
        let config = GameConfig::eurojackpot();
        let ticket = Ticket::parse(&["5", " 4", "3", "2", "1"], &config).unwrap();
        assert_eq!(ticket.numbers(), &[1, 2, 3, 4, 5]);

        assert_eq!(
            Ticket::parse(&["1", "2", "x", "4", "5"], &config),
            Err(ValidationError::NotANumber {
                token: "x".to_string()
            })
        );
        assert_eq!(
            Ticket::parse(&["-1", "2", "3", "4", "5"], &config),
            Err(ValidationError::NotANumber {
                token: "-1".to_string()
            })
        );
        assert!(matches!(
            Ticket::parse(&["1"], &config),
            Err(ValidationError::WrongCount { .. })
        ));
    }

    #[test]
    fn quick_pick_is_a_valid_ticket() {
        let config = GameConfig::vikinglotto();
        let mut source = RandomDraw::from_seed(3);
        for _ in 0..50 {
            let ticket = Ticket::random(&mut source, &config).unwrap();
            let revalidated = Ticket::new(ticket.numbers().iter().copied(), &config).unwrap();
            assert_eq!(revalidated, ticket);
        }
    }
}
