//! Lottery variants and the preset catalog they are selected from.
use serde::Serialize;
use thiserror::Error;

use crate::constants::PRESET_FIELD_SEPARATOR;

/// Raised when a lottery variant cannot support unbiased sampling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameConfigError {
    #[error("game name must not be empty")]
    EmptyName,
    #[error("max number must be at least 1 (got {max_number})")]
    MaxNumberZero { max_number: u32 },
    #[error("ticket size {ticket_size} must be between 1 and max number {max_number}")]
    InvalidShape { max_number: u32, ticket_size: usize },
}

/// Immutable description of a lottery variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameConfig {
    name: String,
    max_number: u32,
    ticket_size: usize,
}

impl GameConfig {
    /// Validate and build a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or `ticket_size` is outside
    /// `1..=max_number`.
    pub fn new(
        name: impl Into<String>,
        max_number: u32,
        ticket_size: usize,
    ) -> Result<Self, GameConfigError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(GameConfigError::EmptyName);
        }
        if max_number == 0 {
            return Err(GameConfigError::MaxNumberZero { max_number });
        }
        let fits = usize::try_from(max_number).is_ok_and(|max| ticket_size <= max);
        if ticket_size == 0 || !fits {
            return Err(GameConfigError::InvalidShape {
                max_number,
                ticket_size,
            });
        }
        Ok(Self {
            name,
            max_number,
            ticket_size,
        })
    }

    /// Finnish Lotto: 7 numbers out of 39.
    #[must_use]
    pub fn finnish_lotto() -> Self {
        Self::builtin("Finnish Lotto", 39, 7)
    }

    /// Vikinglotto: 6 numbers out of 48.
    #[must_use]
    pub fn vikinglotto() -> Self {
        Self::builtin("Vikinglotto", 48, 6)
    }

    /// Eurojackpot: 5 numbers out of 50. Bonus numbers are not modelled.
    #[must_use]
    pub fn eurojackpot() -> Self {
        Self::builtin("Eurojackpot", 50, 5)
    }

    fn builtin(name: &str, max_number: u32, ticket_size: usize) -> Self {
        Self {
            name: name.to_string(),
            max_number,
            ticket_size,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest number that can be drawn; the lowest is always 1.
    #[must_use]
    pub const fn max_number(&self) -> u32 {
        self.max_number
    }

    /// Numbers on a ticket and in every draw.
    #[must_use]
    pub const fn ticket_size(&self) -> usize {
        self.ticket_size
    }

    /// Whether `value` lies in `[1, max_number]`.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value >= 1 && value <= self.max_number
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::finnish_lotto()
    }
}

impl std::fmt::Display for GameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} numbers, 1-{})",
            self.name, self.ticket_size, self.max_number
        )
    }
}

/// Errors raised while reading an external preset list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read preset source {source_name}")]
    Unreadable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("preset source contains no records")]
    Empty,
    #[error("line {line}: expected `name;maxNumber;ticketSize`, found {fields} field(s)")]
    FieldCount { line: usize, fields: usize },
    #[error("line {line}: `{value}` is not a valid {field}")]
    NotANumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    InvalidGame {
        line: usize,
        #[source]
        source: GameConfigError,
    },
}

/// Parse a line-oriented `name;maxNumber;ticketSize` preset list.
///
/// Blank lines are skipped. Any malformed record rejects the whole list.
///
/// # Errors
///
/// Returns an error for malformed records or when no record is present.
pub fn parse_preset_list(text: &str) -> Result<Vec<GameConfig>, ConfigError> {
    let mut presets = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split(PRESET_FIELD_SEPARATOR).map(str::trim).collect();
        let [name, max_number, ticket_size] = fields.as_slice() else {
            return Err(ConfigError::FieldCount {
                line,
                fields: fields.len(),
            });
        };
        let max_number = max_number
            .parse::<u32>()
            .map_err(|_| ConfigError::NotANumber {
                line,
                field: "max number",
                value: (*max_number).to_string(),
            })?;
        let ticket_size = ticket_size
            .parse::<usize>()
            .map_err(|_| ConfigError::NotANumber {
                line,
                field: "ticket size",
                value: (*ticket_size).to_string(),
            })?;
        let game = GameConfig::new(*name, max_number, ticket_size)
            .map_err(|source| ConfigError::InvalidGame { line, source })?;
        presets.push(game);
    }
    if presets.is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(presets)
}

/// Source of externally supplied presets.
///
/// Platform layers provide this (files, embedded assets, test fixtures).
pub trait PresetSource {
    /// Produce the records this source contributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unreadable or malformed.
    fn load_presets(&self) -> Result<Vec<GameConfig>, ConfigError>;
}

/// Preset list held in memory, in the external record format.
#[derive(Debug, Clone, Copy)]
pub struct PresetText<'a>(pub &'a str);

impl PresetSource for PresetText<'_> {
    fn load_presets(&self) -> Result<Vec<GameConfig>, ConfigError> {
        parse_preset_list(self.0)
    }
}

/// Ordered, explicitly constructed set of selectable variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetCatalog {
    games: Vec<GameConfig>,
}

impl PresetCatalog {
    /// The three built-in variants.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            games: vec![
                GameConfig::finnish_lotto(),
                GameConfig::vikinglotto(),
                GameConfig::eurojackpot(),
            ],
        }
    }

    /// Catalog holding only the default variant, used when loading fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            games: vec![GameConfig::default()],
        }
    }

    /// Built-ins merged with the records of `source`.
    ///
    /// A record sharing a built-in's name (case-insensitive) replaces it;
    /// other records are appended in source order.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; the caller decides the fallback.
    pub fn load(source: &impl PresetSource) -> Result<Self, ConfigError> {
        let mut catalog = Self::builtin();
        for game in source.load_presets()? {
            catalog.upsert(game);
        }
        log::debug!("preset catalog holds {} game(s)", catalog.games.len());
        Ok(catalog)
    }

    fn upsert(&mut self, game: GameConfig) {
        if let Some(existing) = self
            .games
            .iter_mut()
            .find(|existing| existing.name.eq_ignore_ascii_case(&game.name))
        {
            *existing = game;
        } else {
            self.games.push(game);
        }
    }

    #[must_use]
    pub fn games(&self) -> &[GameConfig] {
        &self.games
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Look up by one-based index or case-insensitive name.
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<&GameConfig> {
        let selector = selector.trim();
        if let Ok(index) = selector.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| self.games.get(i));
        }
        self.games
            .iter()
            .find(|game| game.name.eq_ignore_ascii_case(selector))
    }

    /// Single variant to use without asking, if there is no real choice.
    #[must_use]
    pub fn sole(&self) -> Option<&GameConfig> {
        match self.games.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
