//! Line-based interactive prompts.
use lotto_game::{GameConfig, PresetCatalog, Ticket, ValidationError};
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::render::InfoAmount;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input ended before a valid answer was given")]
    EndOfInput,
    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("there are no games to choose from")]
    NoGames,
    #[error("entered ticket was rejected: {0}")]
    Ticket(#[from] ValidationError),
}

/// Asks questions on `output` and reads answers from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, PromptError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until an integer in `min..=max` is entered.
    pub fn read_int(&mut self, min: u32, max: u32) -> Result<u32, PromptError> {
        loop {
            let line = self.read_line()?;
            match line.parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => writeln!(
                    self.output,
                    "Please give a number between [{min}, {max}]"
                )?,
                Err(_) => writeln!(self.output, "Please give an integer")?,
            }
        }
    }

    /// Pick one of the catalog's games by its menu number.
    pub fn choose_game<'a>(
        &mut self,
        catalog: &'a PresetCatalog,
    ) -> Result<&'a GameConfig, PromptError> {
        let games = catalog.games();
        if games.is_empty() {
            return Err(PromptError::NoGames);
        }
        writeln!(self.output, "Choose the lotto type:")?;
        for (index, game) in games.iter().enumerate() {
            writeln!(self.output, "{}) {game}", index + 1)?;
        }
        let upper = u32::try_from(games.len()).unwrap_or(u32::MAX);
        let choice = self.read_int(1, upper)?;
        let index = usize::try_from(choice - 1).unwrap_or(usize::MAX);
        games.get(index).ok_or(PromptError::NoGames)
    }

    pub fn choose_info(&mut self) -> Result<InfoAmount, PromptError> {
        writeln!(self.output, "How much information do you want?")?;
        for (index, info) in InfoAmount::MENU.iter().enumerate() {
            writeln!(self.output, "{}) {}", index + 1, info.describe())?;
        }
        let choice = self.read_int(1, 3)?;
        Ok(InfoAmount::MENU[choice as usize - 1])
    }

    /// Ask for the ticket one number at a time, rejecting repeats.
    pub fn read_ticket(&mut self, config: &GameConfig) -> Result<Ticket, PromptError> {
        let max = config.max_number();
        let mut numbers: Vec<u32> = Vec::with_capacity(config.ticket_size());
        while numbers.len() < config.ticket_size() {
            writeln!(
                self.output,
                "Please give a unique number between [1, {max}] ({}/{})",
                numbers.len() + 1,
                config.ticket_size()
            )?;
            let value = self.read_int(1, max)?;
            if numbers.contains(&value) {
                writeln!(self.output, "Not unique numbers!")?;
            } else {
                numbers.push(value);
            }
        }
        Ok(Ticket::new(numbers, config)?)
    }
}
