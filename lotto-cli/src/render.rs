use clap::ValueEnum;
use colored::Colorize;
use lotto_game::{
    Milestone, RetryObserver, SimulationObserver, SimulationResult, Ticket, WeekOutcome,
};
use std::fmt::Display;
use std::io::{self, Write};

/// How much of each run is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InfoAmount {
    /// Only milestones and the win
    None,
    /// Ticket and draw rows whenever a milestone is reached
    Results,
    /// Every draw with its match count
    EveryWeek,
}

impl InfoAmount {
    /// Menu order used by the interactive prompt.
    pub const MENU: [Self; 3] = [Self::None, Self::Results, Self::EveryWeek];

    pub const fn describe(self) -> &'static str {
        match self {
            Self::None => "No information, only milestones and the result",
            Self::Results => "Show the numbers when a milestone is reached",
            Self::EveryWeek => "Show the numbers of every week",
        }
    }
}

/// Numbers zero-padded to two digits, e.g. `[01, 05, 39]`.
pub fn format_numbers(numbers: &[u32]) -> String {
    let padded: Vec<String> = numbers.iter().map(|n| format!("{n:02}")).collect();
    format!("[{}]", padded.join(", "))
}

/// `1 year`, `2 weeks`.
pub fn count_of(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// `Got 3 right! Took 2 years`, with the weeks added inside the first year.
pub fn milestone_line(milestone: &Milestone) -> String {
    let mut line = format!(
        "Got {} right! Took {}",
        milestone.target,
        count_of(milestone.years_elapsed, "year")
    );
    if milestone.years_elapsed == 0 {
        line.push_str(&format!(" ({})", count_of(milestone.weeks_elapsed, "week")));
    }
    line
}

/// Prints simulation events to a writer.
///
/// Observer hooks cannot fail, so the first write error is kept and returned
/// by [`ConsoleRenderer::finish`].
pub struct ConsoleRenderer<W: Write> {
    out: W,
    info: InfoAmount,
    ticket_row: String,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, info: InfoAmount, ticket: &Ticket) -> Self {
        Self {
            out,
            info,
            ticket_row: format_numbers(ticket.numbers()),
            error: None,
        }
    }

    fn emit(&mut self, line: impl Display) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            self.error = Some(err);
        }
    }

    fn emit_rows(&mut self, outcome: &WeekOutcome) {
        let ticket_row = self.ticket_row.clone();
        self.emit(format_args!("Your ticket:\t{ticket_row}"));
        self.emit(format_args!(
            "Week {} draw:\t{}",
            outcome.week,
            format_numbers(outcome.draw.numbers())
        ));
    }

    /// Closing line for an accepted jackpot.
    pub fn congratulate(&mut self) {
        self.emit(
            "Congratulations, you might still be alive to use your money!"
                .bright_green()
                .bold(),
        );
    }

    /// Flush and hand back the writer, or the first write error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> SimulationObserver for ConsoleRenderer<W> {
    fn on_week(&mut self, outcome: &WeekOutcome) {
        if self.info == InfoAmount::EveryWeek {
            self.emit_rows(outcome);
            self.emit(format_args!("You got {} numbers right.", outcome.matches));
        }
    }

    fn on_milestone(&mut self, milestone: &Milestone, outcome: &WeekOutcome) {
        if self.info == InfoAmount::Results {
            self.emit_rows(outcome);
        }
        self.emit(milestone_line(milestone).green());
    }

    fn on_jackpot(&mut self, _result: &SimulationResult) {
        self.emit("You won!".bright_green().bold());
    }
}

impl<W: Write> RetryObserver for ConsoleRenderer<W> {
    fn on_attempt_start(&mut self, attempt: u32) {
        if attempt > 0 {
            self.emit("");
        }
    }

    fn on_rejected(&mut self, _attempt: u32, _result: &SimulationResult) {
        self.emit("It took more than a lifetime so let's try that again.".yellow());
    }
}
