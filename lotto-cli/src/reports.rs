use anyhow::Result;
use clap::ValueEnum;
use lotto_game::{JackpotSession, RetryOutcome, RetryStop, RunOutcome, Ticket};
use serde::Serialize;
use std::io::Write;

use crate::render::{count_of, format_numbers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Console,
    /// Machine-readable session record
    Json,
}

/// Everything needed to reproduce and judge a session.
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    pub game: &'a str,
    pub max_number: u32,
    pub ticket: &'a Ticket,
    pub seed: u64,
    pub lifetime_years: u64,
    pub outcome: &'a RetryOutcome,
}

impl<'a> SessionReport<'a> {
    pub fn new(session: &'a JackpotSession, outcome: &'a RetryOutcome) -> Self {
        Self {
            game: session.config().name(),
            max_number: session.config().max_number(),
            ticket: session.ticket(),
            seed: session.seed(),
            lifetime_years: session.policy().max_years,
            outcome,
        }
    }

    fn total_weeks(&self) -> u64 {
        self.outcome
            .attempts
            .iter()
            .map(|attempt| match attempt {
                RunOutcome::Won(result) => result.weeks_elapsed,
                RunOutcome::Exhausted { weeks_elapsed } => *weeks_elapsed,
            })
            .sum()
    }
}

pub fn write_report<W: Write + ?Sized>(
    writer: &mut W,
    format: ReportFormat,
    report: &SessionReport<'_>,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        ReportFormat::Console => generate_console_report(writer, report)?,
    }
    Ok(())
}

fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    report: &SessionReport<'_>,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "📊 Session Summary")?;
    writeln!(writer, "==================")?;
    writeln!(writer, "Game: {}", report.game)?;
    writeln!(
        writer,
        "Ticket: {}",
        format_numbers(report.ticket.numbers())
    )?;
    writeln!(writer, "Seed: {}", report.seed)?;
    writeln!(writer, "Attempts: {}", report.outcome.attempt_count())?;
    writeln!(writer, "Weeks simulated: {}", report.total_weeks())?;

    match (report.outcome.stop, report.outcome.accepted()) {
        (RetryStop::Accepted, Some(result)) => writeln!(
            writer,
            "✅ Jackpot after {} ({})",
            count_of(result.years_elapsed, "year"),
            count_of(result.weeks_elapsed, "week")
        )?,
        (RetryStop::AttemptsExhausted, _) => writeln!(
            writer,
            "❌ No jackpot within {} years in any attempt",
            report.lifetime_years
        )?,
        (RetryStop::WeeksExhausted | RetryStop::Accepted, _) => {
            writeln!(writer, "❌ Week budget ran out before the jackpot")?;
        }
    }
    Ok(())
}
