mod presets;
mod prompt;
mod render;
mod reports;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::PathBuf;

use lotto_game::{
    GameConfig, JackpotSession, LifetimePolicy, PresetCatalog, RetryLimits, RetryStop, Ticket,
    YEARS_IN_A_LIFETIME, attempt_draws,
};
use prompt::Console;
use render::{ConsoleRenderer, InfoAmount};
use reports::{ReportFormat, SessionReport, write_report};

/// Attempt index reserved for the quick-pick ticket stream.
const QUICK_PICK_STREAM: u32 = u32::MAX;

#[derive(Debug, Parser)]
#[command(name = "lotto", version)]
#[command(about = "Simulates weekly lotto draws until your ticket hits the jackpot")]
struct Args {
    /// Ticket numbers; prompted for when missing or invalid
    numbers: Vec<String>,

    /// Game to play, by name or menu number
    #[arg(long)]
    game: Option<String>,

    /// List the available games and exit
    #[arg(long)]
    list_games: bool,

    /// Preset list with `name;maxNumber;ticketSize` records
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Amount of information printed while simulating
    #[arg(long, value_enum)]
    info: Option<InfoAmount>,

    /// Draw a random ticket instead of asking for one
    #[arg(long, conflicts_with = "numbers")]
    quick_pick: bool,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Years a jackpot may take before the session is started over
    #[arg(long, default_value_t = YEARS_IN_A_LIFETIME)]
    lifetime_years: u64,

    /// Give up after this many attempts
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Give up when one attempt runs this many weeks
    #[arg(long)]
    max_weeks: Option<u64>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = presets::load_catalog(args.presets.as_deref());
    if maybe_list_games(&args, &catalog)? {
        return Ok(());
    }

    announce_banner();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("session seed {seed}");

    let (session, info) = {
        let mut console = Console::new(stdin().lock(), stdout().lock());
        let config = select_game(&args, &catalog, &mut console)?.clone();
        let ticket = ticket_from_args(&args, &config, seed)?;
        let info = match args.info {
            Some(info) => info,
            None => console.choose_info()?,
        };
        let ticket = match ticket {
            Some(ticket) => ticket,
            None => console.read_ticket(&config)?,
        };
        let session = JackpotSession::new(config, ticket, seed)
            .context("ticket does not fit the chosen game")?
            .with_policy(LifetimePolicy::new(args.lifetime_years))
            .with_limits(RetryLimits {
                max_attempts: args.max_attempts,
                max_weeks_per_attempt: args.max_weeks,
            });
        (session, info)
    };

    println!(
        "Playing {} with {}",
        session.config(),
        render::format_numbers(session.ticket().numbers())
    );

    let mut renderer = ConsoleRenderer::new(stdout().lock(), info, session.ticket());
    let outcome = session.play(&mut renderer);
    if outcome.stop == RetryStop::Accepted {
        renderer.congratulate();
    }
    renderer.finish().context("failed to write simulation output")?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    write_report(
        output_target.writer(),
        args.report,
        &SessionReport::new(&session, &outcome),
    )?;
    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn maybe_list_games(args: &Args, catalog: &PresetCatalog) -> Result<bool> {
    if !args.list_games {
        return Ok(false);
    }

    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available games:")?;
    for (index, game) in catalog.games().iter().enumerate() {
        writeln!(output_target.writer(), "  {}) {game}", index + 1)?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎰 Lotto Jackpot Simulator".bright_cyan().bold());
    println!("{}", "==========================".cyan());
}

fn select_game<'a, R: std::io::BufRead, W: Write>(
    args: &Args,
    catalog: &'a PresetCatalog,
    console: &mut Console<R, W>,
) -> Result<&'a GameConfig> {
    if let Some(selector) = &args.game {
        return match catalog.find(selector) {
            Some(game) => Ok(game),
            None => bail!("unknown game `{selector}`; see --list-games"),
        };
    }
    if let Some(game) = catalog.sole() {
        log::debug!("only {game} is available, skipping the menu");
        return Ok(game);
    }
    console
        .choose_game(catalog)
        .context("failed to choose a game")
}

/// Ticket given on the command line, if any and valid.
fn ticket_from_args(args: &Args, config: &GameConfig, seed: u64) -> Result<Option<Ticket>> {
    if args.quick_pick {
        let mut source = attempt_draws(seed, QUICK_PICK_STREAM);
        let ticket = Ticket::random(&mut source, config).context("quick pick failed")?;
        return Ok(Some(ticket));
    }
    if args.numbers.is_empty() {
        return Ok(None);
    }
    match Ticket::parse(&args.numbers, config) {
        Ok(ticket) => Ok(Some(ticket)),
        Err(err) => {
            eprintln!("{} {err}; choose your numbers below", "ERROR:".red().bold());
            Ok(None)
        }
    }
}

enum OutputTarget {
    Stdout(std::io::Stdout),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(stdout()))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(handle) => handle,
            Self::File(file) => file,
        }
    }

    fn flush_inner(&mut self) -> Result<()> {
        match self {
            Self::Stdout(handle) => handle.flush()?,
            Self::File(file) => file.flush()?,
        }
        Ok(())
    }
}
