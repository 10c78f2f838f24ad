use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use blackout::config::AppConfig;
use blackout::generator::MIN_STREAM_WORDS;
use blackout::logging::{init_logging, LogConfig, LogFormat};
use blackout::render::{self, RenderStyle};
use blackout::{Article, Mode, Outcome, Session, Settings, SyncResult};
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    #[value(name = "smart_local", alias = "smart")]
    SmartLocal,
    #[value(name = "randomish", alias = "random")]
    Randomish,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::SmartLocal => Mode::SmartLocal,
            ModeArg::Randomish => Mode::RandomIsh,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "blackout")]
#[command(version)]
#[command(about = "Black out an article until only a poem is left", long_about = None)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Article text, paragraphs separated by blank lines (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Article identity used for seeding (defaults to the file path)
    #[arg(short, long)]
    url: Option<String>,

    /// Headline text; overrides a leading "# " line in the article
    #[arg(long)]
    headline: Option<String>,

    /// Words to keep visible (1 to 500)
    #[arg(short, long, value_parser = RangedU64ValueParser::<u64>::new().range(1..=500))]
    words: Option<u64>,

    /// Selection mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Reroll counter; change it for a different poem from the same article
    #[arg(short, long)]
    reroll: Option<u64>,

    /// Print this many extra rerolled poems after the first
    #[arg(long, default_value_t = 0)]
    rerolls: u32,

    /// Wrap rendered paragraphs at this column
    #[arg(long)]
    width: Option<usize>,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    log_format: LogFormatArg,

    /// Print the blacked-out article above the poem
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    render: bool,

    /// Paint hidden words black-on-black instead of replacing them
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    ansi: bool,

    /// Print the selection as JSON
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    json: bool,

    /// More logging on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Flags")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    init_logging(
        &LogConfig::from_verbosity(cli.verbose)
            .with_format(log_format)
            .with_ansi(io::stderr().is_terminal()),
    );

    let app_config = AppConfig::load().unwrap_or_else(|e| {
        // missing files are fine, this only catches malformed ones
        warn!(error = %e, "failed to load config, using defaults");
        AppConfig::default()
    });

    let settings = apply_overrides(app_config.settings(), &cli);

    let article = match &cli.file {
        Some(path) => Article::from_path(path, cli.headline.as_deref())
            .with_context(|| format!("could not load {}", path.display()))?,
        None => Article::from_reader(io::stdin().lock(), "stdin", cli.headline.as_deref())
            .context("could not read stdin")?,
    };
    let article = match &cli.url {
        Some(url) => Article {
            location: url.clone(),
            ..article
        },
        None => article,
    };

    let mut style = app_config.render.style();
    style.ansi = cli.ansi;
    style.width = cli.width.or(style.width).or_else(|| {
        if io::stdout().is_terminal() {
            render::terminal_width()
        } else {
            None
        }
    });

    let mut session = Session::new(article, settings);
    let first = session.sync();
    print_result(&session, &first, &cli, &style)?;

    for _ in 0..cli.rerolls {
        let next = session.reroll();
        println!();
        print_result(&session, &next, &cli, &style)?;
    }

    Ok(())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(words) = cli.words {
        settings.poem_words_target = words as usize;
    }
    if let Some(mode) = cli.mode {
        settings.mode = mode.into();
    }
    if let Some(reroll) = cli.reroll {
        settings.reroll_seed = reroll;
    }
    settings
}

fn print_result(
    session: &Session,
    result: &SyncResult,
    cli: &Cli,
    style: &RenderStyle,
) -> Result<()> {
    let outcome = match result {
        SyncResult::Disabled => {
            eprintln!("blackout is disabled in the config (poem.enabled = false)");
            return Ok(());
        }
        SyncResult::Applied(outcome) => outcome,
    };

    if let Some(notice) = insufficient_notice(outcome) {
        eprintln!("{notice}");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Insufficient { .. } => {}
        Outcome::Poem(selection) => {
            if cli.render {
                let tokens = session.article().tokens();
                println!("{}", render::blackout(&tokens, &selection.keep_positions, style));
                println!();
            }
            if cli.rerolls > 0 {
                println!(
                    "-- reroll {} · {} --",
                    session.settings().reroll_seed,
                    selection.mode
                );
            }
            println!("{}", selection.poem);
        }
    }
    Ok(())
}

/// The stderr line for an article too short to black out, in every output mode.
fn insufficient_notice(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Insufficient { words } => Some(format!(
            "not enough article text for a poem ({words} words, need {MIN_STREAM_WORDS})"
        )),
        Outcome::Poem(_) => None,
    }
}
