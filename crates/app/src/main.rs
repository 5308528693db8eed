use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::catalog;
use quiz_core::model::{ParseIdError, Quiz, QuizId};
use quiz_core::RankTable;
use services::{QuizSession, ReselectPolicy, SessionConfig};

mod play;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidEdition(ParseIdError),
    UnknownEdition { raw: QuizId, known: Vec<QuizId> },
    InvalidRanks { raw: String },
    ConflictingSources,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidEdition(err) => write!(f, "invalid --edition value: {err}"),
            ArgsError::UnknownEdition { raw, known } => {
                write!(f, "no built-in edition named {raw} (available:")?;
                for id in known {
                    write!(f, " {id}")?;
                }
                f.write_str(")")
            }
            ArgsError::InvalidRanks { raw } => {
                write!(f, "invalid --ranks value: {raw} (expected absolute or proportional)")
            }
            ArgsError::ConflictingSources => {
                f.write_str("--quiz and --edition cannot be combined; pick one quiz source")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--edition <id>] [--quiz <file.json>] [--config <file.json>]");
    eprintln!("                      [--ranks absolute|proportional] [--strict] [--json]");
    eprintln!("  cargo run -p app -- --list");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  newest built-in edition, newsletter rank table, answers may be changed");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  NUTSHELL_EDITION, NUTSHELL_QUIZ_PATH, NUTSHELL_CONFIG, RUST_LOG");
}

#[derive(Debug, Default)]
struct Args {
    edition: Option<QuizId>,
    quiz_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    ranks: Option<RankTable>,
    strict: bool,
    list: bool,
    print_json: bool,
    help: bool,
}

fn parse_edition(raw: &str) -> Result<QuizId, ArgsError> {
    raw.parse().map_err(ArgsError::InvalidEdition)
}

impl Args {
    /// Environment first, then command-line flags on top.
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let from_env = Self {
            edition: std::env::var("NUTSHELL_EDITION")
                .ok()
                .map(|raw| parse_edition(&raw))
                .transpose()?,
            quiz_path: std::env::var_os("NUTSHELL_QUIZ_PATH").map(PathBuf::from),
            config_path: std::env::var_os("NUTSHELL_CONFIG").map(PathBuf::from),
            ..Self::default()
        };
        Self::apply(from_env, args)
    }

    fn apply(mut parsed: Self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--edition" => {
                    parsed.edition = Some(parse_edition(&require_value(args, "--edition")?)?);
                }
                "--quiz" => parsed.quiz_path = Some(require_value(args, "--quiz")?.into()),
                "--config" => parsed.config_path = Some(require_value(args, "--config")?.into()),
                "--ranks" => {
                    let value = require_value(args, "--ranks")?;
                    parsed.ranks = Some(match value.as_str() {
                        "absolute" | "newsletter" => RankTable::newsletter(),
                        "proportional" => RankTable::proportional(),
                        _ => return Err(ArgsError::InvalidRanks { raw: value }),
                    });
                }
                "--strict" => parsed.strict = true,
                "--json" => parsed.print_json = true,
                "--list" => parsed.list = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if parsed.quiz_path.is_some() && parsed.edition.is_some() {
            return Err(ArgsError::ConflictingSources);
        }
        Ok(parsed)
    }

    /// Config file first, then command-line overrides.
    fn session_config(&self) -> Result<SessionConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config_path {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => SessionConfig::default(),
        };
        if let Some(ranks) = self.ranks {
            config = config.with_ranks(ranks);
        }
        if self.strict {
            config = config.with_reselect(ReselectPolicy::Reject);
        }
        Ok(config)
    }

    fn load_quiz(&self) -> Result<Quiz, Box<dyn std::error::Error>> {
        if let Some(path) = &self.quiz_path {
            log::info!("loading quiz from {}", path.display());
            let quiz: Quiz = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            return Ok(quiz);
        }

        match &self.edition {
            Some(id) => Ok(catalog::edition(id)?.ok_or_else(|| ArgsError::UnknownEdition {
                raw: id.clone(),
                known: catalog::edition_ids(),
            })?),
            None => Ok(catalog::current()?),
        }
    }
}

fn list_editions() -> Result<(), Box<dyn std::error::Error>> {
    for quiz in catalog::editions()? {
        println!("{}\t{}\t{} questions", quiz.id(), quiz.title(), quiz.len());
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if args.help {
        print_usage();
        return Ok(());
    }
    if args.list {
        return list_editions();
    }

    let quiz = Arc::new(args.load_quiz()?);
    let config = args.session_config()?;
    log::debug!("session config: {config:?}");

    let mut session = QuizSession::with_config(quiz, config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    play::run(
        stdin.lock(),
        &mut stdout,
        &mut session,
        &play::Options {
            print_json: args.print_json,
        },
    )?;
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
