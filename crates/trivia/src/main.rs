mod api;
mod catalog;
mod config;
mod play;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use trivia_core::{RecordStore, SeedData, SelectionMode, TriviaService, ALL_CATEGORIES};
use trivia_db::{Database, MemoryStore};
use trivia_logging::{init_tracing, LogFormat};

use config::TriviaConfig;

#[derive(Parser, Debug)]
#[command(
    name = "trivia",
    about = "Trivia game backend: question bank, quizzes and HTTP API",
    version,
    author
)]
struct Cli {
    /// Config file (default: ./trivia.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Use a throwaway in-memory store loaded with the demo questions
    #[arg(long, global = true, conflicts_with = "db")]
    memory: bool,

    /// Questions per page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// How quiz questions are picked
    #[arg(long, global = true, value_enum)]
    selection: Option<SelectionChoice>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatChoice>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load categories and questions into the store
    Seed {
        /// JSON seed file (default: built-in demo set)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Seed even if categories already exist
        #[arg(long)]
        force: bool,
    },

    /// List categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List one page of questions
    Questions {
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<usize>,

        /// Only questions in this category
        #[arg(short, long)]
        category: Option<i64>,

        /// Case-insensitive substring of the question text
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a question
    Add {
        #[arg(short, long)]
        question: String,

        #[arg(short, long)]
        answer: String,

        /// Category id
        #[arg(short, long)]
        category: i64,

        /// Difficulty, 1 (easy) to 5 (hard)
        #[arg(short, long, default_value_t = 1)]
        difficulty: i64,
    },

    /// Delete a question
    Delete {
        /// Question id
        id: i64,
    },

    /// Draw the next quiz question
    Quiz {
        /// Category id (0 for all categories)
        #[arg(short, long, default_value_t = ALL_CATEGORIES)]
        category: i64,

        /// Ids already asked, comma separated
        #[arg(long, value_delimiter = ',')]
        previous: Vec<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a quiz in the terminal
    Play {
        /// Category id (0 for all categories)
        #[arg(short, long, default_value_t = ALL_CATEGORIES)]
        category: i64,

        /// Stop after this many questions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionChoice {
    Random,
    First,
}

impl From<SelectionChoice> for SelectionMode {
    fn from(choice: SelectionChoice) -> Self {
        match choice {
            SelectionChoice::Random => SelectionMode::Random,
            SelectionChoice::First => SelectionMode::First,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    apply_overrides(&mut config, &cli);

    init_tracing(config.log_level(), config.log_format());

    let store = open_store(&cli, &config)?;
    let service = Arc::new(TriviaService::new(store, config.service_config()?));

    match cli.command {
        Commands::Serve { host, port } => {
            if host.is_some() {
                config.server.host = host;
            }
            if port.is_some() {
                config.server.port = port;
            }
            server::serve(service, &config.bind_address()).await
        }
        Commands::Seed { file, force } => catalog::seed(&service, file.as_deref(), force),
        Commands::Categories { json } => catalog::categories(&service, json),
        Commands::Questions {
            page,
            category,
            search,
            json,
        } => catalog::questions(&service, page, category, search.as_deref(), json),
        Commands::Add {
            question,
            answer,
            category,
            difficulty,
        } => catalog::add(&service, question, answer, category, difficulty),
        Commands::Delete { id } => catalog::delete(&service, id),
        Commands::Quiz {
            category,
            previous,
            json,
        } => catalog::quiz(&service, category, &previous, json),
        Commands::Play { category, limit } => play::play(&service, category, limit),
    }
}

fn load_config(cli: &Cli) -> Result<TriviaConfig> {
    if let Some(ref path) = cli.config {
        return TriviaConfig::load_file(path);
    }

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(TriviaConfig::load(&working_dir)?.unwrap_or_default())
}

fn apply_overrides(config: &mut TriviaConfig, cli: &Cli) {
    if let Some(ref db) = cli.db {
        config.database = Some(db.clone());
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = Some(page_size);
    }
    if let Some(selection) = cli.selection {
        config.quiz.selection = Some(selection.into());
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = Some(level.clone());
    }
    if let Some(format) = cli.log_format {
        config.logging.format = Some(format.into());
    }
}

fn open_store(cli: &Cli, config: &TriviaConfig) -> Result<Arc<dyn RecordStore>> {
    if cli.memory {
        let store = MemoryStore::new();
        SeedData::demo().apply(&store, false)?;
        tracing::debug!("Using in-memory store");
        return Ok(Arc::new(store));
    }

    let path = config.database_path();
    let db = Database::open_at(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Opened database");

    Ok(Arc::new(db))
}
