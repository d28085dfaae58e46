use std::{
    fs,
    path::PathBuf,
};

use clap::{
    Parser,
    Subcommand,
};
use serde::Serialize;
use tadoku::{
    core::{
        models::now,
        StoryStatus,
    },
    drill,
    vocabulary::{
        StoryStore,
        VocabStore,
    },
    Config,
    DrillOrder,
    DrillOutcome,
    DrillRequest,
    LanguageTools,
    MemoryStore,
    TadokuError,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tadoku")]
#[command(version)]
#[command(about = "Builds a drillable vocabulary from Japanese texts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Vocabulary snapshot to use instead of the configured one
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a text (plain or SRT) as a story and extract its vocabulary
    Ingest {
        file: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value = "")]
        link: String,
    },

    /// Re-run extraction over a stored story
    Retokenize { story_id: i64 },

    /// Rank dictionary entries matching a query (kana, kanji or romaji)
    Search {
        query: String,

        /// Treat the query as a part-of-speech tag such as v5k
        #[arg(long)]
        pos: bool,
    },

    /// Resolve the kanji of a text
    Kanji { text: String },

    /// Pick words to drill
    Drill {
        /// all, katakana, kanji, ichidan, godan, godan_su ... godan_nu, verb
        #[arg(long, default_value = "all")]
        filter: String,

        /// 0 = no cap
        #[arg(long, default_value_t = 0)]
        count: usize,

        /// store, random or rank
        #[arg(long, default_value = "store")]
        order: String,

        /// Only words added within this many minutes
        #[arg(long, default_value_t = 0)]
        recent: i64,

        /// Only words answered wrong within this many minutes
        #[arg(long, default_value_t = 0)]
        wrong: i64,
    },

    /// Record a drill answer
    Answer {
        word_id: i64,

        #[arg(long)]
        wrong: bool,
    },

    /// Recompute categories of every stored word
    Reclassify,

    /// List stories, or set the status of one
    Stories {
        #[arg(long, requires = "status")]
        id: Option<i64>,

        /// never_read, read, current or archived
        #[arg(long)]
        status: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), TadokuError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), TadokuError> {
    let config = Config::load();
    let store_path = cli.store.unwrap_or_else(|| config.store_path());
    let store = MemoryStore::open(&store_path)?;

    match cli.command {
        Commands::Ingest { file, title, link } => {
            let content = fs::read_to_string(&file)?;
            let title = title.unwrap_or_else(|| {
                file.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
            });
            let tools = LanguageTools::load(config)?;
            let created = tools.create_story(&store, &title, &link, &content)?;
            store.save()?;
            print_json(&created)?;
        }
        Commands::Retokenize { story_id } => {
            let tools = LanguageTools::load(config)?;
            let new_count = tools.retokenize_story(&store, story_id)?;
            store.save()?;
            print_json(&new_count)?;
        }
        Commands::Search { query, pos } => {
            let tools = LanguageTools::load(config)?;
            if pos {
                print_json(&tools.search_by_part_of_speech(&query))?;
            } else {
                print_json(&tools.search(&query))?;
            }
        }
        Commands::Kanji { text } => {
            let tools = LanguageTools::load(config)?;
            print_json(&tools.lookup_kanji(&text))?;
        }
        Commands::Drill { filter, count, order, recent, wrong } => {
            let request = DrillRequest {
                recency_minutes: recent,
                wrong_minutes: wrong,
                filter,
                count,
                order: order.parse::<DrillOrder>()?,
            };
            let selection =
                drill::select(store.all_words()?, &request, now(), config.drill_cooldown_secs);
            print_json(&selection)?;
        }
        Commands::Answer { word_id, wrong } => {
            let outcome = if wrong { DrillOutcome::Wrong } else { DrillOutcome::Correct };
            let word = drill::record_result(&store, &config, word_id, outcome, now())?;
            store.save()?;
            print_json(&word)?;
        }
        Commands::Reclassify => {
            let report = tadoku::vocabulary::reclassify_all(&store)?;
            store.save()?;
            print_json(&report)?;
        }
        Commands::Stories { id, status } => {
            if let (Some(id), Some(status)) = (id, status) {
                store.set_status(id, status.parse::<StoryStatus>()?)?;
                store.save()?;
            }
            print_json(&store.list_stories()?)?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
