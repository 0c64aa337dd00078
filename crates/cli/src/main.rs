use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;

use simfut_store::paths;

mod chat;
mod flags;

use flags::MatcherMode;

#[derive(Parser)]
#[command(name = "simfut")]
#[command(about = "Tag-aware stored-answer chat assistant", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database file (default: the per-user Simfut data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Minimum similarity score for fuzzy matches
    #[arg(long, global = true, default_value_t = simfut_engine::DEFAULT_CUTOFF)]
    cutoff: f64,

    /// Active tag scope; "auto" infers the tag from the conversation
    #[arg(long, global = true, default_value = "auto")]
    tag: String,

    /// Similarity backend
    #[arg(long, global = true, value_enum, default_value = "fast")]
    matcher: MatcherMode,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log only warnings and errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (the default when no command is given)
    Chat,

    /// Ask a single question and exit
    Ask { query: String },

    /// List stored entries
    List,

    /// Search entries by question substring
    Search { text: String },

    /// Add an entry without entering the chat
    Add {
        #[arg(long)]
        question: String,

        #[arg(long)]
        answer: String,

        #[arg(long, default_value = "")]
        tag: String,
    },

    /// Remove an entry by its list number
    Remove { number: usize },

    /// List distinct tags
    Tags,

    /// Copy the database to a timestamped backup file
    Backup,

    /// Replace the database with the contents of a JSON file
    Restore { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let db = cli.db.clone().unwrap_or_else(paths::db_path);
    log::debug!("Using database {}", db.display());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run(&db, cli.cutoff, &cli.tag, cli.matcher),
        Commands::Ask { query } => ask(&db, &query, cli.cutoff, &cli.tag, cli.matcher),
        Commands::List => list(&db),
        Commands::Search { text } => search(&db, &text),
        Commands::Add {
            question,
            answer,
            tag,
        } => add(&db, question, answer, tag),
        Commands::Remove { number } => remove(&db, number),
        Commands::Tags => tags(&db),
        Commands::Backup => backup(&db),
        Commands::Restore { file } => restore(&db, &file),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.target(env_logger::Target::Stderr).init();
}

fn ask(db: &Path, query: &str, cutoff: f64, tag: &str, matcher: MatcherMode) -> Result<()> {
    let store = simfut_store::ensure(db)?;
    let mut engine = simfut_engine::SelectionEngine::new(matcher.as_ranker_kind());
    let mut rr = simfut_engine::RoundRobin::new();

    match engine.select(query, &store, &[], cutoff, Some(tag), &mut rr) {
        Some(answer) => println!("{answer}"),
        None => println!("{}", chat::NO_MATCH_MESSAGE),
    }
    Ok(())
}

fn list(db: &Path) -> Result<()> {
    let store = simfut_store::load_or_default(db);
    for (i, entry) in store.entries.iter().enumerate() {
        println!("{}", format_entry_line(i, entry));
    }
    Ok(())
}

fn search(db: &Path, text: &str) -> Result<()> {
    let store = simfut_store::load_or_default(db);
    let needle = text.to_lowercase();
    let mut found = false;
    for (i, entry) in store.entries.iter().enumerate() {
        if entry.question.to_lowercase().contains(&needle) {
            println!("{}", format_entry_line(i, entry));
            found = true;
        }
    }
    if !found {
        println!("Uyğun sual tapılmadı.");
    }
    Ok(())
}

fn add(db: &Path, question: String, answer: String, tag: String) -> Result<()> {
    let mut store = simfut_store::ensure(db)?;
    store
        .entries
        .push(simfut_store::AnswerEntry::new(question, answer, tag));
    simfut_store::save(&store, db)?;
    println!("Yeni sual əlavə edildi.");
    Ok(())
}

fn remove(db: &Path, number: usize) -> Result<()> {
    let mut store = simfut_store::load_or_default(db);
    if number == 0 || number > store.entries.len() {
        anyhow::bail!("No entry {number}; the list has {} entries", store.entries.len());
    }
    let entry = store.entries.remove(number - 1);
    simfut_store::save(&store, db)?;
    println!("Silindi: {}", entry.question);
    Ok(())
}

fn tags(db: &Path) -> Result<()> {
    let store = simfut_store::load_or_default(db);
    for tag in store.tags() {
        println!("{tag}");
    }
    Ok(())
}

fn backup(db: &Path) -> Result<()> {
    match simfut_store::backup(db)? {
        Some(path) => println!("Yedək yaradıldı: {}", path.display()),
        None => println!("Veritabanı tapılmadı."),
    }
    Ok(())
}

fn restore(db: &Path, file: &Path) -> Result<()> {
    let store = simfut_store::restore(file, db)
        .with_context(|| format!("Cannot restore from {}", file.display()))?;
    println!(
        "{} Yükləndi: {} sual.",
        style("Uğurla bərpa olundu.").green(),
        store.entries.len()
    );
    Ok(())
}

fn format_entry_line(index: usize, entry: &simfut_store::AnswerEntry) -> String {
    let mut question = entry.question.replace('\n', " ");
    if question.chars().count() > 60 {
        question = question.chars().take(60).collect();
    }
    if entry.tag.is_empty() {
        format!("{:03}: {question}", index + 1)
    } else {
        format!("{:03}: {question} [{}]", index + 1, entry.tag)
    }
}
