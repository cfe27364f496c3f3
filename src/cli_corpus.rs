//! Corpus maintenance tool
//!
//! Sanitizes raw poetry JSON, imports the result into the corpus database and
//! offers search, sampling and name generation from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli_style;
use cli_style::{
    get_styles, print_empty_list, print_error, print_key_value, print_name_card,
    print_section_footer, print_section_header, print_success, print_warning, truncate_to_width,
    TableBuilder,
};

use guchi_name_server::blacklist::BlacklistMatcher;
use guchi_name_server::corpus::{
    import_dir, list_json_files, CorpusStore, SearchOrder, SqliteCorpusStore, TextSanitizer,
    WorkRow, CORPUS_DB_FILE,
};
use guchi_name_server::naming::{
    default_keyword_ranker, GenerationRequest, PinyinRomanizer, SelectionAllocator,
};

const EXCERPT_COLUMNS: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "cli-corpus", styles = get_styles())]
#[command(about = "Prepare and explore the poetry corpus")]
struct CliArgs {
    /// Directory holding the corpus database.
    #[arg(long, global = true, default_value = ".")]
    db_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean raw JSON files and drop records containing forbidden words.
    Sanitize {
        /// Directory of raw *.json files.
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory receiving the sanitized files.
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// JSON array of forbidden words.
        #[arg(long)]
        blacklist: PathBuf,
    },

    /// Load sanitized files into the corpus database, one source per file.
    Import {
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,
    },

    /// Full-text search over titles, authors and content.
    Search {
        query: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Restrict to these sources. May be repeated.
        #[arg(long = "source")]
        sources: Vec<String>,
    },

    /// Show random works.
    Sample {
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long = "source")]
        sources: Vec<String>,
    },

    /// Generate names the same way the server does.
    Generate {
        #[arg(long)]
        surname: String,

        /// Sources to draw from, in order. May be repeated.
        #[arg(long = "source", required = true)]
        sources: Vec<String>,

        #[arg(long)]
        size: Option<i64>,

        /// Characters in the given name (1 or 2).
        #[arg(long, default_value_t = 2)]
        char_count: i64,

        #[arg(long)]
        blacklist: PathBuf,
    },
}

fn open_store(db_dir: &Path) -> Result<SqliteCorpusStore> {
    if !db_dir.is_dir() {
        bail!("Database directory does not exist: {:?}", db_dir);
    }
    let db_path = db_dir.join(CORPUS_DB_FILE);
    info!("Opening SQLite corpus database at {:?}...", db_path);
    SqliteCorpusStore::new(&db_path)
}

fn load_matcher(path: &Path) -> Result<Arc<BlacklistMatcher>> {
    let matcher = BlacklistMatcher::load(path)
        .with_context(|| format!("Cannot use forbidden-word list {:?}", path))?;
    Ok(Arc::new(matcher))
}

fn sanitize(input: &Path, output: &Path, blacklist: &Path) -> Result<()> {
    let sanitizer = TextSanitizer::new(load_matcher(blacklist)?);
    let report = sanitizer.sanitize_dir(input, output)?;

    print_section_header("Sanitize");
    let mut table = TableBuilder::new(&["File", "Kept", "Removed", "Error"]);
    for file in &report.files {
        table.add_row(vec![
            file.file.clone(),
            file.kept.to_string(),
            file.removed.to_string(),
            file.error
                .as_deref()
                .map(|e| truncate_to_width(e, EXCERPT_COLUMNS))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.print();
    print_key_value("Kept", &report.kept.to_string());
    print_key_value("Removed", &report.removed.to_string());
    print_section_footer();

    if report.failed_files > 0 {
        print_warning(&format!("{} files could not be read", report.failed_files));
    }
    print_success(&format!("Sanitized files written to {}", output.display()));
    Ok(())
}

fn import(db_dir: &Path, input: &Path) -> Result<()> {
    let store = open_store(db_dir)?;
    let total_files = list_json_files(input)?.len();

    let progress = ProgressBar::new(total_files as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );
    let report = import_dir(&store, input, |source_tag| {
        progress.set_message(source_tag.to_string());
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    print_section_header("Import");
    for (source, count) in &report.sources {
        print_key_value(source, &count.to_string());
    }
    print_key_value("Total", &report.total.to_string());
    print_section_footer();

    if report.failed_files > 0 {
        print_warning(&format!("{} files could not be read", report.failed_files));
    }
    print_success(&format!("Imported {} works", report.total));
    Ok(())
}

fn print_works(title: &str, rows: &[WorkRow]) {
    print_section_header(title);
    if rows.is_empty() {
        print_empty_list("No works found");
    } else {
        let mut table = TableBuilder::new(&["Title", "Author", "Source", "Excerpt"]);
        for row in rows {
            table.add_row(vec![
                row.title.clone(),
                row.author.clone(),
                row.source.clone(),
                truncate_to_width(&row.excerpt.replace('\n', " "), EXCERPT_COLUMNS),
            ]);
        }
        table.print();
    }
    print_section_footer();
}

fn generate(
    db_dir: &Path,
    surname: &str,
    sources: Vec<String>,
    size: Option<i64>,
    char_count: i64,
    blacklist: &Path,
) -> Result<()> {
    let request = GenerationRequest::new(surname, sources, size, Some(char_count))?;
    let store: Arc<dyn CorpusStore> = Arc::new(open_store(db_dir)?);
    let allocator = SelectionAllocator::new(
        store,
        load_matcher(blacklist)?,
        default_keyword_ranker(),
        Arc::new(PinyinRomanizer),
    );

    let outcome = allocator.generate(&request, &mut rand::rng());

    print_section_header(&format!("{} × {}", request.surname, request.size));
    if outcome.cards.is_empty() {
        print_empty_list("No names could be generated");
    }
    for card in &outcome.cards {
        print_name_card(card);
    }
    print_key_value("Candidates", &outcome.stats.total_candidates.to_string());
    print_key_value("Selected", &outcome.stats.selected_count.to_string());
    print_key_value("Sources used", &outcome.stats.sources_used.join(", "));
    print_section_footer();
    println!("{}", outcome.stats.message);
    Ok(())
}

fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Sanitize {
            input,
            output,
            blacklist,
        } => sanitize(&input, &output, &blacklist),
        Command::Import { input } => import(&args.db_dir, &input),
        Command::Search {
            query,
            limit,
            sources,
        } => {
            let store = open_store(&args.db_dir)?;
            let rows = store.search(&query, limit, &sources, SearchOrder::FullTextFirst)?;
            print_works(&format!("Search: {}", query), &rows);
            Ok(())
        }
        Command::Sample { limit, sources } => {
            let store = open_store(&args.db_dir)?;
            let rows = store.sample(limit, &sources)?;
            print_works("Sample", &rows);
            Ok(())
        }
        Command::Generate {
            surname,
            sources,
            size,
            char_count,
            blacklist,
        } => generate(&args.db_dir, &surname, sources, size, char_count, &blacklist),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    if let Err(err) = run(CliArgs::parse()) {
        print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
