// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use canonical_commentary::app_config::{self, Config};
use canonical_commentary::errors::AppError;
use canonical_commentary::file_utils::FileManager;
use canonical_commentary::model::{Commentary, NodeKind, RegionType, TextContainerRef};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for NodeKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNodeKind {
    Page,
    Region,
    Line,
    Word,
    Entity,
    Sentence,
    Hyphenation,
}

impl From<CliNodeKind> for NodeKind {
    fn from(cli_kind: CliNodeKind) -> Self {
        match cli_kind {
            CliNodeKind::Page => NodeKind::Page,
            CliNodeKind::Region => NodeKind::Region,
            CliNodeKind::Line => NodeKind::Line,
            CliNodeKind::Word => NodeKind::Word,
            CliNodeKind::Entity => NodeKind::Entity,
            CliNodeKind::Sentence => NodeKind::Sentence,
            CliNodeKind::Hyphenation => NodeKind::Hyphenation,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count the nodes of each kind in a canonical file, or in every canonical file of a directory
    Stats {
        /// Canonical json file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Describe a single node and its relations
    Show {
        /// Canonical json file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Node id, e.g. `line_3` or a page id
        #[arg(value_name = "NODE_ID")]
        node_id: String,

        /// Child kinds to list
        #[arg(short = 'k', long, value_enum, num_args = 1..)]
        children: Vec<CliNodeKind>,
    },

    /// Load a canonical file and write it back
    Resave {
        /// Canonical json file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file, defaults to the canonical location of the commentary
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for canonical
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Canonical commentary inspection tool
///
/// Loads canonical commentary files, resolves the page/region/line/word
/// hierarchy from word ranges and writes documents back.
#[derive(Parser, Debug)]
#[command(name = "canonical")]
#[command(version)]
#[command(about = "Inspect and rewrite canonical commentary files")]
#[command(long_about = "Loads canonical commentary json files and resolves their text-container hierarchy.

EXAMPLES:
    canonical stats commentaries/                           # Node counts of every canonical file
    canonical show tess_base.json line_3 --children word    # Describe a line and list its words
    canonical resave tess_base.json -o copy.json            # Load and save to another file
    canonical completions bash > canonical.bash             # Generate bash completions

CONFIGURATION:
    Configuration is stored in canonical.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "canonical.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color of a log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config is read, the real level is applied below
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "canonical", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Stats { path } => run_stats(&config, &path),
        Commands::Show { file, node_id, children } => {
            let kinds: Vec<NodeKind> = children.into_iter().map(NodeKind::from).collect();
            run_show(&config, &file, &node_id, &kinds)
        }
        Commands::Resave { file, output } => run_resave(&config, &file, output.as_deref()),
        Commands::Completions { .. } => Ok(()),
    }
}

// @loads: Commentary with the configured layout, warmed up if requested
fn load_commentary(config: &Config, path: &Path) -> Result<Commentary, AppError> {
    if !FileManager::file_exists(path) {
        return Err(AppError::File(format!("Input file does not exist: {:?}", path)));
    }
    let commentary = Commentary::from_json_file_with_layout(path, &config.layout)?;
    if config.warm_up_on_load {
        commentary.warm_up()?;
    }
    Ok(commentary)
}

fn run_stats(config: &Config, path: &Path) -> Result<()> {
    let files = if FileManager::dir_exists(path) {
        FileManager::find_files(path, "json")?
    } else if FileManager::file_exists(path) {
        vec![path.to_path_buf()]
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", path));
    };
    debug!("Found {} canonical file(s) in {:?}", files.len(), path);

    let mut failures = 0;
    for file in &files {
        match load_commentary(config, file) {
            Ok(commentary) => print_stats(file, &commentary)?,
            Err(e) => {
                error!("Skipping {:?}: {}", file, e);
                failures += 1;
            }
        }
    }

    info!("Processed {} file(s), {} failed", files.len(), failures);
    if failures > 0 && failures == files.len() {
        return Err(anyhow!("No canonical file could be loaded from {:?}", path));
    }
    Ok(())
}

fn print_stats(file: &Path, commentary: &Commentary) -> Result<()> {
    let children = commentary.children()?;
    println!(
        "{} ({})",
        commentary.id().unwrap_or("?"),
        commentary.ocr_run().unwrap_or("?")
    );
    println!("  file: {}", file.display());
    for kind in NodeKind::CHILD_KINDS {
        println!("  {:<12} {}", kind.plural(), children.len_of(kind));
    }
    let images = commentary.images().map(|images| images.len()).unwrap_or(0);
    println!("  {:<12} {}", "images", images);

    let regions = commentary.regions()?;
    for region_type in RegionType::ORDERED {
        let count = regions
            .iter()
            .filter(|region| region.region_type() == Some(region_type))
            .count();
        if count > 0 {
            println!("    {:<24} {}", region_type, count);
        }
    }
    Ok(())
}

fn run_show(config: &Config, file: &Path, node_id: &str, child_kinds: &[NodeKind]) -> Result<()> {
    let commentary = load_commentary(config, file)?;
    let node = commentary
        .find(node_id)?
        .ok_or_else(|| anyhow!("No node `{}` in {:?}", node_id, file))?;

    println!("id:         {}", node.id());
    println!("kind:       {}", node.kind());
    println!("word_range: {}", node.word_range());
    if let Some(region_type) = node.region_type() {
        println!("type:       {}", region_type);
    }
    match node.bbox() {
        Ok(bbox) => println!("bbox:       {}", bbox),
        Err(e) => println!("bbox:       ({})", e),
    }
    println!("text:       {}", node.text());

    for kind in [NodeKind::Page, NodeKind::Region, NodeKind::Line] {
        if kind == node.kind() {
            continue;
        }
        let parent = node.parent(kind)?;
        println!("{:<11} {}", format!("{}:", kind), describe(parent));
    }

    for &kind in child_kinds {
        let ids: Vec<&str> = node.children(kind)?.iter().map(|child| child.id()).collect();
        println!("{:<11} [{}]", format!("{}:", kind.plural()), ids.join(", "));
    }
    Ok(())
}

fn describe(node: Option<TextContainerRef<'_>>) -> String {
    match node {
        Some(node) => format!("{} {}", node.id(), node.word_range()),
        None => "-".to_string(),
    }
}

fn run_resave(config: &Config, file: &Path, output: Option<&Path>) -> Result<()> {
    let commentary = load_commentary(config, file)?;
    let written = commentary
        .save_with_layout(output, &config.layout)
        .with_context(|| format!("Failed to save {:?}", file))?;
    info!("Success: {:?}", written);
    Ok(())
}
