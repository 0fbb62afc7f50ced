mod render;
mod shell;

use clap::{Args, Parser, Subcommand};
use declscope_core::config::ViewerConfig;
use declscope_core::locate::SearchOptions;
use declscope_core::logging::init_logging;
use declscope_core::parser::DeclarationParser;
use declscope_core::view::{NavigationRequest, SourceView, StatusEvent};
use declscope_java::JavaDeclarationParser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    name = "declscope",
    version,
    about = "Jump to declarations in a source file",
    long_about = "Declscope parses a source file into its declarations (types, methods, \
                  constructors, fields, enum constants) and locates each one in the text \
                  by its signature, falling back to plain text search."
)]
pub struct Cli {
    /// Config file (defaults to ~/.declscope/config.json)
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the configured free-text search options.
#[derive(Args, Clone, Debug, Default)]
pub struct SearchFlags {
    /// Treat free-text keys as regular expressions
    #[arg(long)]
    pub regex: bool,
    /// Match without regard to case
    #[arg(long)]
    pub ignore_case: bool,
    /// Only match whole words
    #[arg(long)]
    pub whole_word: bool,
}

impl SearchFlags {
    pub fn apply(&self, mut options: SearchOptions) -> SearchOptions {
        options.regex |= self.regex;
        options.match_case &= !self.ignore_case;
        options.whole_word |= self.whole_word;
        options
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the declaration outline of a file
    Outline {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print the declaration tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Navigate to a declaration name or free text and print the match
    #[command(
        long_about = "Resolves KEY through the declaration index and searches for the \
                      declaration's signature. Keys that name no declaration are searched \
                      as free text from the top of the file, wrapping once."
    )]
    Goto {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "KEY")]
        key: String,
        #[command(flatten)]
        search: SearchFlags,
    },
    /// List declaration names starting with a prefix
    Complete {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "PREFIX", default_value = "")]
        prefix: String,
    },
    /// Start an interactive shell on a file
    Shell {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        search: SearchFlags,
    },
}

pub fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ViewerConfig::default_path);
    let mut config = ViewerConfig::load(&config_path)?;

    let component = match &cli.command {
        Commands::Shell { .. } => "shell",
        _ => "cli",
    };
    let _guard = init_logging(component, &config.data_dir, cli.verbose);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Outline { file, json } => rt.block_on(outline(&file, json, &config)),
        Commands::Goto { file, key, search } => {
            config.search = search.apply(config.search);
            rt.block_on(goto(&file, &key, &config))
        }
        Commands::Complete { file, prefix } => rt.block_on(complete(&file, &prefix, &config)),
        Commands::Shell { file, search } => {
            config.search = search.apply(config.search);
            rt.block_on(shell::run(file, config))
        }
    }
}

/// Picks the declaration parser registered for `path`'s extension.
pub fn parser_for(path: &Path) -> Option<Arc<dyn DeclarationParser>> {
    let parsers: Vec<Arc<dyn DeclarationParser>> = vec![Arc::new(JavaDeclarationParser::new())];
    parsers.into_iter().find(|p| p.supports_path(path))
}

async fn open_view(
    file: &Path,
    config: &ViewerConfig,
) -> CliResult<(Arc<SourceView>, UnboundedReceiver<StatusEvent>)> {
    let parser = parser_for(file)
        .ok_or_else(|| format!("No parser registered for {}", file.display()))?;
    let (tx, rx) = mpsc::unbounded_channel();
    let view = SourceView::open(file, parser, config, Some(tx)).await?;
    Ok((view, rx))
}

async fn goto(file: &Path, key: &str, config: &ViewerConfig) -> CliResult<()> {
    let (view, mut status) = open_view(file, config).await?;
    render::drain_status(&mut status);

    let notification = view.navigate_to(NavigationRequest::Key(key.to_string()));
    if notification.is_found() {
        let excerpt = view.with_buffer(|buffer| {
            render::render_selection(buffer, config.context_lines, render::highlight_style())
        });
        println!("{}", excerpt);
    }
    render::drain_status(&mut status);
    Ok(())
}

async fn outline(file: &Path, json: bool, config: &ViewerConfig) -> CliResult<()> {
    let (view, _) = open_view(file, config).await?;
    let Some(loaded) = view.loaded() else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(loaded.model.roots())?);
    } else {
        println!("{}", shell::view::outline_table(loaded.outline.roots()));
    }
    Ok(())
}

async fn complete(file: &Path, prefix: &str, config: &ViewerConfig) -> CliResult<()> {
    let (view, _) = open_view(file, config).await?;
    for name in view.autocomplete_prefix(prefix) {
        println!("{}", name);
    }
    Ok(())
}
