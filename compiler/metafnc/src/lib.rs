//! metafn - command-line driver.
//!
//! Plays the host build for the generator: every source path given on the
//! command line is discovered and handed to the [`Processor`] as one
//! round, then a final empty round triggers emission. A file reachable
//! from several source paths is scanned once, in the first round that
//! reaches it.

mod cli;
mod report;
mod sources;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use metafn_gen::{DirectoryFiler, Filer, MemoryFiler, ProcessError, Processor, Round, RoundOutcome};
use metafn_ir::{GeneratorConfig, MethodElement};
use metafn_java::SyntaxError;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

pub use cli::{Cli, Command, ConfigArgs};
pub use report::render_syntax_error;
pub use sources::java_files;

/// Everything that stops a run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk `{}`: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{}: {error}", path.display())]
    Syntax {
        path: PathBuf,
        /// Full text of the offending file, for rendering.
        text: String,
        error: SyntaxError,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("final round did not emit")]
    NotEmitted,
}

impl CliError {
    /// Human-readable report; syntax errors are drawn against their source.
    pub fn render(&self, color: bool) -> String {
        match self {
            CliError::Syntax { path, text, error } => {
                render_syntax_error(&path.display().to_string(), text, error, color)
            }
            other => format!("error: {other}\n"),
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise metafn crates log at `info`, or
/// `debug` when `verbose`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let fallback = if verbose { "metafn=debug" } else { "metafn=info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
            .with(filter)
            .try_init();
    });
}

/// Discover annotated methods in every Java file under `path`.
pub fn discover_path(path: &Path, config: &GeneratorConfig) -> Result<Vec<MethodElement>, CliError> {
    discover_files(&java_files(path)?, config)
}

fn discover_files(files: &[PathBuf], config: &GeneratorConfig) -> Result<Vec<MethodElement>, CliError> {
    let mut elements = Vec::new();
    for file in files {
        let text = fs::read_to_string(file).map_err(|source| CliError::Read {
            path: file.clone(),
            source,
        })?;
        let found = metafn_java::discover(&file.display().to_string(), &text, config)
            .map_err(|error| CliError::Syntax {
                path: file.clone(),
                text: text.clone(),
                error,
            })?;
        debug!(file = %file.display(), methods = found.len(), "scanned source");
        elements.extend(found);
    }
    Ok(elements)
}

/// Run every source path as one round, then a final empty round.
///
/// Returns the qualified names of the generated units.
pub fn process_sources(
    sources: &[PathBuf],
    config: &GeneratorConfig,
    filer: &mut dyn Filer,
) -> Result<Vec<String>, CliError> {
    let mut processor = Processor::new(config.clone());
    let mut scanned = FxHashSet::default();

    for source in sources {
        let files = unscanned(java_files(source)?, &mut scanned);
        let elements = discover_files(&files, config)?;
        processor.process(Round::new(&elements), filer)?;
    }

    match processor.process(Round::last(&[]), filer)? {
        RoundOutcome::Emitted { units, .. } => {
            info!(units = units.len(), "generation finished");
            Ok(units)
        }
        RoundOutcome::Collected { .. } => Err(CliError::NotEmitted),
    }
}

/// Drop files already in `scanned`, comparing canonical paths, and record
/// the rest.
fn unscanned(files: Vec<PathBuf>, scanned: &mut FxHashSet<PathBuf>) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|file| {
            let key = fs::canonicalize(file).unwrap_or_else(|_| file.clone());
            let fresh = scanned.insert(key);
            if !fresh {
                debug!(file = %file.display(), "source already scanned");
            }
            fresh
        })
        .collect()
}

/// `metafn generate`
pub fn generate(sources: &[PathBuf], out: &Path, config: &GeneratorConfig) -> Result<Vec<String>, CliError> {
    let mut filer = DirectoryFiler::new(out);
    process_sources(sources, config, &mut filer)
}

/// `metafn print`: generated units in name order.
pub fn print(sources: &[PathBuf], config: &GeneratorConfig) -> Result<String, CliError> {
    let mut filer = MemoryFiler::new();
    process_sources(sources, config, &mut filer)?;

    let mut out = String::new();
    for (index, (_, text)) in filer.into_files().into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&text);
    }
    Ok(out)
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate { sources, out, config } => {
            let units = generate(&sources, &out, &config.into_config())?;
            for unit in units {
                println!("{unit}");
            }
        }
        Command::Print { sources, config } => {
            print!("{}", print(&sources, &config.into_config())?);
        }
    }
    Ok(())
}
