//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use metafn_ir::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(name = "metafn")]
#[command(about = "Generate typed function overloads for @MetaMethod methods", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write generated sources under an output directory
    Generate {
        /// Java source files or directories; each one is a processing round
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Root of the generated source tree
        #[arg(short, long)]
        out: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print generated sources to stdout
    Print {
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Overrides for [`GeneratorConfig`].
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Qualified name of the marker annotation
    #[arg(long, value_name = "NAME")]
    pub marker: Option<String>,

    /// Qualified name of the wrapper type
    #[arg(long, value_name = "NAME")]
    pub wrapper: Option<String>,

    /// Static factory method on the wrapper
    #[arg(long, value_name = "METHOD")]
    pub factory: Option<String>,

    /// Qualified name of the function-shape container
    #[arg(long, value_name = "NAME")]
    pub shapes: Option<String>,

    /// Suffix appended to the originating type name
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,
}

impl ConfigArgs {
    /// Defaults with every given flag applied.
    pub fn into_config(self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(marker) = self.marker {
            config.marker = marker;
        }
        if let Some(wrapper) = self.wrapper {
            config.wrapper = wrapper;
        }
        if let Some(factory) = self.factory {
            config.factory = factory;
        }
        if let Some(shapes) = self.shapes {
            config.shapes = shapes;
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        config
    }
}
