//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use svelte_emitter::TranspileOptions;

/// Convert React function components into Svelte 5 components.
#[derive(Debug, Parser)]
#[command(name = "react2svelte")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Component files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<Utf8PathBuf>,

    /// Write generated files into this directory instead of next to their inputs
    #[arg(short, long)]
    pub out_dir: Option<Utf8PathBuf>,

    /// Print the generated document instead of writing it (single input only)
    #[arg(long)]
    pub stdout: bool,

    /// Convert without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a react2svelte.json configuration file
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Glob patterns to ignore when walking directories
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Carry non-React imports into the generated script
    #[arg(long)]
    pub keep_imports: bool,

    /// Leave out the `// Props`, `// State`, ... section headers
    #[arg(long)]
    pub no_section_comments: bool,

    /// Script language attribute; pass an empty string for plain JavaScript
    #[arg(long)]
    pub script_lang: Option<String>,

    /// Element that replaces `<>...</>` fragments
    #[arg(long)]
    pub fragment_element: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print per-file timings to stderr
    #[arg(long)]
    pub timings: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per file plus a summary (default)
    #[default]
    Human,
    /// A single JSON summary object
    Json,
}

impl Args {
    /// Log level selected by the `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Applies command-line overrides on top of configured options.
    pub fn apply_overrides(&self, options: &mut TranspileOptions) {
        if self.keep_imports {
            options.generate.emit_imports = true;
        }
        if self.no_section_comments {
            options.generate.section_comments = false;
        }
        if let Some(lang) = &self.script_lang {
            options.generate.script_lang = lang.clone();
        }
        if let Some(element) = &self.fragment_element {
            options.markup.fragment_element = element.clone();
        }
    }
}
