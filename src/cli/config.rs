use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::collect::options::OptionsPatch;
use crate::screen::classifier::ClassifierMode;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "screen-index",
    version,
    about = "Index the interactive and textual elements of a rendered page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: screen-index.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect a snapshot from a page dump and print it
    Collect {
        #[command(flatten)]
        args: CollectArgs,

        /// Output format: json, console
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Collect with highlighting and write the annotated page dump
    Overlay {
        #[command(flatten)]
        args: CollectArgs,

        /// Where to write the annotated page dump (JSON)
        #[arg(short, long)]
        output: String,
    },
}

/// Options shared by every command that runs a collection pass.
#[derive(Args, Debug, Clone, Default)]
pub struct CollectArgs {
    /// Page dump to read (JSON, or YAML for .yaml/.yml)
    #[arg(long)]
    pub page: String,

    /// Include elements outside the viewport
    #[arg(long)]
    pub all: bool,

    /// Grow the viewport by this many px on every side
    #[arg(long)]
    pub expand: Option<f64>,

    /// Keep only the element with this discovery index
    #[arg(long, allow_negative_numbers = true)]
    pub focus: Option<i64>,

    /// Classifier capability set
    #[arg(long, value_enum)]
    pub mode: Option<ClassifierMode>,

    /// Do not draw the overlay
    #[arg(long)]
    pub no_highlight: bool,

    /// Log per-pass diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Append a JSON line per pass to this file
    #[arg(long)]
    pub trace: Option<String>,
}

impl CollectArgs {
    /// Only flags actually given on the command line end up in the patch.
    pub fn to_patch(&self) -> OptionsPatch {
        OptionsPatch {
            highlight: self.no_highlight.then_some(false),
            viewport_only: self.all.then_some(false),
            viewport_expansion: self.expand,
            debug: self.debug.then_some(true),
            focus_index: self.focus,
            mode: self.mode,
        }
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `screen-index.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub collect: CollectConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectConfig {
    pub highlight: Option<bool>,
    pub viewport_only: Option<bool>,
    pub viewport_expansion: Option<f64>,
    pub debug: Option<bool>,
    pub focus_index: Option<i64>,
    pub mode: Option<String>,
}

impl CollectConfig {
    pub fn to_patch(&self) -> OptionsPatch {
        OptionsPatch {
            highlight: self.highlight,
            viewport_only: self.viewport_only,
            viewport_expansion: self.viewport_expansion,
            debug: self.debug,
            focus_index: self.focus_index,
            mode: self.mode.as_deref().map(ClassifierMode::from_name),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("screen-index.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// CLI flags win over the config file, which wins over built-in defaults.
pub fn build_options_patch(config: &AppConfig, args: &CollectArgs) -> OptionsPatch {
    config.collect.to_patch().merge(&args.to_patch())
}

/// Trace file: `--trace` first, then `trace.path` from the config file.
pub fn resolve_trace_path<'a>(config: &'a AppConfig, args: &'a CollectArgs) -> Option<&'a str> {
    args.trace.as_deref().or(config.trace.path.as_deref())
}
