use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use super::profiles::{ConfigCommand, run_config_command};
use super::templates::{TemplateCommand, run_template_command};
use crate::config::{Config, PipelineOptions, Profile, load_config};
use crate::filters::parse_filter_args;
use crate::inspect::{InspectOptions, inspect_file};
use crate::parsers::AliasTable;
use crate::pipeline::{Pipeline, wanted_fields};
use crate::render::colors::use_color;
use crate::render::{ColorMode, find_template, palette_for};
use crate::utils::{default_config_path, format_path_with_tilde};

#[derive(Parser)]
#[command(name = "jclog")]
#[command(version)]
#[command(about = "Parse JSON log files and display them with colors", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (default: ~/.jclog.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Configuration profile to use (default: the active profile)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(flatten)]
    pub render: RenderArgs,

    /// Log file to read (default: standard input)
    pub file: Option<PathBuf>,
}

/// Flags that override the selected profile
#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
    /// Output format, e.g. "{timestamp} [{level}] {message}"
    #[arg(long)]
    pub format: Option<String>,

    /// Use a built-in template as the format (see `jclog template list`)
    #[arg(long, conflicts_with = "format")]
    pub template: Option<String>,

    /// Fields to display when the format is empty, e.g. --format "" --fields=service,user
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Maximum depth for JSON parsing inside the message field
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Hide missing fields instead of marking them (--hide-missing=false to disable)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub hide_missing: Option<bool>,

    /// Only show logs matching field=value (repeatable)
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Hide logs matching field=value (repeatable)
    #[arg(long = "exclude", value_name = "FIELD=VALUE")]
    pub excludes: Vec<String>,

    /// Map numeric levels to names using the profile's level mappings
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub auto_convert_level: Option<bool>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a log file and show available fields
    Inspect {
        /// Log file to analyze
        file: PathBuf,

        /// Show only the base name of file paths
        #[arg(short, long)]
        basename: bool,
    },
    /// Manage configuration profiles
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Manage format templates
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Show version information
    Version,
}

impl RenderArgs {
    /// Merge these flags over `profile`; flags win when given
    pub fn resolve(&self, profile: &Profile) -> Result<PipelineOptions> {
        let mut options = PipelineOptions::from_profile(profile);

        if let Some(format) = &self.format {
            options.format = format.clone();
        } else if let Some(name) = &self.template {
            options.format = find_template(name)
                .ok_or_else(|| anyhow!("unknown template: {} (see `jclog template list`)", name))?
                .to_string();
        }
        if !self.fields.is_empty() {
            options.fields = self.fields.clone();
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        if let Some(hide_missing) = self.hide_missing {
            options.hide_missing = hide_missing;
        }
        if let Some(auto_convert_level) = self.auto_convert_level {
            options.auto_convert_level = auto_convert_level;
        }
        if !self.filters.is_empty() {
            options.filters = parse_filter_args(&self.filters);
        }
        if !self.excludes.is_empty() {
            options.excludes = parse_filter_args(&self.excludes);
        }

        Ok(options)
    }
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Profile named by `--profile`, else the active one; unknown names fall back to default
    pub fn selected_profile(&self, config: &Config) -> Profile {
        match &self.profile {
            Some(name) => {
                if !config.profiles.contains_key(name) {
                    warn!("Profile '{}' not found, using default", name);
                }
                config.profile_or_default(name)
            }
            None => config.active_profile(),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Inspect { file, basename }) => {
            let config = load_config(&cli.config_path()).context("failed to load config")?;
            let options = InspectOptions {
                basename: *basename,
                time_format: cli.selected_profile(&config).time_format,
                colored: use_color(cli.color),
            };
            inspect_file(file, &AliasTable::default(), &options, &mut io::stdout().lock())?;
        }
        Some(Commands::Config(command)) => {
            run_config_command(command, &cli.config_path())?;
        }
        Some(Commands::Template(command)) => {
            run_template_command(command, use_color(cli.color))?;
        }
        Some(Commands::Version) => {
            println!("jclog version {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            process_logs(&cli)?;
        }
    }

    Ok(())
}

fn process_logs(cli: &Cli) -> Result<()> {
    let config_path = cli.config_path();
    let config = load_config(&config_path).context("failed to load config")?;
    debug!("Using config {}", format_path_with_tilde(&config_path));

    let options = cli.render.resolve(&cli.selected_profile(&config))?;
    debug!("Format {:?}, fields {:?}", options.effective_format(), wanted_fields(&options));

    let pipeline = Pipeline::new(options, palette_for(cli.color));
    let stdout = io::stdout().lock();

    let stats = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open file: {}", path.display()))?;
            pipeline.run(BufReader::new(file), stdout)?
        }
        None => pipeline.run(io::stdin().lock(), stdout)?,
    };

    if stats.invalid > 0 {
        debug!("{} of {} lines were not valid JSON", stats.invalid, stats.lines);
    }
    Ok(())
}
