use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::profile::DEFAULT_MAX_DEPTH;
use crate::config::{Config, Profile, load_config, save_config};
use crate::utils::format_path_with_tilde;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Show the active profile and all profiles
    Show,
    /// Add a profile, replacing one with the same name
    AddProfile(AddProfileArgs),
    /// Remove a profile
    RemoveProfile {
        /// Profile name
        #[arg(long)]
        name: String,
    },
    /// Set the active profile
    SetActive {
        /// Profile name
        #[arg(long)]
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct AddProfileArgs {
    /// Profile name
    #[arg(long)]
    pub name: String,

    /// Output format
    #[arg(long)]
    pub format: Option<String>,

    /// Additional fields to resolve
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Maximum depth for JSON parsing inside the message field
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Hide missing fields
    #[arg(long)]
    pub hide_missing: bool,

    /// Filter conditions (field=value)
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Exclude conditions (field=value)
    #[arg(long = "exclude")]
    pub excludes: Vec<String>,

    /// Map numeric levels to names
    #[arg(long)]
    pub auto_convert_level: bool,
}

impl AddProfileArgs {
    fn to_profile(&self) -> Profile {
        let defaults = Profile::default();
        Profile {
            format: self.format.clone().unwrap_or(defaults.format),
            fields: self.fields.clone(),
            max_depth: self.max_depth,
            hide_missing: self.hide_missing,
            filters: self.filters.clone(),
            excludes: self.excludes.clone(),
            auto_convert_level: self.auto_convert_level,
            ..defaults
        }
    }
}

pub fn run_config_command(command: &ConfigCommand, config_path: &Path) -> Result<()> {
    let mut stdout = io::stdout().lock();
    execute(command, config_path, &mut stdout)
}

fn execute<W: Write>(command: &ConfigCommand, config_path: &Path, out: &mut W) -> Result<()> {
    let shown_path = format_path_with_tilde(config_path);

    match command {
        ConfigCommand::Init { force } => {
            if config_path.exists() && !force {
                bail!("config file already exists: {} (use --force to overwrite)", shown_path);
            }
            save_config(&Config::default(), config_path).context("failed to save config")?;
            writeln!(out, "Created default configuration at {}", shown_path)?;
        }
        ConfigCommand::Show => {
            let config = load_config(config_path).context("failed to load config")?;
            write_config(out, &config)?;
        }
        ConfigCommand::AddProfile(args) => {
            let mut config = load_config(config_path).context("failed to load config")?;
            config.add_profile(&args.name, args.to_profile());
            save_config(&config, config_path).context("failed to save config")?;
            info!("Profile '{}' saved to {}", args.name, shown_path);
            writeln!(out, "Added profile '{}'", args.name)?;
        }
        ConfigCommand::RemoveProfile { name } => {
            let mut config = load_config(config_path).context("failed to load config")?;
            config.remove_profile(name)?;
            save_config(&config, config_path).context("failed to save config")?;
            writeln!(out, "Removed profile '{}'", name)?;
        }
        ConfigCommand::SetActive { name } => {
            let mut config = load_config(config_path).context("failed to load config")?;
            config.set_active(name)?;
            save_config(&config, config_path).context("failed to save config")?;
            writeln!(out, "Set active profile to '{}'", name)?;
        }
    }

    Ok(())
}

fn write_config<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(out, "Active profile: {}", config.active_profile)?;
    writeln!(out)?;
    writeln!(out, "Available profiles:")?;

    for (name, profile) in &config.profiles {
        writeln!(out)?;
        writeln!(out, "[{}]", name)?;
        writeln!(out, "  Format: {}", profile.format)?;
        writeln!(out, "  Fields: {:?}", profile.fields)?;
        writeln!(out, "  MaxDepth: {}", profile.max_depth)?;
        writeln!(out, "  HideMissing: {}", profile.hide_missing)?;
        writeln!(out, "  Filters: {:?}", profile.filters)?;
        writeln!(out, "  Excludes: {:?}", profile.excludes)?;
        writeln!(out, "  AutoConvertLevel: {}", profile.auto_convert_level)?;
    }
    Ok(())
}
