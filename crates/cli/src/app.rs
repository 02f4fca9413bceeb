//! Single resolve invocation: load, resolve, render

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use config::{ConfigLoader, ResolvedConfig, ThemeDefaults};
use resolver::ConfigResolver;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "theme-resolve",
    version,
    about = "Validate a theme configuration and print it merged over the framework defaults"
)]
pub struct Args {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, env = "THEME_RESOLVER_CONFIG", default_value = "theme.config.yaml")]
    pub config: PathBuf,

    /// Theme defaults file; the built-in framework theme is used when omitted
    #[arg(short, long)]
    pub defaults: Option<PathBuf>,

    /// Start from an empty theme instead of the built-in framework theme
    #[arg(long, conflicts_with = "defaults")]
    pub bare: bool,

    /// Output format of the resolved configuration
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Only validate, print a summary instead of the resolved configuration
    #[arg(long)]
    pub check: bool,

    /// Write a starter configuration to the config path and exit
    #[arg(long, conflicts_with = "check")]
    pub init: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// One invocation of the resolver
pub struct Application {
    args: Args,
}

impl Application {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Run the invocation, writing results to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.args.init {
            return self.init(out);
        }

        let raw = ConfigLoader::load(&self.args.config).with_context(|| {
            format!("Failed to load configuration from {}", self.args.config.display())
        })?;
        info!("Configuration loaded from: {}", self.args.config.display());

        let defaults = self.defaults()?;

        let (resolved, report) = ConfigResolver::new()
            .resolve_with_report(&raw, &defaults)
            .context("Failed to resolve configuration")?;

        if self.args.check {
            writeln!(
                out,
                "{}: {} content patterns, {} plugins. {}",
                self.args.config.display(),
                resolved.content.len(),
                resolved.plugins.len(),
                report.summary()
            )?;
            for issue in &report.warnings {
                writeln!(out, "warning: {}: {}", issue.field, issue.message)?;
            }
            return Ok(());
        }

        self.render(&resolved, out)
    }

    fn defaults(&self) -> Result<ThemeDefaults> {
        if self.args.bare {
            return Ok(ThemeDefaults::empty());
        }

        match &self.args.defaults {
            Some(path) => ConfigLoader::load_defaults(path),
            None => Ok(ThemeDefaults::framework()),
        }
    }

    fn render<W: Write>(&self, resolved: &ResolvedConfig, out: &mut W) -> Result<()> {
        let rendered = match self.args.output {
            OutputFormat::Json => serde_json::to_string_pretty(resolved)
                .context("Failed to serialize resolved configuration")?,
            OutputFormat::Yaml => serde_yaml::to_string(resolved)
                .context("Failed to serialize resolved configuration")?,
        };
        writeln!(out, "{}", rendered.trim_end())?;
        Ok(())
    }

    fn init<W: Write>(&self, out: &mut W) -> Result<()> {
        let path = &self.args.config;
        if path.exists() {
            bail!("Refusing to overwrite existing configuration {}", path.display());
        }

        ConfigLoader::create_example(path)?;
        writeln!(out, "Wrote starter configuration to {}", path.display())?;
        Ok(())
    }
}
