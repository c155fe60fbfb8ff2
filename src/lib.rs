use std::path::PathBuf;

use async_trait::async_trait;
use clap::{ArgMatches, CommandFactory, FromArgMatches as _, Parser, Subcommand};
use directories::ProjectDirs;
use miette::{IntoDiagnostic, Result};
use oro_config::{layered_value, OroConfig, OroConfigLayer, OroConfigOptions};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use commands::extract::ExtractCmd;
use commands::OroCommand;

pub use error::OroSbomError;

mod commands;
mod error;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct OroSbom {
    /// Package path to operate on
    #[arg(global = true, long = "root")]
    root: Option<PathBuf>,

    /// File to read configuration values from.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    /// Log output level/directive. Supports plain loglevels (off, error,
    /// warn, info, debug, trace) as well as more advanced directives in the
    /// format `target[span{field=value}]=level`.
    #[clap(global = true, long, default_value = "warn")]
    loglevel: String,

    /// Disable all log output
    #[arg(global = true, long, short)]
    quiet: bool,

    /// Format output as JSON.
    #[arg(global = true, long)]
    json: bool,

    #[command(subcommand)]
    subcommand: OroSbomCmd,
}

impl OroSbom {
    fn setup_logging(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(
                EnvFilter::builder()
                    .with_default_directive(if self.quiet {
                        LevelFilter::OFF.into()
                    } else {
                        self.loglevel.parse().into_diagnostic()?
                    })
                    .from_env_lossy(),
            )
            .init();
        Ok(())
    }

    pub async fn load() -> Result<()> {
        let start = std::time::Instant::now();
        let matches = OroSbom::command().get_matches();
        let mut oro = OroSbom::from_arg_matches(&matches).into_diagnostic()?;
        let cfg = if let Some(file) = &oro.config {
            OroConfigOptions::new()
                .global_config_file(Some(file.clone()))
                .pkg_root(oro.root.clone())
                .load()?
        } else {
            OroConfigOptions::new()
                .global_config_file(
                    ProjectDirs::from("", "", "oro-sbom")
                        .map(|d| d.config_dir().to_owned().join("orosbomrc.toml")),
                )
                .pkg_root(oro.root.clone())
                .load()?
        };
        oro.layer_config(&matches, &cfg)?;
        oro.setup_logging()?;
        oro.execute().await?;
        tracing::info!("Ran in {}s", start.elapsed().as_millis() as f32 / 1000.0);
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum OroSbomCmd {
    /// Extract package records from one or more package.json manifests.
    Extract(ExtractCmd),
}

#[async_trait]
impl OroCommand for OroSbom {
    async fn execute(self) -> Result<()> {
        tracing::debug!("Running command: {:#?}", self.subcommand);
        match self.subcommand {
            OroSbomCmd::Extract(extract) => extract.execute().await,
        }
    }
}

impl OroConfigLayer for OroSbom {
    fn layer_config(&mut self, args: &ArgMatches, conf: &OroConfig) -> Result<()> {
        if let Some(loglevel) = layered_value(args, conf, "loglevel")? {
            self.loglevel = loglevel;
        }
        if let Some(json) = layered_value(args, conf, "json")? {
            self.json = json;
        }
        match self.subcommand {
            OroSbomCmd::Extract(ref mut extract) => {
                if let Some(matches) = args.subcommand_matches("extract") {
                    extract.layer_config(matches, conf)?;
                }
                Ok(())
            }
        }
    }
}
