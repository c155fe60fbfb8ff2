//! Layered configuration for oro-sbom.
//!
//! Values are looked up, from lowest to highest precedence, in the global
//! config file, `ORO_SBOM_*` environment variables, and rc files in the
//! package root. Anything given explicitly on the command line wins over all
//! of them.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use clap::parser::ValueSource;
pub use clap::ArgMatches;
pub use config::Config as OroConfig;
use config::{Environment, File};
use miette::Result;

pub use error::OroConfigError;

mod error;

const ENV_PREFIX: &str = "oro_sbom";

pub trait OroConfigLayer {
    fn layer_config(&mut self, _matches: &ArgMatches, _config: &OroConfig) -> Result<()> {
        Ok(())
    }
}

/// Looks up `key` in `config`, unless the argument with the same id was
/// passed on the command line.
pub fn layered_value<T>(
    matches: &ArgMatches,
    config: &OroConfig,
    key: &str,
) -> Result<Option<T>, OroConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    if matches.value_source(key) == Some(ValueSource::CommandLine) {
        return Ok(None);
    }
    match config.get_string(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| OroConfigError::ConfigParseError {
                key: key.into(),
                value,
                msg: e.to_string(),
            }),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub struct OroConfigOptions {
    global: bool,
    env: bool,
    pkg_root: Option<PathBuf>,
    global_config_file: Option<PathBuf>,
}

impl Default for OroConfigOptions {
    fn default() -> Self {
        OroConfigOptions {
            global: true,
            env: true,
            pkg_root: None,
            global_config_file: None,
        }
    }
}

impl OroConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn env(mut self, env: bool) -> Self {
        self.env = env;
        self
    }

    pub fn pkg_root(mut self, root: Option<PathBuf>) -> Self {
        self.pkg_root = root;
        self
    }

    pub fn global_config_file(mut self, file: Option<PathBuf>) -> Self {
        self.global_config_file = file;
        self
    }

    pub fn load(self) -> Result<OroConfig, OroConfigError> {
        let mut builder = OroConfig::builder();
        if self.global {
            if let Some(config_file) = self.global_config_file {
                let path = config_file.display().to_string();
                builder = builder.add_source(File::with_name(&path[..]).required(false));
            }
        }
        if self.env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));
        }
        if let Some(root) = self.pkg_root {
            for name in ["orosbomrc", ".orosbomrc", "orosbomrc.toml", ".orosbomrc.toml"] {
                builder = builder.add_source(
                    File::with_name(&root.join(name).display().to_string()).required(false),
                );
            }
        }
        Ok(builder.build()?)
    }
}
