use std::path::{Path, PathBuf};

use async_std::io::ReadExt;
use async_trait::async_trait;
use clap::Args;
use colored::*;
use miette::{IntoDiagnostic, Result, WrapErr};
use oro_config::{layered_value, ArgMatches, OroConfig, OroConfigLayer};
use oro_package_json::{Package, PackageJsonParser};
use serde::Serialize;

use crate::commands::OroCommand;
use crate::error::OroSbomError;

const STDIN: &str = "-";

#[derive(Debug, Args)]
/// Extract package records from one or more package.json manifests.
#[clap(visible_aliases(["x"]))]
pub struct ExtractCmd {
    /// package.json files, or directories containing one. Use `-` to read
    /// a manifest from stdin. Defaults to the package.json in `--root`.
    #[arg()]
    paths: Vec<PathBuf>,

    /// Log and skip manifests that can't be read or decoded instead of
    /// failing.
    #[arg(long)]
    keep_going: bool,

    #[arg(from_global)]
    root: Option<PathBuf>,

    #[arg(from_global)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Extracted {
    path: PathBuf,
    package: Option<Package>,
}

impl ExtractCmd {
    fn manifest_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            let root = self.root.clone().unwrap_or_else(|| PathBuf::from("."));
            return vec![root.join("package.json")];
        }
        self.paths
            .iter()
            .map(|path| {
                if path.is_dir() {
                    path.join("package.json")
                } else {
                    path.clone()
                }
            })
            .collect()
    }

    async fn read_manifest(path: &Path) -> Result<Vec<u8>, OroSbomError> {
        if path == Path::new(STDIN) {
            let mut buf = Vec::new();
            async_std::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(|e| OroSbomError::ManifestReadError(e, path.to_owned()))?;
            Ok(buf)
        } else {
            async_std::fs::read(path)
                .await
                .map_err(|e| OroSbomError::ManifestReadError(e, path.to_owned()))
        }
    }

    async fn extract(
        parser: &PackageJsonParser,
        path: &Path,
    ) -> Result<Option<Package>, OroSbomError> {
        let bytes = Self::read_manifest(path).await?;
        parser
            .parse(&bytes[..])
            .map_err(|source| OroSbomError::ManifestDecodeError {
                path: path.to_owned(),
                source,
            })
    }

    fn print_human(extracted: &[Extracted]) {
        for Extracted { path, package } in extracted {
            match package {
                Some(Package {
                    library,
                    dependencies,
                    optional_dependencies,
                }) => {
                    let license = if library.license.is_empty() {
                        "no license".dimmed()
                    } else {
                        library.license.green()
                    };
                    // name@version | license | deps: 1 | optional: 0
                    println!(
                        "{} | {} | deps: {} | optional: {}",
                        library.id.bright_green().underline(),
                        license,
                        dependencies.len().to_string().cyan(),
                        optional_dependencies.len().to_string().yellow(),
                    );
                }
                None => println!("{}: {}", path.display(), "no package found".dimmed()),
            }
        }
    }
}

#[async_trait]
impl OroCommand for ExtractCmd {
    async fn execute(self) -> Result<()> {
        let parser = PackageJsonParser::new();
        let mut extracted = Vec::new();
        for path in self.manifest_paths() {
            tracing::debug!("Extracting package from {}", path.display());
            match Self::extract(&parser, &path).await {
                Ok(package) => {
                    match &package {
                        Some(pkg) => {
                            tracing::info!("Found {} in {}", pkg.library, path.display())
                        }
                        None => tracing::debug!(
                            "{} carries no package information",
                            path.display()
                        ),
                    }
                    extracted.push(Extracted { path, package });
                }
                Err(err) if self.keep_going => {
                    tracing::warn!("Skipping {}: {err}", path.display());
                }
                Err(err) => return Err(err.into()),
            }
        }
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&extracted)
                    .into_diagnostic()
                    .wrap_err("extract::json_serialize")?
            );
        } else {
            Self::print_human(&extracted);
        }
        Ok(())
    }
}

impl OroConfigLayer for ExtractCmd {
    fn layer_config(&mut self, args: &ArgMatches, conf: &OroConfig) -> Result<()> {
        if let Some(keep_going) = layered_value(args, conf, "keep_going")? {
            self.keep_going = keep_going;
        }
        if let Some(json) = layered_value(args, conf, "json")? {
            self.json = json;
        }
        Ok(())
    }
}
