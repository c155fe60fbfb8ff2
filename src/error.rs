use std::path::PathBuf;

use miette::Diagnostic;
use oro_package_json::OroPackageJsonError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum OroSbomError {
    /// A manifest could not be read from disk (or stdin).
    ///
    /// Check that the path exists and points at a `package.json` file or at a
    /// directory containing one.
    #[error("Failed to read manifest at `{}`", .1.display())]
    #[diagnostic(code(oro_sbom::extract::read), url(docsrs))]
    ManifestReadError(#[source] std::io::Error, PathBuf),

    /// A manifest was read but could not be decoded. Refer to the error
    /// message for the location of the problem.
    #[error("Failed to extract a package from `{}`", .path.display())]
    #[diagnostic(
        code(oro_sbom::extract::decode),
        url(docsrs),
        help("Pass --keep-going to skip manifests that fail to decode.")
    )]
    ManifestDecodeError {
        path: PathBuf,
        #[source]
        source: OroPackageJsonError,
    },
}
