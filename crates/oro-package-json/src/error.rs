use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum OroPackageJsonError {
    /// The manifest was not valid JSON, or it was JSON of the wrong shape:
    /// not an object, or a `name`, `version` or dependency map of the wrong
    /// type.
    ///
    /// Refer to the error message for the line and column of the problem.
    #[error("Failed to decode package.json: {0}")]
    #[diagnostic(
        code(oro_package_json::decode_error),
        url(docsrs),
        help("package.json must be a single JSON object.")
    )]
    DecodeError(#[from] serde_json::Error),
}
