use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum OroConfigError {
    /// Failed to read or merge one of the configuration sources.
    #[error(transparent)]
    #[diagnostic(code(oro_config::config_error), url(docsrs))]
    ConfigError(#[from] config::ConfigError),

    /// A configuration value was present but could not be parsed into the
    /// type the option expects.
    #[error("Invalid value `{value}` for config key `{key}`: {msg}")]
    #[diagnostic(code(oro_config::parse_error), url(docsrs))]
    ConfigParseError {
        key: String,
        value: String,
        msg: String,
    },
}
