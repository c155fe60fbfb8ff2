//! General types for oro-sbom, including the decoded package.json document
//! and the package record handed to SBOM consumers.

pub use library::*;
pub use manifest::*;

mod library;
mod manifest;
