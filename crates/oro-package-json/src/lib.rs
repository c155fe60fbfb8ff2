//! Extracts the package record an SBOM needs (name, version, license and
//! dependency constraints) from a single `package.json` document.
//!
//! ```
//! let pkg = oro_package_json::parse_str(
//!     r#"{"name": "left-pad", "version": "1.3.0", "license": "WTFPL"}"#,
//! )?
//! .expect("manifest describes a package");
//! assert_eq!(pkg.library.id, "left-pad@1.3.0");
//! assert_eq!(pkg.library.license, "WTFPL");
//! # Ok::<(), oro_package_json::OroPackageJsonError>(())
//! ```

use std::io::{BufReader, Read};

use indexmap::IndexMap;
use oro_common::{Library, PackageJson};
use serde::{Deserialize, Serialize};

pub use error::OroPackageJsonError;

mod error;

/// Name given to packages whose manifest has content worth recording but no
/// `name` field.
pub const NO_PACKAGE_NAME: &str = "no-package-name";

/// A package extracted from a `package.json`.
///
/// `library.name` is never empty.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(flatten)]
    pub library: Library,
    pub dependencies: IndexMap<String, String>,
    pub optional_dependencies: IndexMap<String, String>,
}

impl Package {
    /// Builds a package out of an already-decoded manifest.
    ///
    /// Returns `None` when the manifest has no name, no version, no license
    /// and no dependencies of either kind.
    pub fn from_package_json(pkg_json: PackageJson) -> Option<Self> {
        if pkg_json.is_empty() {
            return None;
        }
        let license = pkg_json.normalized_license();
        let PackageJson {
            name,
            version,
            dependencies,
            optional_dependencies,
            ..
        } = pkg_json;
        // Name and version are both optional in package.json. A nameless
        // manifest that still has a license or dependencies gets a
        // placeholder so the record stays addressable.
        let name = name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NO_PACKAGE_NAME.to_owned());
        Some(Package {
            library: Library::new(name, version.unwrap_or_default(), license),
            dependencies,
            optional_dependencies,
        })
    }
}

/// Stateless `package.json` parser. Safe to share between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonParser;

impl PackageJsonParser {
    pub fn new() -> Self {
        Self
    }

    /// Reads `reader` to the end and extracts the package it describes.
    ///
    /// `Ok(None)` means the document was valid but describes no package.
    /// Anything after the top-level JSON value other than whitespace is a
    /// decode error. Repeated keys resolve to their last value.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Option<Package>, OroPackageJsonError> {
        let pkg_json = PackageJson::from_reader(BufReader::new(reader))?;
        Ok(Package::from_package_json(pkg_json))
    }
}

/// Shorthand for [`PackageJsonParser::parse`].
pub fn parse<R: Read>(reader: R) -> Result<Option<Package>, OroPackageJsonError> {
    PackageJsonParser::new().parse(reader)
}

pub fn parse_slice(bytes: &[u8]) -> Result<Option<Package>, OroPackageJsonError> {
    PackageJsonParser::new().parse(bytes)
}

pub fn parse_str(json: &str) -> Result<Option<Package>, OroPackageJsonError> {
    parse_slice(json.as_bytes())
}
