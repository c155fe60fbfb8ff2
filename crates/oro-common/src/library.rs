use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity and license information for a single package, as handed to SBOM
/// consumers.
///
/// `id` is always derived from `name` and `version` through [`package_id`],
/// so two records with the same name and version share the same id and can
/// be used as a join key downstream.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    pub version: String,
    pub license: String,
}

impl Library {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        Library {
            id: package_id(&name, &version),
            name,
            version,
            license: license.into(),
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Builds the stable identifier for a `name`/`version` pair.
///
/// The separator is the last `@` in the id, so scoped names such as
/// `@babel/core` stay unambiguous. An empty version still produces a
/// distinct id (`name@`).
pub fn package_id(name: &str, version: &str) -> String {
    format!("{name}@{version}")
}
