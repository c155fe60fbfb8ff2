use std::io::Read;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The subset of a `package.json` document that matters for an SBOM.
///
/// Every field is optional, and `null` is treated the same as a missing key.
/// Keys not listed here are ignored. Use [`PackageJson::from_reader`] or
/// `str::parse` to decode a whole document: repeated keys there resolve to
/// the last occurrence, while the derived `Deserialize` rejects them.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    /// The name of the package.
    ///
    /// Workspace roots and private apps frequently leave this out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The version of the package. Kept as an opaque string: anything goes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseField>,

    #[serde(
        default,
        deserialize_with = "constraint_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub dependencies: IndexMap<String, String>,

    #[serde(
        default,
        deserialize_with = "constraint_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub optional_dependencies: IndexMap<String, String>,
}

impl PackageJson {
    /// Decodes a whole document from `reader`, which is read to the end.
    ///
    /// The top level must be a JSON object. When a key repeats, the last
    /// value wins.
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        let object: Map<String, Value> = serde_json::from_reader(reader)?;
        Self::deserialize(Value::Object(object))
    }

    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let object: Map<String, Value> = serde_json::from_slice(bytes)?;
        Self::deserialize(Value::Object(object))
    }

    /// The license, collapsed to a single string. See [`normalize_license`].
    pub fn normalized_license(&self) -> String {
        normalize_license(self.license.as_ref())
    }

    /// Whether the document carries anything worth recording besides its
    /// name and version.
    pub fn has_content(&self) -> bool {
        !self.normalized_license().is_empty()
            || !self.dependencies.is_empty()
            || !self.optional_dependencies.is_empty()
    }

    /// True when there is no name, no version and no content. Such a
    /// document describes no package at all.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().unwrap_or_default().is_empty()
            && self.version.as_deref().unwrap_or_default().is_empty()
            && !self.has_content()
    }
}

/// The `license` field, in any of the shapes found in the wild.
///
/// Modern manifests use an SPDX expression string. Older ones used an object
/// such as `{"type": "MIT", "url": "..."}`. Anything else is kept around as
/// raw JSON so that decoding never fails because of this field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LicenseField {
    Str(String),
    Legacy {
        #[serde(rename = "type")]
        license_type: String,
    },
    Other(Value),
}

impl LicenseField {
    pub fn normalize(&self) -> &str {
        match self {
            LicenseField::Str(license) => license,
            LicenseField::Legacy { license_type } => license_type,
            LicenseField::Other(_) => "",
        }
    }
}

/// Collapses a raw `license` field into a single string.
///
/// Strings are returned as-is, legacy objects yield their `type`, and
/// everything else (including a missing field) yields `""`.
pub fn normalize_license(raw: Option<&LicenseField>) -> String {
    raw.map(LicenseField::normalize)
        .unwrap_or_default()
        .to_owned()
}

impl FromStr for PackageJson {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

// A `null` map is an empty map, and a `null` constraint is an empty
// constraint.
fn constraint_map<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val: Option<IndexMap<String, Option<String>>> = Deserialize::deserialize(deserializer)?;
    Ok(val
        .unwrap_or_default()
        .into_iter()
        .map(|(name, constraint)| (name, constraint.unwrap_or_default()))
        .collect())
}
