use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{ComparisonFlag, Entry, Version};

/// A single candidate package as found in a repository.
///
/// A package by convention provides a capability with its own name and version. The resolver
/// never modifies a package, it only refers to it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// The name of the package
    pub name: String,

    /// The version of the package
    #[serde(default)]
    pub version: Version,

    /// The capabilities this package provides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<Entry>,

    /// The capabilities this package needs to be installed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Entry>,

    /// The capabilities that cannot be installed together with this package
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Entry>,

    /// The paths of the files shipped by this package
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl Package {
    /// Constructs a package that provides nothing but itself.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        let name = name.into();
        Self {
            provides: vec![Entry::new(name.clone(), ComparisonFlag::Eq, version.clone())],
            name,
            version,
            requires: Vec::new(),
            conflicts: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Returns true if one of the provides of this package carries the name of the package.
    pub fn provides_self(&self) -> bool {
        self.provides.iter().any(|entry| entry.name == self.name)
    }
}

impl Display for Package {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.version.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}-{}", self.name, self.version)
        }
    }
}
