use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use crate::{ParseVersionError, Version};

/// The comparison operator of a versioned capability, e.g. the `GE` in `glibc >= 2.31`.
///
/// The names of the variants follow the spelling used in RPM repository metadata.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ComparisonFlag {
    /// The capability is unversioned.
    #[default]
    None,
    /// `=`
    Eq,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `>`
    Gt,
}

impl ComparisonFlag {
    /// Returns true if a provided version that compares to the required version with the given
    /// `ordering` satisfies this flag.
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            ComparisonFlag::None => true,
            ComparisonFlag::Eq => ordering.is_eq(),
            ComparisonFlag::Le => ordering.is_le(),
            ComparisonFlag::Ge => ordering.is_ge(),
            ComparisonFlag::Lt => ordering.is_lt(),
            ComparisonFlag::Gt => ordering.is_gt(),
        }
    }

    /// Returns the spelling used in repository metadata, e.g. `GE`.
    pub fn as_rpm_str(self) -> &'static str {
        match self {
            ComparisonFlag::None => "",
            ComparisonFlag::Eq => "EQ",
            ComparisonFlag::Le => "LE",
            ComparisonFlag::Ge => "GE",
            ComparisonFlag::Lt => "LT",
            ComparisonFlag::Gt => "GT",
        }
    }

    /// Returns the operator spelling used in spec files, e.g. `>=`.
    pub fn as_operator(self) -> &'static str {
        match self {
            ComparisonFlag::None => "",
            ComparisonFlag::Eq => "=",
            ComparisonFlag::Le => "<=",
            ComparisonFlag::Ge => ">=",
            ComparisonFlag::Lt => "<",
            ComparisonFlag::Gt => ">",
        }
    }
}

impl Display for ComparisonFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_operator())
    }
}

/// The comparison flag is not one of the known operators.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("can't interpret flags value '{0}'")]
pub struct ParseComparisonFlagError(pub String);

impl FromStr for ComparisonFlag {
    type Err = ParseComparisonFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" => ComparisonFlag::None,
            "EQ" | "=" | "==" => ComparisonFlag::Eq,
            "LE" | "<=" => ComparisonFlag::Le,
            "GE" | ">=" => ComparisonFlag::Ge,
            "LT" | "<" => ComparisonFlag::Lt,
            "GT" | ">" => ComparisonFlag::Gt,
            _ => return Err(ParseComparisonFlagError(s.to_string())),
        })
    }
}

/// One line of the provides, requires or conflicts list of a package: a capability name with an
/// optional version constraint.
///
/// The textual form is `name` or `name <op> version`, e.g. `libc.so.6(GLIBC_2.2.5)(64bit)` or
/// `glibc-common = 2.31-4.fc32`.
///
/// A rich dependency such as `(foo or bar >= 2)` is not interpreted. The whole text becomes the
/// name of an unversioned entry, so nothing provides it and a requirement on it is unresolvable.
/// Names of plain entries cannot contain whitespace.
#[derive(Debug, Clone, Eq, PartialEq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Entry {
    /// The name of the capability.
    pub name: String,

    /// How the version of a provider is compared against [`Entry::version`].
    pub flag: ComparisonFlag,

    /// The version of the capability. Empty for unversioned entries.
    pub version: Version,
}

impl Entry {
    /// Constructs a versioned entry.
    pub fn new(name: impl Into<String>, flag: ComparisonFlag, version: Version) -> Self {
        Self {
            name: name.into(),
            flag,
            version,
        }
    }

    /// Constructs an entry without a version.
    pub fn unversioned(name: impl Into<String>) -> Self {
        Self::new(name, ComparisonFlag::None, Version::default())
    }

    /// Returns true if this entry constrains the version.
    pub fn is_versioned(&self) -> bool {
        self.flag != ComparisonFlag::None
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_versioned() {
            write!(f, "{} {} {}", self.name, self.flag, self.version)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// An error that occurred while parsing an [`Entry`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseEntryError {
    #[error("empty capability")]
    Empty,

    #[error(transparent)]
    InvalidFlag(#[from] ParseComparisonFlagError),

    #[error("missing version after '{0}'")]
    MissingVersion(String),

    #[error(transparent)]
    InvalidVersion(#[from] ParseVersionError),

    #[error("unexpected '{0}' after the version")]
    TrailingInput(String),
}

impl FromStr for Entry {
    type Err = ParseEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('(') {
            return Ok(Entry::unversioned(s));
        }

        let mut tokens = s.split_whitespace();
        let name = tokens.next().ok_or(ParseEntryError::Empty)?;
        let Some(operator) = tokens.next() else {
            return Ok(Entry::unversioned(name));
        };

        let flag = ComparisonFlag::from_str(operator)?;
        let version = tokens
            .next()
            .ok_or_else(|| ParseEntryError::MissingVersion(operator.to_string()))?;
        if let Some(trailing) = tokens.next() {
            return Err(ParseEntryError::TrailingInput(trailing.to_string()));
        }

        Ok(Entry::new(name, flag, Version::from_str(version)?))
    }
}
