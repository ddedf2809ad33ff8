//! RPM style versions consisting of an epoch, a version and a release.

use std::{
    cmp::Ordering,
    fmt,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

pub use segment::rpmvercmp;
use segment::Segments;

mod segment;

/// The epoch that is assumed when a version does not specify one.
const DEFAULT_EPOCH: &str = "0";

/// An RPM version `epoch:version-release`.
///
/// Each of the three parts is an arbitrary string and may be empty. An empty epoch is treated as
/// `0` for comparisons, an empty release is simply the smallest release. A version for which all
/// three parts are empty is used for capabilities that are provided without a version.
///
/// Versions are ordered by comparing the epoch, the version and the release in that order, each
/// with [`rpmvercmp`]. The equality and hash implementations agree with that order, so `1.01` and
/// `1.1` are the same version:
///
/// ```txt
///        1.0~rc1
///      < 1.0
///      < 1.0^git1
///      < 1.0.1
///      < 1.0.1-1
///      < 1.0.1-1.fc32
///      < 1:0.1
/// ```
///
/// The textual form is `[epoch:]version[-release]`. When displayed the epoch is always written
/// out, e.g. `0:2.31-4.fc32`.
#[derive(Clone, Default, Debug, SerializeDisplay, DeserializeFromStr)]
pub struct Version {
    epoch: String,
    version: String,
    release: String,
}

impl Version {
    /// Constructs a new version from its parts.
    pub fn new(
        epoch: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        Self {
            epoch: epoch.into(),
            version: version.into(),
            release: release.into(),
        }
    }

    /// Returns the epoch as written, which might be empty.
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Returns the epoch that is used for comparisons, `0` if none was specified.
    pub fn effective_epoch(&self) -> &str {
        if self.epoch.is_empty() {
            DEFAULT_EPOCH
        } else {
            &self.epoch
        }
    }

    /// Returns the version part.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the release part, which might be empty.
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Returns true if this version has a release part.
    pub fn has_release(&self) -> bool {
        !self.release.is_empty()
    }

    /// Returns true if neither an epoch, a version nor a release is set.
    pub fn is_empty(&self) -> bool {
        self.epoch.is_empty() && self.version.is_empty() && self.release.is_empty()
    }

    /// Returns a copy of this version with the release removed.
    ///
    /// A requirement like `glibc = 2.31` matches every release of `2.31`, which is implemented by
    /// comparing against the provided version without its release.
    #[must_use]
    pub fn without_release(&self) -> Self {
        Self {
            epoch: self.epoch.clone(),
            version: self.version.clone(),
            release: String::new(),
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        rpmvercmp(self.effective_epoch(), other.effective_epoch())
            .then_with(|| rpmvercmp(&self.version, &other.version))
            .then_with(|| rpmvercmp(&self.release, &other.release))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Two parts compare equal exactly when their segments are equal, so hashing the segments
        // keeps the hash consistent with `Eq`. The part count separates the three parts.
        for part in [self.effective_epoch(), &self.version, &self.release] {
            let mut count = 0usize;
            for segment in Segments::new(part) {
                segment.hash(state);
                count += 1;
            }
            count.hash(state);
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}:{}", self.effective_epoch(), self.version)?;
        if self.has_release() {
            write!(f, "-{}", self.release)?;
        }
        Ok(())
    }
}

/// An error that occurred while parsing a [`Version`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("cannot parse version '{version}': {kind}")]
pub struct ParseVersionError {
    /// The string that failed to parse.
    pub version: String,

    /// The reason parsing failed.
    pub kind: ParseVersionErrorKind,
}

/// The reason a [`Version`] could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseVersionErrorKind {
    /// The epoch contains something else than digits.
    #[error("epoch '{0}' is not a number")]
    InvalidEpoch(String),

    /// An epoch or release was given but the version itself is missing.
    #[error("missing version")]
    MissingVersion,

    /// The version contains whitespace.
    #[error("unexpected whitespace")]
    Whitespace,
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |kind| ParseVersionError {
            version: s.to_string(),
            kind,
        };

        if s.is_empty() {
            return Ok(Version::default());
        }
        if s.contains(char::is_whitespace) {
            return Err(error(ParseVersionErrorKind::Whitespace));
        }

        let (epoch, rest) = match s.split_once(':') {
            Some((epoch, rest)) => {
                if epoch.is_empty() || !epoch.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(error(ParseVersionErrorKind::InvalidEpoch(
                        epoch.to_string(),
                    )));
                }
                (epoch, rest)
            }
            None => ("", s),
        };

        let (version, release) = rest.rsplit_once('-').unwrap_or((rest, ""));
        if version.is_empty() {
            return Err(error(ParseVersionErrorKind::MissingVersion));
        }

        Ok(Version::new(epoch, version, release))
    }
}
