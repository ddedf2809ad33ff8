#![deny(missing_docs)]
//! `rpmtree_types` contains the data models the resolver works on: RPM style versions and their
//! ordering, the capabilities packages provide, require and conflict with, and the packages
//! themselves. The library itself doesnt provide any functionality besides parsing and comparing
//! the data types.

mod entry;
mod package;
pub mod version;

pub use entry::{ComparisonFlag, Entry, ParseComparisonFlagError, ParseEntryError};
pub use package::Package;
pub use version::{rpmvercmp, ParseVersionError, Version};
