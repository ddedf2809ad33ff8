#![deny(missing_docs)]

//! `rpmtree_solve` resolves a consistent set of RPM packages from a set of requested package
//! names. The dependency information of the candidates is translated into a boolean formula which
//! is decided by one of the SAT backends, the [`Resolver`] ties everything together.

mod arena;
pub mod brute_force;
mod clause;
mod formula;
mod id;
mod matcher;
mod mus;
mod resolver;
pub mod sat;
mod selector;
mod variable;
#[cfg(feature = "varisat")]
pub mod varisat;

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rpmtree_types::{Entry, Package};

pub use id::VarId;
pub use mus::{MinimalUnsatSubset, UnsatClause};
pub use resolver::Resolver;
pub use sat::{Assignment, CnfProblem, SatError, SatSolver};

/// The SAT backend used by [`Resolver::new`].
#[cfg(feature = "varisat")]
pub type DefaultSolver = crate::varisat::Solver;

/// The SAT backend used by [`Resolver::new`].
#[cfg(not(feature = "varisat"))]
pub type DefaultSolver = crate::brute_force::Solver;

/// Which versions of a package take part in the resolution.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CandidateSelection {
    /// Only the newest version of every package name is considered.
    #[default]
    BestOnly,

    /// All versions are considered. The resolver can pick an older version if that is the only
    /// way to satisfy the requirements.
    AllVersions,
}

/// The outcome of a successful [`Resolver::resolve`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Resolution<'a> {
    /// The packages to install, in the order they were loaded.
    pub install: Vec<&'a Package>,

    /// The loaded candidates that are not installed, in the order they were loaded.
    pub excluded: Vec<&'a Package>,
}

/// A requirement of a package that no package in the pool provides.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnresolvableRequirement {
    /// The identity of the requiring package, e.g. `testa-0:1`.
    pub package: String,

    /// The requirement that could not be matched.
    pub requirement: Entry,
}

impl Display for UnresolvableRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} requires {}", self.package, self.requirement)
    }
}

/// Represents an error when resolving the requested packages
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// A requested package name is not provided by any candidate.
    #[error("package {0} does not exist")]
    UnknownPackage(String),

    /// Some requirements of the candidates are not provided by anything. No solving was attempted.
    #[error("cannot satisfy requirements: {}", .0.iter().format(", "))]
    UnresolvableRequirements(Vec<UnresolvableRequirement>),

    /// There is no set of packages that satisfies the requirements.
    #[error("no solution found")]
    Unsatisfiable,

    /// The formula has a solution, so there is nothing to explain.
    #[error("the requirements are satisfiable")]
    Satisfiable,

    /// The SAT backend failed.
    #[error(transparent)]
    Backend(#[from] SatError),
}
