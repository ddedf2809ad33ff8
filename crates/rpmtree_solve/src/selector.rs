//! Tracks the newest package per name and narrows a batch of packages down to those.

use indexmap::IndexMap;
use rpmtree_types::Package;

use crate::CandidateSelection;

/// The version maximal package for every package name seen so far.
#[derive(Default)]
pub(crate) struct BestCandidates<'a> {
    best: IndexMap<&'a str, &'a Package>,
}

impl<'a> BestCandidates<'a> {
    /// Records a package. It replaces the current best candidate only if it is strictly newer, so
    /// on ties the package seen first wins.
    pub fn record(&mut self, package: &'a Package) {
        match self.best.get_mut(package.name.as_str()) {
            Some(best) => {
                if package.version > best.version {
                    *best = package;
                }
            }
            None => {
                self.best.insert(&package.name, package);
            }
        }
    }

    /// Returns the newest package with the given name.
    pub fn get(&self, name: &str) -> Option<&'a Package> {
        self.best.get(name).copied()
    }

    /// Returns true if `package` is the best candidate for its name.
    pub fn is_best(&self, package: &Package) -> bool {
        self.get(&package.name)
            .is_some_and(|best| std::ptr::eq(best, package))
    }

    /// Records all packages of a batch and returns the ones that take part in the formula, in
    /// the order they were given in.
    pub fn select(
        &mut self,
        packages: Vec<&'a Package>,
        selection: CandidateSelection,
    ) -> Vec<&'a Package> {
        for &package in &packages {
            self.record(package);
        }

        match selection {
            CandidateSelection::AllVersions => packages,
            CandidateSelection::BestOnly => packages
                .into_iter()
                .filter(|package| self.is_best(package))
                .collect(),
        }
    }
}
