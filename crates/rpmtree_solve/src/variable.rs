//! The variable model: every capability and every file of a loaded package is represented by one
//! boolean variable.

use indexmap::IndexMap;
use rpmtree_types::{Package, Version};

use crate::arena::Arena;
use crate::id::VarId;

/// What a [`Variable`] stands for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VarKind {
    /// The package itself is installed. Exactly one per package.
    Package,
    /// Another capability the package provides.
    Resource,
    /// A file the package ships.
    File,
}

/// Identifies a capability of a specific package, e.g. `libc.so.6` of `glibc-0:2.31-4.fc32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct VarContext<'a> {
    pub package: &'a str,
    pub capability: &'a str,
    pub version: &'a Version,
}

impl<'a> VarContext<'a> {
    /// The context of the [`VarKind::Package`] variable of a package.
    fn of_package(package: &'a Package) -> Self {
        Self::of_capability(package, &package.name)
    }

    fn of_capability(package: &'a Package, capability: &'a str) -> Self {
        Self {
            package: &package.name,
            capability,
            version: &package.version,
        }
    }
}

/// A boolean variable of the formula.
#[derive(Debug, Clone)]
pub(crate) struct Variable<'a> {
    pub kind: VarKind,
    pub context: VarContext<'a>,
    pub package: &'a Package,
    /// The index of the owning package in [`VariablePool::packages`].
    pub group: usize,
    /// The version the capability is provided at. `None` for files.
    pub resource_version: Option<&'a Version>,
}

/// All variables that belong to a single package.
#[derive(Debug, Clone)]
pub(crate) struct PackageVars {
    pub package_var: VarId,
    /// All variables of the package, including [`PackageVars::package_var`], in creation order.
    pub members: Vec<VarId>,
}

/// Owns all variables of a resolution run together with the indices to look them up.
///
/// All indices iterate in insertion order so that everything derived from them is reproducible.
#[derive(Default)]
pub(crate) struct VariablePool<'a> {
    variables: Arena<VarId, Variable<'a>>,

    /// Maps a capability name to every variable that provides it.
    providers: IndexMap<&'a str, Vec<VarId>>,

    /// Maps the context of a package variable to all variables of that package.
    packages: IndexMap<VarContext<'a>, PackageVars>,
}

impl<'a> VariablePool<'a> {
    /// Generates the variables of a package. Returns the index of the package group, or `None` if
    /// a package with the same name and version was added before.
    pub fn add_package(&mut self, package: &'a Package) -> Option<usize> {
        let context = VarContext::of_package(package);
        if self.packages.contains_key(&context) {
            return None;
        }
        let group = self.packages.len();

        let mut package_var = None;
        let mut members = Vec::with_capacity(package.provides.len() + package.files.len() + 1);

        if !package.provides_self() {
            tracing::debug!("{package} does not provide itself");
            let id = self.alloc(VarKind::Package, context, package, group, Some(&package.version));
            package_var = Some(id);
            members.push(id);
        }

        for entry in &package.provides {
            let id = if entry.name == package.name && package_var.is_none() {
                let id = self.alloc(
                    VarKind::Package,
                    context,
                    package,
                    group,
                    Some(&package.version),
                );
                package_var = Some(id);
                id
            } else {
                self.alloc(
                    VarKind::Resource,
                    VarContext::of_capability(package, &entry.name),
                    package,
                    group,
                    Some(&entry.version),
                )
            };
            members.push(id);
        }

        for file in &package.files {
            let id = self.alloc(
                VarKind::File,
                VarContext::of_capability(package, file),
                package,
                group,
                None,
            );
            members.push(id);
        }

        let package_var = package_var?;
        for &member in &members {
            let capability = self.variables[member].context.capability;
            self.providers.entry(capability).or_default().push(member);
        }
        self.packages.insert(
            context,
            PackageVars {
                package_var,
                members,
            },
        );

        Some(group)
    }

    fn alloc(
        &mut self,
        kind: VarKind,
        context: VarContext<'a>,
        package: &'a Package,
        group: usize,
        resource_version: Option<&'a Version>,
    ) -> VarId {
        self.variables.alloc(Variable {
            kind,
            context,
            package,
            group,
            resource_version,
        })
    }

    /// Returns the variable with the given id.
    pub fn variable(&self, id: VarId) -> &Variable<'a> {
        &self.variables[id]
    }

    /// Returns all variables in creation order.
    pub fn variables(&self) -> impl Iterator<Item = (VarId, &Variable<'a>)> + '_ {
        self.variables.iter()
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns every variable that provides the capability with the given name.
    pub fn providers(&self, capability: &str) -> &[VarId] {
        self.providers
            .get(capability)
            .map_or(&[], |providers| providers.as_slice())
    }

    /// Returns the variables of the package group with the given index.
    pub fn group(&self, group: usize) -> &PackageVars {
        &self.packages[group]
    }

    /// Returns all package groups in load order.
    pub fn groups(&self) -> impl Iterator<Item = &PackageVars> + '_ {
        self.packages.values()
    }

    /// Returns the package a variable belongs to.
    pub fn package_of(&self, id: VarId) -> &'a Package {
        self.variables[id].package
    }
}
