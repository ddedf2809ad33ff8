use std::str::FromStr;

use rpmtree_types::{Entry, Package, Version};

/// Builds test packages. Like in repository metadata every package provides itself at its own
/// version.
#[derive(Clone)]
pub struct PackageBuilder {
    package: Package,
}

impl PackageBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            package: Package::new(name, Version::from_str("1").unwrap()),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        let version = Version::from_str(version).unwrap();
        let name = self.package.name.clone();
        for entry in self.package.provides.iter_mut().filter(|e| e.name == name) {
            if entry.is_versioned() {
                entry.version = version.clone();
            }
        }
        self.package.version = version;
        self
    }

    pub fn provides(mut self, entries: impl IntoIterator<Item = &'static str>) -> Self {
        self.package.provides.extend(parse(entries));
        self
    }

    pub fn requires(mut self, entries: impl IntoIterator<Item = &'static str>) -> Self {
        self.package.requires.extend(parse(entries));
        self
    }

    pub fn conflicts(mut self, entries: impl IntoIterator<Item = &'static str>) -> Self {
        self.package.conflicts.extend(parse(entries));
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = &'static str>) -> Self {
        self.package.files.extend(files.into_iter().map(String::from));
        self
    }

    pub fn build(self) -> Package {
        self.package
    }
}

fn parse(entries: impl IntoIterator<Item = &'static str>) -> impl Iterator<Item = Entry> {
    entries
        .into_iter()
        .map(|entry| Entry::from_str(entry).unwrap())
}
