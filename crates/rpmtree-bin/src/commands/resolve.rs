use std::path::{Path, PathBuf};

use anyhow::Context;
use rpmtree_solve::{CandidateSelection, ResolveError, Resolver};
use rpmtree_types::Package;

#[derive(Debug, clap::Parser)]
pub struct Opt {
    /// A JSON file containing the already merged package pool
    #[clap(long)]
    pool: PathBuf,

    /// Allow picking versions which are not the newest
    #[clap(long)]
    nobest: bool,

    /// Print the conflicting requirements if there is no solution
    #[clap(long)]
    explain: bool,

    /// Also print the candidates that are not installed
    #[clap(long)]
    excluded: bool,

    #[clap(required = true)]
    names: Vec<String>,
}

/// Reads a JSON array of packages.
fn read_pool(path: &Path) -> anyhow::Result<Vec<Package>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read package pool {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse package pool {}", path.display()))
}

pub fn resolve(opt: Opt) -> anyhow::Result<()> {
    let packages = read_pool(&opt.pool)?;

    let selection = if opt.nobest {
        CandidateSelection::AllVersions
    } else {
        CandidateSelection::BestOnly
    };

    let mut resolver = Resolver::new(selection);
    resolver.load_involved_packages(&packages);
    resolver.construct_requirements(&opt.names)?;

    let resolution = match resolver.resolve() {
        Ok(resolution) => resolution,
        Err(ResolveError::Unsatisfiable) if opt.explain => {
            let subset = resolver.explain_unsatisfiable()?;
            eprintln!("The following requirements cannot be satisfied together:\n{subset}");
            return Err(ResolveError::Unsatisfiable.into());
        }
        Err(err) => return Err(err.into()),
    };

    for package in &resolution.install {
        println!("{package}");
    }
    if opt.excluded {
        for package in &resolution.excluded {
            println!("{package} (excluded)");
        }
    }

    tracing::info!(
        "{} packages to install, {} excluded",
        resolution.install.len(),
        resolution.excluded.len()
    );

    Ok(())
}
