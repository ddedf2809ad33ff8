//! Builds the clauses of a single package.

use crate::clause::Clause;
use crate::matcher::matching_providers;
use crate::variable::VariablePool;
use crate::UnresolvableRequirement;

/// The clauses of a package together with the requirements nothing in the pool provides.
#[derive(Debug, Default)]
pub(crate) struct PackageFormula<'a> {
    pub clauses: Vec<Clause<'a>>,
    pub unresolvable: Vec<UnresolvableRequirement>,
}

/// Builds the co-selection, requirement and conflict clauses of the package group with the given
/// index.
pub(crate) fn package_formula<'a>(pool: &VariablePool<'a>, group: usize) -> PackageFormula<'a> {
    let vars = pool.group(group);
    let package_var = vars.package_var;
    let package = pool.package_of(package_var);
    let mut formula = PackageFormula::default();

    // A package is installed together with everything it provides.
    for &member in vars.members.iter().filter(|&&member| member != package_var) {
        formula.clauses.push(Clause::Provides {
            package: package_var,
            member,
        });
        formula.clauses.push(Clause::ProvidedBy {
            member,
            package: package_var,
        });
    }

    for requirement in &package.requires {
        let candidates = matching_providers(pool, requirement);
        if candidates.is_empty() {
            tracing::trace!("{package} requires {requirement}, which nothing provides");
            formula.unresolvable.push(UnresolvableRequirement {
                package: package.to_string(),
                requirement: requirement.clone(),
            });
            continue;
        }

        for (index, &first) in candidates.iter().enumerate() {
            for &second in &candidates[index + 1..] {
                formula.clauses.push(Clause::SingleProvider {
                    package: package_var,
                    requirement,
                    first,
                    second,
                });
            }
        }

        if !candidates.contains(&package_var) {
            formula.clauses.push(Clause::Requires {
                package: package_var,
                requirement,
                candidates,
            });
        }
    }

    for conflict in &package.conflicts {
        let candidates = matching_providers(pool, conflict);
        if candidates.is_empty() {
            tracing::trace!("ignoring conflict of {package} with {conflict}, nothing provides it");
            continue;
        }

        for other in candidates {
            if pool.variable(other).group == group {
                tracing::trace!("ignoring conflict of {package} with itself through {conflict}");
                continue;
            }
            tracing::debug!(
                "{package} conflicts with {} through {conflict}",
                pool.package_of(other)
            );
            formula.clauses.push(Clause::Conflicts {
                package: package_var,
                conflict,
                other,
            });
        }
    }

    formula
}
