use indexmap::{IndexMap, IndexSet};
use rpmtree_types::Package;

use crate::clause::{Clause, Literal};
use crate::formula::package_formula;
use crate::id::VarId;
use crate::mus::{minimal_unsat_subset, MinimalUnsatSubset, UnsatClause};
use crate::sat::{Assignment, CnfProblem, SatSolver};
use crate::selector::BestCandidates;
use crate::variable::VariablePool;
use crate::{CandidateSelection, DefaultSolver, Resolution, ResolveError, UnresolvableRequirement};

/// Resolves a set of requested packages against a pool of candidate packages.
///
/// A resolver is used for a single run:
///
/// 1. [`Resolver::load_involved_packages`] generates the variables and the clauses of the
///    candidates,
/// 2. [`Resolver::construct_requirements`] adds the requested packages,
/// 3. [`Resolver::resolve`] solves the formula and returns the packages to install. If that fails
///    with [`ResolveError::Unsatisfiable`], [`Resolver::explain_unsatisfiable`] reports why.
///
/// The resolver borrows the packages, the [`Resolution`] refers to them as well.
pub struct Resolver<'a, S = DefaultSolver> {
    solver: S,
    selection: CandidateSelection,
    pool: VariablePool<'a>,
    best: BestCandidates<'a>,
    clauses: Vec<Clause<'a>>,
    unresolvable: Vec<UnresolvableRequirement>,
    requested: Vec<VarId>,
}

impl<'a> Resolver<'a, DefaultSolver> {
    /// Constructs a resolver that uses the default SAT backend.
    pub fn new(selection: CandidateSelection) -> Self {
        Self::with_solver(DefaultSolver::default(), selection)
    }
}

impl Default for Resolver<'_, DefaultSolver> {
    fn default() -> Self {
        Self::new(CandidateSelection::default())
    }
}

impl<'a, S: SatSolver> Resolver<'a, S> {
    /// Constructs a resolver that uses the given SAT backend.
    pub fn with_solver(solver: S, selection: CandidateSelection) -> Self {
        Self {
            solver,
            selection,
            pool: VariablePool::default(),
            best: BestCandidates::default(),
            clauses: Vec::new(),
            unresolvable: Vec::new(),
            requested: Vec::new(),
        }
    }

    /// Generates the variables and clauses for the given candidates.
    ///
    /// With [`CandidateSelection::BestOnly`] only the newest version of every package name takes
    /// part. A package with the same name and version as one that was loaded before is skipped.
    ///
    /// Requirements are matched against everything loaded so far, so all candidates should be
    /// passed in a single call.
    pub fn load_involved_packages(&mut self, packages: impl IntoIterator<Item = &'a Package>) {
        let packages = packages.into_iter().collect::<Vec<_>>();
        let candidate_count = packages.len();
        let packages = self.best.select(packages, self.selection);

        let mut groups = Vec::with_capacity(packages.len());
        for package in packages {
            match self.pool.add_package(package) {
                Some(group) => groups.push(group),
                None => tracing::warn!("skipping duplicate package {package}"),
            }
        }
        tracing::info!(
            "loaded {} of {candidate_count} candidate packages",
            groups.len()
        );
        tracing::info!("generated {} variables", self.pool.len());

        for group in groups {
            let formula = package_formula(&self.pool, group);
            self.clauses.extend(formula.clauses);
            self.unresolvable.extend(formula.unresolvable);
        }
    }

    /// Requests the newest provider of each of the given capability names to be installed.
    ///
    /// Fails with [`ResolveError::UnknownPackage`] as soon as a name is provided by nothing.
    pub fn construct_requirements<I>(&mut self, names: I) -> Result<(), ResolveError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            let var = self
                .newest_provider(name)
                .ok_or_else(|| ResolveError::UnknownPackage(name.to_string()))?;
            tracing::info!("Selecting {name}: {}", self.pool.package_of(var));
            self.clauses.push(Clause::Install(var));
            self.requested.push(var);
        }
        Ok(())
    }

    /// Returns the provider of `name` whose package has the highest version. The provider loaded
    /// first wins ties.
    fn newest_provider(&self, name: &str) -> Option<VarId> {
        let mut newest: Option<VarId> = None;
        for &var in self.pool.providers(name) {
            let is_newer = newest.map_or(true, |newest| {
                self.pool.package_of(var).version > self.pool.package_of(newest).version
            });
            if is_newer {
                newest = Some(var);
            }
        }
        newest
    }

    /// Solves the formula and returns the packages to install and the candidates left out.
    ///
    /// Only the requested packages and what they transitively need according to the solution end
    /// up in [`Resolution::install`]. Everything else the solver happened to set is excluded, which
    /// keeps the result independent of the backend.
    pub fn resolve(&mut self) -> Result<Resolution<'a>, ResolveError> {
        if !self.unresolvable.is_empty() {
            return Err(ResolveError::UnresolvableRequirements(
                self.unresolvable.clone(),
            ));
        }

        for (id, variable) in self.pool.variables() {
            tracing::trace!(
                "variable {id}: {:?} {} of {}",
                variable.kind,
                variable.context.capability,
                variable.package
            );
        }
        let cnf = self.cnf();
        tracing::debug!("solving formula\n{cnf}");

        let Some(assignment) = self.solver.solve(&cnf)? else {
            tracing::info!("no solution found");
            return Err(ResolveError::Unsatisfiable);
        };
        tracing::info!("solution found");
        debug_assert!(assignment.satisfies(&cnf));

        let installed = self.installed_groups(&assignment);
        let mut resolution = Resolution::default();
        for (group, vars) in self.pool.groups().enumerate() {
            let package = self.pool.package_of(vars.package_var);
            if !installed.contains(&group) {
                resolution.excluded.push(package);
                continue;
            }

            if let Some(best) = self.best.get(&package.name) {
                if best.version != package.version {
                    tracing::info!("Picking {package} instead of best candidate {best}");
                }
            }
            resolution.install.push(package);
        }

        Ok(resolution)
    }

    /// Returns the package groups reachable from the requested packages by following the
    /// requirements to the candidates the assignment installs.
    fn installed_groups(&self, assignment: &Assignment) -> IndexSet<usize> {
        let mut requirements: IndexMap<VarId, Vec<&[VarId]>> = IndexMap::new();
        for clause in &self.clauses {
            if let Clause::Requires {
                package,
                candidates,
                ..
            } = clause
            {
                requirements
                    .entry(*package)
                    .or_default()
                    .push(candidates.as_slice());
            }
        }

        let mut installed = IndexSet::new();
        let mut queue = self
            .requested
            .iter()
            .map(|&var| self.pool.variable(var).group)
            .collect::<Vec<_>>();
        while let Some(group) = queue.pop() {
            if !installed.insert(group) {
                continue;
            }
            let package_var = self.pool.group(group).package_var;
            let Some(package_requirements) = requirements.get(&package_var) else {
                continue;
            };
            for candidates in package_requirements {
                queue.extend(
                    candidates
                        .iter()
                        .filter(|&&candidate| Literal::positive(candidate).eval(assignment))
                        .map(|&candidate| self.pool.variable(candidate).group),
                );
            }
        }
        installed
    }

    /// Computes a minimal unsatisfiable subset of the formula to explain why [`Resolver::resolve`]
    /// found no solution.
    ///
    /// This calls the SAT backend once per clause and can take a while for large pools.
    pub fn explain_unsatisfiable(&mut self) -> Result<MinimalUnsatSubset, ResolveError> {
        if !self.unresolvable.is_empty() {
            return Err(ResolveError::UnresolvableRequirements(
                self.unresolvable.clone(),
            ));
        }

        let cnf = self.cnf();
        let indices =
            minimal_unsat_subset(&mut self.solver, &cnf)?.ok_or(ResolveError::Satisfiable)?;

        let clauses = indices
            .into_iter()
            .map(|index| UnsatClause {
                literals: cnf.clauses()[index].clone(),
                reason: self.clauses[index].display(&self.pool).to_string(),
            })
            .collect();
        Ok(MinimalUnsatSubset { clauses })
    }

    /// Returns the formula in conjunctive normal form. Clause `i` of the result is the `i`-th
    /// clause added to the formula.
    pub fn cnf(&self) -> CnfProblem {
        let mut cnf = CnfProblem::new(self.pool.len());
        for clause in &self.clauses {
            cnf.add_clause(clause.literals().into_iter().map(Literal::to_dimacs));
        }
        cnf
    }

    /// Returns the number of variables generated so far.
    pub fn variable_count(&self) -> usize {
        self.pool.len()
    }

    /// Returns the number of clauses of the formula.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the requirements that nothing in the pool provides.
    pub fn unresolvable_requirements(&self) -> &[UnresolvableRequirement] {
        &self.unresolvable
    }
}
