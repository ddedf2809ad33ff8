//! Explains an unsatisfiable formula by a minimal unsatisfiable subset of its clauses.

use std::fmt::{Display, Formatter};

use crate::sat::{CnfProblem, SatError, SatSolver};

/// A set of clauses that together cannot be satisfied, such that dropping any one of them makes
/// the rest satisfiable.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MinimalUnsatSubset {
    /// The clauses of the subset in the order they appear in the formula.
    pub clauses: Vec<UnsatClause>,
}

/// A clause of a [`MinimalUnsatSubset`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnsatClause {
    /// The literals in DIMACS notation.
    pub literals: Vec<i64>,

    /// Why the clause is part of the formula, e.g. `testa-0:1 requires d, provided by testb-0:1`.
    pub reason: String,
}

impl Display for MinimalUnsatSubset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{}", clause.reason)?;
        }
        Ok(())
    }
}

/// Deletion based extraction: every clause is dropped in turn and stays dropped if the remaining
/// clauses are still unsatisfiable.
///
/// Returns the indices of the clauses of the subset, or `None` if `problem` is satisfiable. Needs
/// one call to the backend per clause.
pub(crate) fn minimal_unsat_subset<S: SatSolver>(
    solver: &mut S,
    problem: &CnfProblem,
) -> Result<Option<Vec<usize>>, SatError> {
    if solver.solve(problem)?.is_some() {
        return Ok(None);
    }

    let mut subset = (0..problem.clauses().len()).collect::<Vec<_>>();
    let mut index = 0;
    while index < subset.len() {
        let mut candidate = subset.clone();
        candidate.remove(index);
        if solver.solve(&problem.select(candidate.iter().copied()))?.is_none() {
            subset = candidate;
        } else {
            index += 1;
        }
    }

    Ok(Some(subset))
}
