//! Provides a backend for the [`SatSolver`] trait using the
//! [varisat](https://github.com/jix/varisat) CDCL solver.

use varisat::{CnfFormula, ExtendFormula, Lit};

use crate::sat::{Assignment, CnfProblem, SatError, SatSolver};

/// A [`SatSolver`] implemented using the `varisat` library.
///
/// Every call to [`SatSolver::solve`] uses a fresh varisat instance, no learned clauses are kept
/// between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Solver;

impl SatSolver for Solver {
    fn solve(&mut self, problem: &CnfProblem) -> Result<Option<Assignment>, SatError> {
        let mut formula = CnfFormula::new();
        for clause in problem.clauses() {
            let literals = clause
                .iter()
                .map(|&literal| Lit::from_dimacs(literal as isize))
                .collect::<Vec<_>>();
            formula.add_clause(&literals);
        }

        let mut solver = varisat::Solver::new();
        solver.add_formula(&formula);

        let satisfiable = solver
            .solve()
            .map_err(|err| SatError::Backend(format!("{err:?}")))?;
        if !satisfiable {
            return Ok(None);
        }

        let model = solver
            .model()
            .ok_or_else(|| SatError::Backend(String::from("no model after a satisfiable result")))?;
        Ok(Some(Assignment::from_true_literals(
            problem.var_count(),
            model
                .into_iter()
                .filter(|lit| lit.is_positive())
                .map(|lit| lit.to_dimacs() as i64),
        )))
    }
}
