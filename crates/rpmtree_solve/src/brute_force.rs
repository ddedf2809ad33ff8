//! A small backtracking SAT backend. It needs no external dependency and is good enough for the
//! formulas in tests and for small package pools.

use crate::sat::{Assignment, CnfProblem, SatError, SatSolver};

/// A DPLL search with unit propagation. Variables are decided in index order, `false` first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Solver;

impl SatSolver for Solver {
    fn solve(&mut self, problem: &CnfProblem) -> Result<Option<Assignment>, SatError> {
        let mut values = vec![None; problem.var_count()];
        if !search(problem.clauses(), &mut values) {
            return Ok(None);
        }
        Ok(Some(Assignment::new(
            values.into_iter().map(|v| v.unwrap_or(false)).collect(),
        )))
    }
}

/// The state of a clause under a partial assignment.
enum ClauseState {
    Satisfied,
    Conflict,
    Unit(i64),
    Open,
}

fn literal_value(values: &[Option<bool>], literal: i64) -> Option<bool> {
    let value = values[literal.unsigned_abs() as usize - 1]?;
    Some(if literal < 0 { !value } else { value })
}

fn clause_state(values: &[Option<bool>], clause: &[i64]) -> ClauseState {
    let mut unassigned = None;
    let mut unassigned_count = 0;
    for &literal in clause {
        match literal_value(values, literal) {
            Some(true) => return ClauseState::Satisfied,
            Some(false) => {}
            None => {
                unassigned = Some(literal);
                unassigned_count += 1;
            }
        }
    }
    match (unassigned_count, unassigned) {
        (0, _) => ClauseState::Conflict,
        (1, Some(literal)) => ClauseState::Unit(literal),
        _ => ClauseState::Open,
    }
}

/// Assigns all unit literals until a fixpoint is reached. Returns false on a conflict.
fn propagate(clauses: &[Vec<i64>], values: &mut [Option<bool>]) -> bool {
    loop {
        let mut changed = false;
        for clause in clauses {
            match clause_state(values, clause) {
                ClauseState::Satisfied | ClauseState::Open => {}
                ClauseState::Conflict => return false,
                ClauseState::Unit(literal) => {
                    values[literal.unsigned_abs() as usize - 1] = Some(literal > 0);
                    changed = true;
                }
            }
        }
        if !changed {
            return true;
        }
    }
}

fn search(clauses: &[Vec<i64>], values: &mut Vec<Option<bool>>) -> bool {
    if !propagate(clauses, values) {
        return false;
    }

    let Some(next) = values.iter().position(Option::is_none) else {
        return true;
    };

    for value in [false, true] {
        let mut attempt = values.clone();
        attempt[next] = Some(value);
        if search(clauses, &mut attempt) {
            *values = attempt;
            return true;
        }
    }
    false
}
