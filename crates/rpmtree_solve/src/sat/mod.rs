//! The interface between the resolver and the boolean satisfiability backends.
//!
//! The resolver only ever hands a [`CnfProblem`] to a [`SatSolver`] and reads back an
//! [`Assignment`], so backends can be swapped without touching the formula builder.

use std::fmt::{Display, Formatter};
use std::io;

use thiserror::Error;

/// A propositional formula in conjunctive normal form.
///
/// Variables are numbered from `1` to [`CnfProblem::var_count`] and a literal is a non-zero
/// integer, negative for negated variables, exactly as in the DIMACS format.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CnfProblem {
    var_count: usize,
    clauses: Vec<Vec<i64>>,
}

impl CnfProblem {
    /// Constructs an empty problem over `var_count` variables.
    pub fn new(var_count: usize) -> Self {
        Self {
            var_count,
            clauses: Vec::new(),
        }
    }

    /// Adds a clause, growing the number of variables if the clause refers to a new one.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = i64>) {
        let clause = literals.into_iter().collect::<Vec<_>>();
        for literal in &clause {
            debug_assert_ne!(*literal, 0, "0 is not a valid literal");
            self.var_count = self.var_count.max(literal.unsigned_abs() as usize);
        }
        self.clauses.push(clause);
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Returns the clauses.
    pub fn clauses(&self) -> &[Vec<i64>] {
        &self.clauses
    }

    /// Returns the problem restricted to the clauses with the given indices. The number of
    /// variables stays the same.
    pub fn select(&self, indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            var_count: self.var_count,
            clauses: indices
                .into_iter()
                .map(|index| self.clauses[index].clone())
                .collect(),
        }
    }

    /// Writes the problem in the DIMACS `p cnf` format.
    pub fn write_dimacs(&self, mut writer: impl io::Write) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl Display for CnfProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.var_count, self.clauses.len())?;
        for clause in &self.clauses {
            for literal in clause {
                write!(f, "{literal} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

/// A total truth assignment of the variables of a [`CnfProblem`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// Constructs an assignment from the values of the variables `1..=values.len()`.
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Constructs an assignment from the true literals of a model. Variables that do not appear
    /// are false.
    pub fn from_true_literals(var_count: usize, literals: impl IntoIterator<Item = i64>) -> Self {
        let mut values = vec![false; var_count];
        for literal in literals {
            if literal > 0 {
                let index = literal as usize - 1;
                if index >= values.len() {
                    values.resize(index + 1, false);
                }
                values[index] = true;
            }
        }
        Self { values }
    }

    /// Returns the value of the variable with the given (1 based) number. Unknown variables are
    /// false.
    pub fn value(&self, var: usize) -> bool {
        var.checked_sub(1)
            .and_then(|index| self.values.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Returns true if the literal is true under this assignment.
    pub fn literal(&self, literal: i64) -> bool {
        let value = self.value(literal.unsigned_abs() as usize);
        if literal < 0 {
            !value
        } else {
            value
        }
    }

    /// Returns true if every clause of `problem` has at least one true literal.
    pub fn satisfies(&self, problem: &CnfProblem) -> bool {
        problem
            .clauses()
            .iter()
            .all(|clause| clause.iter().any(|&literal| self.literal(literal)))
    }
}

/// An error reported by a SAT backend.
#[derive(Debug, Clone, Error)]
pub enum SatError {
    /// The backend failed for a reason unrelated to satisfiability.
    #[error("the SAT backend failed: {0}")]
    Backend(String),
}

/// Represents a SAT backend which can decide a [`CnfProblem`].
pub trait SatSolver {
    /// Decides the problem. Returns a satisfying assignment, or `None` if the problem is
    /// unsatisfiable.
    fn solve(&mut self, problem: &CnfProblem) -> Result<Option<Assignment>, SatError>;
}
