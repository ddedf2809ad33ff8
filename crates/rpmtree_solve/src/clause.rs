use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rpmtree_types::Entry;

use crate::id::VarId;
use crate::sat::Assignment;
use crate::variable::{VarKind, VariablePool};

/// Represents a single clause in the SAT problem
///
/// # SAT terminology
///
/// Clauses consist of disjunctions of literals (i.e. a non-empty list of variables, potentially
/// negated, joined by the logical "or" operator). Here are some examples:
///
/// - (¬A ∨ ¬B)
/// - (¬A ∨ ¬B ∨ ¬C ∨ ¬D)
/// - (¬A ∨ B ∨ C)
/// - (root)
///
/// For additional context, see <https://en.wikipedia.org/wiki/Boolean_satisfiability_problem>
///
/// # Implementation notes
///
/// The variants of the enum are the kinds of clauses the formula builder emits. Each variant keeps
/// where it came from, so an unsatisfiable formula can be explained in terms of packages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Clause<'a> {
    /// A top level request: the variable must be true.
    ///
    /// In SAT terms: (v)
    Install(VarId),
    /// Installing a package installs every capability and file it provides.
    ///
    /// In SAT terms: (¬package ∨ member)
    Provides { package: VarId, member: VarId },
    /// A capability or file can only be installed together with the package it belongs to.
    ///
    /// In SAT terms: (¬member ∨ package)
    ProvidedBy { member: VarId, package: VarId },
    /// The package requires at least one of the candidates.
    ///
    /// In SAT terms: (¬package ∨ candidate_1 ∨ ... ∨ candidate_n)
    Requires {
        package: VarId,
        requirement: &'a Entry,
        candidates: Vec<VarId>,
    },
    /// The package requires a capability that must be provided by exactly one package, so two
    /// candidates cannot be installed at the same time.
    ///
    /// In SAT terms: (¬package ∨ ¬first ∨ ¬second)
    SingleProvider {
        package: VarId,
        requirement: &'a Entry,
        first: VarId,
        second: VarId,
    },
    /// The package conflicts with a capability provided by `other`.
    ///
    /// In SAT terms: (¬package ∨ ¬other)
    Conflicts {
        package: VarId,
        conflict: &'a Entry,
        other: VarId,
    },
}

impl<'a> Clause<'a> {
    /// Returns the literals of the clause. A literal is never repeated.
    pub fn literals(&self) -> Vec<Literal> {
        let literals = match self {
            Clause::Install(var) => vec![Literal::positive(*var)],
            Clause::Provides { package, member } => {
                vec![Literal::negative(*package), Literal::positive(*member)]
            }
            Clause::ProvidedBy { member, package } => {
                vec![Literal::negative(*member), Literal::positive(*package)]
            }
            Clause::Requires {
                package,
                candidates,
                ..
            } => std::iter::once(Literal::negative(*package))
                .chain(candidates.iter().copied().map(Literal::positive))
                .collect(),
            Clause::SingleProvider {
                package,
                first,
                second,
                ..
            } => vec![
                Literal::negative(*package),
                Literal::negative(*first),
                Literal::negative(*second),
            ],
            Clause::Conflicts { package, other, .. } => {
                vec![Literal::negative(*package), Literal::negative(*other)]
            }
        };
        literals.into_iter().unique().collect()
    }

    /// Returns an object that describes the clause in terms of the packages involved.
    pub fn display<'p>(&'p self, pool: &'p VariablePool<'a>) -> ClauseDisplay<'a, 'p> {
        ClauseDisplay { clause: self, pool }
    }
}

/// A variable of the formula, possibly negated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Literal {
    pub var: VarId,
    pub negate: bool,
}

impl Literal {
    pub fn positive(var: VarId) -> Self {
        Self { var, negate: false }
    }

    pub fn negative(var: VarId) -> Self {
        Self { var, negate: true }
    }

    /// Returns the literal in DIMACS notation.
    pub fn to_dimacs(self) -> i64 {
        if self.negate {
            -self.var.to_dimacs()
        } else {
            self.var.to_dimacs()
        }
    }

    /// Returns the value of the literal under the given assignment.
    pub fn eval(self, assignment: &Assignment) -> bool {
        assignment.literal(self.to_dimacs())
    }
}

/// Describes a [`Clause`] in terms of packages, e.g. `testa-0:1 requires d, provided by
/// testb-0:1`.
pub(crate) struct ClauseDisplay<'a, 'p> {
    clause: &'p Clause<'a>,
    pool: &'p VariablePool<'a>,
}

impl Display for ClauseDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let package = |var: VarId| self.pool.package_of(var);
        let capability = |var: VarId| self.pool.variable(var).context.capability;

        match self.clause {
            Clause::Install(var) => write!(f, "{} was requested", package(*var)),
            Clause::Provides { package: p, member } => match self.pool.variable(*member).kind {
                VarKind::File => write!(f, "{} ships {}", package(*p), capability(*member)),
                VarKind::Package | VarKind::Resource => {
                    write!(f, "{} provides {}", package(*p), capability(*member))
                }
            },
            Clause::ProvidedBy { member, package: p } => write!(
                f,
                "{} is only available together with {}",
                capability(*member),
                package(*p)
            ),
            Clause::Requires {
                package: p,
                requirement,
                candidates,
            } => write!(
                f,
                "{} requires {}, provided by {}",
                package(*p),
                requirement,
                candidates.iter().map(|&c| package(c)).format(" or ")
            ),
            Clause::SingleProvider {
                package: p,
                requirement,
                first,
                second,
            } => write!(
                f,
                "{} requires {} from a single package, but both {} and {} provide it",
                package(*p),
                requirement,
                package(*first),
                package(*second)
            ),
            Clause::Conflicts {
                package: p,
                conflict,
                other,
            } => write!(
                f,
                "{} conflicts with {}, provided by {}",
                package(*p),
                conflict,
                package(*other)
            ),
        }
    }
}
