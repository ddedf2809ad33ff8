use std::fmt::{Display, Formatter};

use crate::arena::ArenaId;

/// The id associated with a boolean variable of the formula.
///
/// Ids are tickets: they are handed out by a single resolver in creation order and never reused.
/// In DIMACS notation the variable with index `n` is written as `n + 1`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VarId(u32);

impl VarId {
    /// Constructs the id of the variable with the given zero based index.
    pub fn from_index(index: usize) -> Self {
        Self::from_usize(index)
    }

    /// Returns the zero based index of this variable.
    pub fn index(self) -> usize {
        self.to_usize()
    }

    /// Returns the (positive) number of this variable in DIMACS notation.
    pub fn to_dimacs(self) -> i64 {
        i64::from(self.0) + 1
    }
}

impl ArenaId for VarId {
    fn from_usize(x: usize) -> Self {
        assert!(x < u32::MAX as usize, "variable id too big");
        Self(x as u32)
    }

    fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Display for VarId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}
