use std::marker::PhantomData;
use std::ops::Index;

/// An `Arena<TValue>` holds a collection of `TValue`s but allocates persistent `TId`s that are used
/// to refer to an element in the arena. When adding an item to an `Arena` it returns a `TId` that
/// can be used to index into the arena.
///
/// Elements are never removed, so an id is never handed out twice for the lifetime of the arena.
pub(crate) struct Arena<TId: ArenaId, TValue> {
    data: Vec<TValue>,
    phantom: PhantomData<TId>,
}

impl<TId: ArenaId, TValue> Default for Arena<TId, TValue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TId: ArenaId, TValue> Arena<TId, TValue> {
    /// Constructs a new arena.
    pub(crate) fn new() -> Self {
        Self {
            data: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the arena.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Allocates a new instance of `TValue` and returns an Id that can be used to reference it.
    pub fn alloc(&mut self, value: TValue) -> TId {
        let id = TId::from_usize(self.data.len());
        self.data.push(value);
        id
    }

    /// Returns an iterator over the elements of the arena in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (TId, &TValue)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(index, value)| (TId::from_usize(index), value))
    }
}

impl<TId: ArenaId, TValue> Index<TId> for Arena<TId, TValue> {
    type Output = TValue;

    fn index(&self, index: TId) -> &Self::Output {
        &self.data[index.to_usize()]
    }
}

/// A trait indicating that the type can be transformed to `usize` and back
pub(crate) trait ArenaId {
    fn from_usize(x: usize) -> Self;
    fn to_usize(self) -> usize;
}
