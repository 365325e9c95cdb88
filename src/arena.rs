use std::fmt::Debug;

/// Index of a slot in an [`Arena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// The id `n` slots after this one.
    pub(crate) fn offset(self, n: usize) -> NodeId {
        NodeId(self.0 + n)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Append-only node storage. Slots are never erased, so an id stays valid
/// for as long as the arena lives.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T>
    where T: Debug
{
    data: Vec<T>,
}

impl<T> Arena<T>
    where
        T: Debug,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, id: NodeId) -> &T {
        debug_assert!(id.0 < self.data.len());
        &self.data[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        debug_assert!(id.0 < self.data.len());
        &mut self.data[id.0]
    }

    pub fn push(&mut self, element: T) -> NodeId {
        let index = self.data.len();
        self.data.push(element);
        NodeId(index)
    }

    /// Appends four elements in a row and returns the id of the first.
    pub fn push_quad(&mut self, elements: [T; 4]) -> NodeId {
        let first = NodeId(self.data.len());
        self.data.extend(elements);
        first
    }
}
