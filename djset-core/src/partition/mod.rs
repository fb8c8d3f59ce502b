//! Disjoint-set partition with path compression and union by rank.
//!
//! A [`Partition`] tracks how a fixed universe of `n` elements, addressed by
//! the dense indices `0..n`, is split into connected components. Components
//! are merged with [`Partition::unite`] (or in bulk with
//! [`Partition::add_edges`]) and inspected through the query methods.
//!
//! Lookups take `&mut self` because [`Partition::find`] rewrites parent
//! pointers as it walks. Sharing a partition between threads therefore needs
//! one lock around the whole structure, for example `Mutex<Partition>`.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::{
    error::{PartitionError, Result},
    labels::ComponentLabels,
};


/// Disjoint-set forest over the elements `0..len`.
///
/// # Examples
/// ```
/// use djset_core::Partition;
///
/// let mut partition = Partition::new(5);
/// assert!(partition.unite(0, 1)?);
/// assert!(partition.unite(1, 2)?);
/// assert!(!partition.unite(0, 2)?);
///
/// assert_eq!(partition.component_count(), 3);
/// assert_eq!(partition.find(0)?, partition.find(2)?);
/// assert_eq!(partition.component_size(0)?, 3);
/// # Ok::<(), djset_core::PartitionError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    parent: Vec<usize>,
    rank: Vec<u8>,
    size: Vec<usize>,
    components: usize,
}

impl Partition {
    /// Creates a partition of `n` singleton components.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            components: n,
        }
    }

    /// Number of elements in the universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the component containing `x`.
    ///
    /// Every node visited on the way is re-pointed directly at the root, so
    /// repeated lookups become constant time.
    ///
    /// # Errors
    /// Returns [`PartitionError::IndexOutOfBounds`] if `x >= self.len()`.
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check_index(x)?;
        Ok(self.find_root(x))
    }

    /// Merges the components containing `x` and `y`.
    ///
    /// Returns `true` when two components were merged and `false` when the
    /// elements were already connected. The shallower tree (by rank) is
    /// attached under the deeper one; on equal ranks `y`'s root is attached
    /// under `x`'s root.
    ///
    /// # Errors
    /// Returns [`PartitionError::IndexOutOfBounds`] if either index is out of
    /// range. Nothing is modified in that case.
    pub fn unite(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check_index(x)?;
        self.check_index(y)?;
        Ok(self.merge(x, y))
    }

    /// Returns `true` when `x` and `y` belong to the same component.
    ///
    /// # Errors
    /// Returns [`PartitionError::IndexOutOfBounds`] if either index is out of
    /// range.
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check_index(x)?;
        self.check_index(y)?;
        Ok(self.find_root(x) == self.find_root(y))
    }

    /// Unites `a` with every element of `neighbors`, in order.
    ///
    /// All indices are validated before the first merge, so a failing call
    /// leaves the partition untouched.
    ///
    /// # Errors
    /// Returns [`PartitionError::IndexOutOfBounds`] if `a` or any neighbour is
    /// out of range.
    ///
    /// # Examples
    /// ```
    /// use djset_core::Partition;
    ///
    /// let mut partition = Partition::new(5);
    /// partition.add_edges(0, &[1, 2, 3])?;
    /// assert_eq!(partition.component_count(), 2);
    /// assert_eq!(partition.unique_ancestors().len(), 2);
    /// # Ok::<(), djset_core::PartitionError>(())
    /// ```
    #[instrument(
        name = "partition.add_edges",
        level = "trace",
        skip(self, neighbors),
        fields(neighbors = neighbors.len()),
        err
    )]
    pub fn add_edges(&mut self, a: usize, neighbors: &[usize]) -> Result<()> {
        self.check_index(a)?;
        for &b in neighbors {
            self.check_index(b)?;
        }
        for &b in neighbors {
            self.merge(a, b);
        }
        Ok(())
    }

    /// Like [`Self::add_edges`], but first checks that `neighbors` holds
    /// exactly `expected_len` entries.
    ///
    /// # Errors
    /// Returns [`PartitionError::SizeMismatch`] when the lengths disagree and
    /// [`PartitionError::IndexOutOfBounds`] for invalid indices.
    pub fn add_edges_with_len(
        &mut self,
        a: usize,
        neighbors: &[usize],
        expected_len: usize,
    ) -> Result<()> {
        if neighbors.len() != expected_len {
            return Err(PartitionError::SizeMismatch {
                expected: expected_len,
                actual: neighbors.len(),
            });
        }
        self.add_edges(a, neighbors)
    }

    /// Returns the rank recorded at the root of `x`'s component.
    ///
    /// # Errors
    /// Returns [`PartitionError::IndexOutOfBounds`] if `x` is out of range.
    pub fn component_rank(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(usize::from(self.rank[root]))
    }

    /// Returns the number of elements in `x`'s component.
    ///
    /// # Errors
    /// Returns [`PartitionError::IndexOutOfBounds`] if `x` is out of range.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }

    /// Number of components currently in the partition.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the root of every element, in index order.
    ///
    /// Afterwards every tree has depth at most one.
    pub fn ancestors(&mut self) -> Vec<usize> {
        let n = self.len();
        (0..n).map(|node| self.find_root(node)).collect()
    }

    /// Returns the distinct roots in ascending order.
    pub fn unique_ancestors(&mut self) -> Vec<usize> {
        self.ancestors()
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Assigns every element a dense component label.
    ///
    /// Labels run from `0` to `component_count() - 1` and follow ascending
    /// root order, so label `k` corresponds to `unique_ancestors()[k]`.
    ///
    /// # Examples
    /// ```
    /// use djset_core::Partition;
    ///
    /// let mut partition = Partition::new(4);
    /// partition.unite(2, 3)?;
    /// let labels = partition.labels();
    /// let raw: Vec<u64> = labels.assignments().iter().map(|id| id.get()).collect();
    /// assert_eq!(raw, [0, 1, 2, 2]);
    /// assert_eq!(labels.sizes(), &[1, 1, 2]);
    /// # Ok::<(), djset_core::PartitionError>(())
    /// ```
    pub fn labels(&mut self) -> ComponentLabels {
        ComponentLabels::from_roots(&self.ancestors())
    }

    /// Merges two already-validated elements, returning whether anything
    /// changed.
    pub(crate) fn merge(&mut self, x: usize, y: usize) -> bool {
        let left = self.find_root(x);
        let right = self.find_root(y);
        if left == right {
            return false;
        }
        let (parent, child) = if self.rank[left] < self.rank[right] {
            (right, left)
        } else {
            (left, right)
        };
        self.parent[child] = parent;
        self.size[parent] += self.size[child];
        if self.rank[left] == self.rank[right] {
            self.rank[parent] = self.rank[parent].saturating_add(1);
        }
        self.components -= 1;
        true
    }

    fn find_root(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.parent.len();
        if index < len {
            Ok(())
        } else {
            Err(PartitionError::IndexOutOfBounds { index, len })
        }
    }
}
