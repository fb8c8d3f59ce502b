//! Dense component labelling for partitions.
//!
//! Roots are arbitrary element indices, which makes them awkward to report.
//! [`ComponentLabels`] renumbers them to the contiguous range `0..k`.

/// Per-element component labels derived from a [`crate::Partition`].
///
/// # Examples
/// ```
/// use djset_core::{ComponentId, Partition};
///
/// let mut partition = Partition::new(3);
/// partition.unite(0, 2)?;
/// let labels = partition.labels();
/// assert_eq!(labels.component_count(), 2);
/// assert_eq!(labels.members(ComponentId::new(0)), vec![0, 2]);
/// # Ok::<(), djset_core::PartitionError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentLabels {
    assignments: Vec<ComponentId>,
    sizes: Vec<usize>,
}

impl ComponentLabels {
    /// Builds labels from a fully resolved root vector, where `roots[i]` is
    /// the root of element `i` and every root maps to itself.
    pub(crate) fn from_roots(roots: &[usize]) -> Self {
        let mut label_of_root = vec![0_usize; roots.len()];
        let mut sizes: Vec<usize> = Vec::new();
        for (node, &root) in roots.iter().enumerate() {
            if node == root {
                label_of_root[node] = sizes.len();
                sizes.push(0);
            }
        }

        let assignments = roots
            .iter()
            .map(|&root| {
                let label = label_of_root[root];
                sizes[label] += 1;
                ComponentId::from_index(label)
            })
            .collect();

        Self { assignments, sizes }
    }

    /// Returns the label of every element, in index order.
    #[must_use]
    pub fn assignments(&self) -> &[ComponentId] {
        &self.assignments
    }

    /// Number of distinct components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of elements carrying each label, indexed by label.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of labelled elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` when no elements were labelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the elements carrying `label`, in ascending order.
    #[must_use]
    pub fn members(&self, label: ComponentId) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(node, &id)| (id == label).then_some(node))
            .collect()
    }
}

/// Identifier assigned to a component.
///
/// # Examples
/// ```
/// use djset_core::ComponentId;
///
/// let id = ComponentId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Creates a new component identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }

    const fn from_index(index: usize) -> Self {
        Self(index as u64)
    }
}
