//! # Barcode Clustering
//!
//! Groups the distinct UMI barcodes observed in one duplicate set into clusters of
//! barcodes that plausibly come from the same source molecule.
//!
//! ## Algorithm
//!
//! 1. Build an undirected [`SimilarityGraph`] with one node per distinct barcode and an
//!    edge between every pair whose Hamming distance is at most the threshold.
//! 2. Label connected components by walking the graph from each unvisited node in
//!    increasing index order, using an explicit stack. Each new component receives the
//!    next id, starting at 1.
//!
//! Clustering is transitive: if `A` is within the threshold of `B`, and `B` is within the
//! threshold of `C`, all three land in one component even when `A` and `C` are further
//! apart. With a threshold of 0 every distinct barcode is its own component.
//!
//! **Complexity**: O(k^2 * m) to build the graph and O(k + e) to label it, where
//! k = distinct barcodes, m = barcode length and e = number of edges.
//!
//! ## Example
//!
//! ```
//! use dupsets_umi::cluster_barcodes;
//!
//! let barcodes = ["AAAA", "AAAT", "TTTT"];
//! let assignment = cluster_barcodes(&barcodes, 1).unwrap();
//!
//! assert_eq!(assignment.num_groups(), 2);
//! assert_eq!(assignment.group_of(0), assignment.group_of(1));
//! assert_ne!(assignment.group_of(0), assignment.group_of(2));
//! ```

use crate::Result;
use crate::distance::hamming_distance;

/// Undirected graph over distinct barcodes, joining pairs within a maximum distance.
///
/// Node `i` corresponds to the `i`-th barcode passed to [`SimilarityGraph::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityGraph {
    /// Neighbors of each node, in increasing index order
    adjacency: Vec<Vec<usize>>,
}

impl SimilarityGraph {
    /// Build the graph for `barcodes` with edges between barcodes at most `max_edits`
    /// mismatches apart.
    ///
    /// Every pair of barcodes is compared, so any length difference in the input is
    /// detected. Self-pairs are always within distance and are not stored as edges.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UmiError::BarcodeLengthMismatch`] for the first pair of barcodes
    /// with different lengths. No partial graph is returned.
    pub fn build<S: AsRef<str>>(barcodes: &[S], max_edits: u32) -> Result<Self> {
        let n = barcodes.len();
        let mut adjacency = vec![Vec::new(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dist = hamming_distance(barcodes[i].as_ref(), barcodes[j].as_ref())?;
                if dist <= max_edits {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }

        Ok(Self { adjacency })
    }

    /// Number of nodes (distinct barcodes) in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Indices of the nodes directly joined to `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Number of undirected edges, not counting self-pairs.
    #[cfg(test)]
    pub(crate) fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Label the connected components of the graph.
    ///
    /// Components are discovered by seeding a depth-first walk from each unvisited node in
    /// increasing index order; the walk keeps its frontier on a heap-allocated stack, so
    /// arbitrarily large components cannot overflow the call stack.
    #[must_use]
    pub fn connected_components(&self) -> ComponentAssignment {
        // 0 marks a node not yet visited; real group ids start at 1
        let mut groups = vec![0u32; self.adjacency.len()];
        let mut num_groups = 0u32;
        let mut stack = Vec::new();

        for seed in 0..self.adjacency.len() {
            if groups[seed] != 0 {
                continue;
            }

            num_groups += 1;
            groups[seed] = num_groups;
            stack.push(seed);

            while let Some(node) = stack.pop() {
                for &next in self.neighbors(node) {
                    if groups[next] == 0 {
                        groups[next] = num_groups;
                        stack.push(next);
                    }
                }
            }
        }

        ComponentAssignment { groups, num_groups }
    }
}

/// Mapping from each distinct barcode to its component (group) id.
///
/// Group ids are dense: every id in `1..=num_groups()` is used by at least one barcode.
/// The id values themselves carry no meaning beyond distinctness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAssignment {
    groups: Vec<u32>,
    num_groups: u32,
}

impl ComponentAssignment {
    /// Group id (starting at 1) of the barcode at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn group_of(&self, index: usize) -> u32 {
        self.groups[index]
    }

    /// Group ids indexed by barcode position.
    #[must_use]
    pub fn groups(&self) -> &[u32] {
        &self.groups
    }

    /// Number of groups (connected components).
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.num_groups as usize
    }

    /// Number of barcodes that were assigned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no barcodes were assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Indices of the barcodes assigned to `group`, in increasing order.
    #[cfg(test)]
    pub(crate) fn members(&self, group: u32) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().enumerate().filter(move |&(_, &g)| g == group).map(|(idx, _)| idx)
    }
}

/// Cluster distinct barcodes into connected components.
///
/// Convenience wrapper for [`SimilarityGraph::build`] followed by
/// [`SimilarityGraph::connected_components`]. The graph is discarded afterwards.
///
/// # Arguments
///
/// * `barcodes` - Distinct barcode values, all of the same length
/// * `max_edits` - Maximum Hamming distance for two barcodes to be joined directly
///
/// # Errors
///
/// Returns [`crate::UmiError::BarcodeLengthMismatch`] if any two barcodes differ in length.
pub fn cluster_barcodes<S: AsRef<str>>(
    barcodes: &[S],
    max_edits: u32,
) -> Result<ComponentAssignment> {
    Ok(SimilarityGraph::build(barcodes, max_edits)?.connected_components())
}
