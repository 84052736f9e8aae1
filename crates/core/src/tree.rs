//! Tree reconstruction from the flat person table.
//!
//! The store holds a forest of records linked by `ChildOf` placements and
//! spouse references. [`build_tree`] picks (or validates) a root and nests
//! every reachable descendant under it. Spouses are attached as flat
//! [`SpouseSnapshot`]s so the result stays acyclic and finite when serialized.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::person::{PersonDetails, PersonRecord};
use crate::types::PersonId;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Descriptive copy of a spouse. Deliberately not a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseSnapshot {
    pub id: PersonId,
    #[serde(flatten)]
    pub details: PersonDetails,
}

/// A person plus their nested descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    #[serde(flatten)]
    pub person: PersonRecord,
    pub children: Vec<TreeNode>,
    pub spouse: Option<SpouseSnapshot>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Depth-first search for a node by person id.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.person.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Id lookup and parent -> children links over one snapshot of records.
struct TreeIndex<'a> {
    records: &'a [PersonRecord],
    by_id: HashMap<&'a str, usize>,
    /// Child indices per parent index, in store order.
    children: Vec<Vec<usize>>,
    /// Records with a `ChildOf` placement, whether or not the parent resolves.
    is_child: Vec<bool>,
}

impl<'a> TreeIndex<'a> {
    fn new(records: &'a [PersonRecord]) -> Result<Self, CoreError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id.as_str(), idx).is_some() {
                return Err(CoreError::CorruptTree(format!(
                    "Duplicate person id '{}'",
                    record.id
                )));
            }
        }

        let mut children = vec![Vec::new(); records.len()];
        let mut is_child = vec![false; records.len()];
        for (idx, record) in records.iter().enumerate() {
            if let Some(parent_id) = record.parent_id() {
                is_child[idx] = true;
                // Dangling parents leave the record detached but still marked.
                if let Some(&parent_idx) = by_id.get(parent_id) {
                    children[parent_idx].push(idx);
                }
            }
        }

        Ok(Self {
            records,
            by_id,
            children,
            is_child,
        })
    }

    fn lookup(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Records that are neither children nor spouse-only, in store order.
    fn root_candidates(&self) -> Vec<usize> {
        (0..self.records.len())
            .filter(|&idx| !self.is_child[idx] && !self.records[idx].placement.is_spouse_only())
            .collect()
    }

    /// Count of nodes reachable from `start` via children, including itself.
    fn subtree_size(&self, start: usize) -> usize {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if seen.insert(idx) {
                stack.extend(self.children[idx].iter().copied());
            }
        }
        seen.len()
    }

    fn select_root(&self, root_id: Option<&str>) -> Result<usize, CoreError> {
        if let Some(id) = root_id {
            return self
                .lookup(id)
                .ok_or_else(|| CoreError::person_not_found(id));
        }

        let candidates = self.root_candidates();
        match candidates.as_slice() {
            [] if self.records.is_empty() => Err(CoreError::EmptyTree),
            [] => Ok(0),
            [only] => Ok(*only),
            [first, rest @ ..] => {
                let mut best = *first;
                let mut best_size = self.subtree_size(best);
                for &candidate in rest {
                    let size = self.subtree_size(candidate);
                    // Strictly larger only: first-seen wins ties.
                    if size > best_size {
                        best = candidate;
                        best_size = size;
                    }
                }
                Ok(best)
            }
        }
    }

    fn spouse_snapshot(&self, idx: usize) -> Option<SpouseSnapshot> {
        let spouse_id = self.records[idx].spouse_id.as_deref()?;
        let spouse = &self.records[self.lookup(spouse_id)?];
        Some(SpouseSnapshot {
            id: spouse.id.clone(),
            details: spouse.details.clone(),
        })
    }

    fn materialize(&self, idx: usize, visited: &mut HashSet<usize>) -> Result<TreeNode, CoreError> {
        if !visited.insert(idx) {
            return Err(CoreError::CorruptTree(format!(
                "Person '{}' is its own ancestor",
                self.records[idx].id
            )));
        }

        let children = self.children[idx]
            .iter()
            .map(|&child| self.materialize(child, visited))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TreeNode {
            person: self.records[idx].clone(),
            children,
            spouse: self.spouse_snapshot(idx),
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reconstruct a nested tree from a snapshot of all records.
///
/// With an explicit `root_id` the tree is rooted there (`NotFound` if the id
/// is absent). Otherwise the root is inferred: the only candidate, or the
/// candidate with the largest descendant subtree, or any record when no
/// candidate exists. An empty snapshot yields [`CoreError::EmptyTree`].
pub fn build_tree(records: &[PersonRecord], root_id: Option<&str>) -> Result<TreeNode, CoreError> {
    let index = TreeIndex::new(records)?;
    let root = index.select_root(root_id)?;
    index.materialize(root, &mut HashSet::new())
}

/// Ids of every root candidate, in store order.
pub fn root_candidates(records: &[PersonRecord]) -> Result<Vec<PersonId>, CoreError> {
    let index = TreeIndex::new(records)?;
    Ok(index
        .root_candidates()
        .into_iter()
        .map(|idx| records[idx].id.clone())
        .collect())
}

/// Descendant subtree size of `id` (the person plus everyone below them).
pub fn subtree_size(records: &[PersonRecord], id: &str) -> Result<usize, CoreError> {
    let index = TreeIndex::new(records)?;
    let idx = index
        .lookup(id)
        .ok_or_else(|| CoreError::person_not_found(id))?;
    Ok(index.subtree_size(idx))
}
