//! Binary search tree of patient records, keyed by patient ID.
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and link to each other by
//! index. The store is the single owner of every node. Removal compacts
//! the arena with `swap_remove` and re-links the node that moved.
//!
//! The tree is not self-balancing: adversarial (sorted) insertion degrades
//! it to a list. All walks are iterative, so depth never grows the call
//! stack.

use tracing::debug;

use super::traversal::{Traversal, TraversalOrder};
use crate::error::{TriageError, TriageResult};
use crate::models::{Patient, PatientId, PatientStatus, Severity};

#[derive(Debug, Clone)]
pub(super) struct TreeNode {
    pub(super) patient: Patient,
    pub(super) left: Option<usize>,
    pub(super) right: Option<usize>,
}

/// Where a node hangs from.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(usize),
    Right(usize),
}

/// Searchable, traversable store of patient records.
#[derive(Debug, Clone, Default)]
pub struct PatientStore {
    nodes: Vec<TreeNode>,
    root: Option<usize>,
}

impl PatientStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record.
    ///
    /// # Errors
    /// `DuplicateId` if a record with the same ID exists.
    pub fn insert(&mut self, patient: Patient) -> TriageResult<()> {
        let id = patient.id;
        let link = match self.locate(id) {
            Ok((_, _)) => return Err(TriageError::DuplicateId(id)),
            Err(link) => link,
        };

        let slot = self.nodes.len();
        self.nodes.push(TreeNode {
            patient,
            left: None,
            right: None,
        });
        self.set_link(link, Some(slot));
        debug!(patient_id = id, slot, "recorded patient");
        Ok(())
    }

    /// Looks up a record.
    ///
    /// # Errors
    /// `NotFound` if no record has this ID.
    pub fn find(&self, id: PatientId) -> TriageResult<&Patient> {
        self.get(id).ok_or(TriageError::NotFound(id))
    }

    /// Looks up a record, returning `None` if absent.
    pub fn get(&self, id: PatientId) -> Option<&Patient> {
        self.locate(id).ok().map(|(_, slot)| &self.nodes[slot].patient)
    }

    /// Whether a record with this ID exists.
    pub fn contains(&self, id: PatientId) -> bool {
        self.locate(id).is_ok()
    }

    /// Overwrites the stored severity, returning the previous one.
    ///
    /// # Errors
    /// `NotFound` if no record has this ID.
    pub fn update_severity(&mut self, id: PatientId, severity: Severity) -> TriageResult<Severity> {
        let patient = self.get_mut(id)?;
        Ok(std::mem::replace(&mut patient.severity, severity))
    }

    /// Sets the lifecycle state of a record.
    ///
    /// # Errors
    /// `NotFound` if no record has this ID.
    pub fn set_status(&mut self, id: PatientId, status: PatientStatus) -> TriageResult<()> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    /// Deletes a record and returns it.
    ///
    /// A node with two children takes its in-order successor's record; the
    /// successor's node is unlinked instead.
    ///
    /// # Errors
    /// `NotFound` if no record has this ID.
    pub fn remove(&mut self, id: PatientId) -> TriageResult<Patient> {
        let (link, slot) = self.locate(id).map_err(|_| TriageError::NotFound(id))?;
        let node = &self.nodes[slot];

        let removed = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let (succ_link, succ) = self.leftmost(Link::Right(slot), right);
                let succ_right = self.nodes[succ].right;
                self.set_link(succ_link, succ_right);

                let last = self.nodes.len() - 1;
                let succ_node = self.release(succ);
                // `release` moves the last node into the freed slot.
                let target = if slot == last { succ } else { slot };
                std::mem::replace(&mut self.nodes[target].patient, succ_node.patient)
            }
            (child, None) | (None, child) => {
                self.set_link(link, child);
                self.release(slot).patient
            }
        };
        debug!(patient_id = id, remaining = self.nodes.len(), "removed record");
        Ok(removed)
    }

    /// Lazily walks the records in the given order.
    ///
    /// Each call starts a fresh walk.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal::new(self, order)
    }

    /// Records in ascending ID order.
    pub fn inorder(&self) -> Traversal<'_> {
        self.traverse(TraversalOrder::Inorder)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest root-to-leaf path (0 for an empty tree).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((slot, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[slot];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }

    pub(super) fn root(&self) -> Option<usize> {
        self.root
    }

    pub(super) fn node(&self, slot: usize) -> &TreeNode {
        &self.nodes[slot]
    }

    fn get_mut(&mut self, id: PatientId) -> TriageResult<&mut Patient> {
        let (_, slot) = self.locate(id).map_err(|_| TriageError::NotFound(id))?;
        Ok(&mut self.nodes[slot].patient)
    }

    /// Finds the node holding `id`, or the empty link where it would go.
    fn locate(&self, id: PatientId) -> Result<(Link, usize), Link> {
        let mut link = Link::Root;
        let mut cursor = self.root;
        while let Some(slot) = cursor {
            let node = &self.nodes[slot];
            if id == node.patient.id {
                return Ok((link, slot));
            }
            if id < node.patient.id {
                link = Link::Left(slot);
                cursor = node.left;
            } else {
                link = Link::Right(slot);
                cursor = node.right;
            }
        }
        Err(link)
    }

    fn leftmost(&self, mut link: Link, mut slot: usize) -> (Link, usize) {
        while let Some(left) = self.nodes[slot].left {
            link = Link::Left(slot);
            slot = left;
        }
        (link, slot)
    }

    fn set_link(&mut self, link: Link, child: Option<usize>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.nodes[parent].left = child,
            Link::Right(parent) => self.nodes[parent].right = child,
        }
    }

    /// Frees an already-unlinked slot, moving the last node into it.
    fn release(&mut self, slot: usize) -> TreeNode {
        let last = self.nodes.len() - 1;
        if slot != last {
            let moved_id = self.nodes[last].patient.id;
            if let Ok((link, _)) = self.locate(moved_id) {
                self.set_link(link, Some(slot));
            }
        }
        self.nodes.swap_remove(slot)
    }
}
