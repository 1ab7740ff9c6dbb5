//! Iterative depth-first traversals of the record tree.
//!
//! Each walk keeps an explicit stack of arena slots instead of recursing,
//! so a degenerate (list-shaped) tree cannot overflow the call stack.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::store::PatientStore;
use crate::error::TriageError;
use crate::models::Patient;

/// Depth-first visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree (ascending IDs).
    Inorder,
    /// Node, left subtree, right subtree.
    Preorder,
    /// Left subtree, right subtree, node.
    Postorder,
}

impl TraversalOrder {
    /// All orders, in menu order.
    pub const ALL: [TraversalOrder; 3] = [
        TraversalOrder::Inorder,
        TraversalOrder::Preorder,
        TraversalOrder::Postorder,
    ];
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Inorder => "inorder",
            TraversalOrder::Preorder => "preorder",
            TraversalOrder::Postorder => "postorder",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inorder" | "in" => Ok(TraversalOrder::Inorder),
            "preorder" | "pre" => Ok(TraversalOrder::Preorder),
            "postorder" | "post" => Ok(TraversalOrder::Postorder),
            other => Err(TriageError::InvalidCommand(format!(
                "unknown traversal order '{other}'"
            ))),
        }
    }
}

/// Lazy walk over a `PatientStore`.
///
/// Borrowing the store keeps the tree frozen for the walk's lifetime.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    store: &'a PatientStore,
    order: TraversalOrder,
    /// Pending slots. For postorder the flag marks "children already pushed".
    stack: Vec<(usize, bool)>,
    /// Inorder only: next subtree whose left spine is still to be pushed.
    cursor: Option<usize>,
}

impl<'a> Traversal<'a> {
    pub(super) fn new(store: &'a PatientStore, order: TraversalOrder) -> Self {
        let root = store.root();
        let (stack, cursor) = match order {
            TraversalOrder::Inorder => (Vec::new(), root),
            TraversalOrder::Preorder | TraversalOrder::Postorder => {
                (root.map(|r| (r, false)).into_iter().collect(), None)
            }
        };
        Self {
            store,
            order,
            stack,
            cursor,
        }
    }

    /// The order this walk follows.
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    fn next_inorder(&mut self) -> Option<usize> {
        while let Some(slot) = self.cursor {
            self.stack.push((slot, false));
            self.cursor = self.store.node(slot).left;
        }
        let (slot, _) = self.stack.pop()?;
        self.cursor = self.store.node(slot).right;
        Some(slot)
    }

    fn next_preorder(&mut self) -> Option<usize> {
        let (slot, _) = self.stack.pop()?;
        let node = self.store.node(slot);
        // Right first so the left subtree is popped first.
        self.stack.extend(node.right.map(|r| (r, false)));
        self.stack.extend(node.left.map(|l| (l, false)));
        Some(slot)
    }

    fn next_postorder(&mut self) -> Option<usize> {
        loop {
            let (slot, expanded) = self.stack.pop()?;
            if expanded {
                return Some(slot);
            }
            let node = self.store.node(slot);
            self.stack.push((slot, true));
            self.stack.extend(node.right.map(|r| (r, false)));
            self.stack.extend(node.left.map(|l| (l, false)));
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Patient;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = match self.order {
            TraversalOrder::Inorder => self.next_inorder(),
            TraversalOrder::Preorder => self.next_preorder(),
            TraversalOrder::Postorder => self.next_postorder(),
        }?;
        let store: &'a PatientStore = self.store;
        Some(&store.node(slot).patient)
    }
}

impl std::iter::FusedIterator for Traversal<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientId, Severity};

    fn store_of(ids: &[PatientId]) -> PatientStore {
        let mut store = PatientStore::new();
        for &id in ids {
            store
                .insert(Patient::new(id, format!("P{id}"), Severity::LOW, id))
                .unwrap();
        }
        store
    }

    fn walk(store: &PatientStore, order: TraversalOrder) -> Vec<PatientId> {
        store.traverse(order).map(|p| p.id).collect()
    }

    #[test]
    fn test_three_orders() {
        //        50
        //      /    \
        //    30      70
        //   /  \    /  \
        //  20  40  60  80
        let store = store_of(&[50, 30, 70, 20, 40, 60, 80]);

        assert_eq!(
            walk(&store, TraversalOrder::Inorder),
            vec![20, 30, 40, 50, 60, 70, 80]
        );
        assert_eq!(
            walk(&store, TraversalOrder::Preorder),
            vec![50, 30, 20, 40, 70, 60, 80]
        );
        assert_eq!(
            walk(&store, TraversalOrder::Postorder),
            vec![20, 40, 30, 60, 80, 70, 50]
        );
    }

    #[test]
    fn test_empty_tree() {
        let store = PatientStore::new();
        for order in TraversalOrder::ALL {
            assert_eq!(store.traverse(order).next(), None);
        }
    }

    #[test]
    fn test_restartable_and_lazy() {
        let store = store_of(&[2, 1, 3]);
        let mut walk_a = store.traverse(TraversalOrder::Inorder);
        assert_eq!(walk_a.next().unwrap().id, 1);

        let replay = walk_a.clone();
        assert_eq!(walk_a.map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(replay.map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(walk(&store, TraversalOrder::Inorder), vec![1, 2, 3]);
    }

    #[test]
    fn test_inorder_ascending_for_any_insertion_order() {
        let orders: [&[PatientId]; 4] = [
            &[5, 4, 3, 2, 1],
            &[1, 2, 3, 4, 5],
            &[3, 1, 5, 2, 4],
            &[42, 7, 99, 13, 1, 64, 8],
        ];
        for ids in orders {
            let store = store_of(ids);
            let walked = walk(&store, TraversalOrder::Inorder);
            assert_eq!(walked.len(), ids.len());
            assert!(walked.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let ids: Vec<PatientId> = (0..5_000).collect();
        let store = store_of(&ids);
        assert_eq!(store.traverse(TraversalOrder::Postorder).count(), 5_000);
        assert_eq!(store.traverse(TraversalOrder::Preorder).last().unwrap().id, 4_999);
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("INORDER".parse::<TraversalOrder>().unwrap(), TraversalOrder::Inorder);
        assert_eq!("post".parse::<TraversalOrder>().unwrap(), TraversalOrder::Postorder);
        assert!("sideways".parse::<TraversalOrder>().is_err());
        assert_eq!(TraversalOrder::Preorder.to_string(), "preorder");
    }
}
