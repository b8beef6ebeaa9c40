//! Tree construction for self-referencing rows (categories, comments).
//!
//! Rows are stored flat with an optional `parent_id`; the nested shape is a
//! read-time projection built per request and thrown away after the response
//! is serialized.
//!
//! Two strategies are provided:
//!
//! - [`build_tree`] / [`build_forest`] -- one flat list already in memory,
//!   assembled in two phases (group by parent, then project from the fully
//!   populated index).
//! - [`load_subtree`] -- one repository call per node via a [`ChildLoader`],
//!   used by detail views that only need a single subtree.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::types::DbId;

/// Deepest level [`load_subtree`] will descend to before giving up on a
/// branch. Guards against `parent_id` cycles in the stored rows.
pub const MAX_TREE_DEPTH: usize = 64;

/// A row that can be arranged into a tree by its `parent_id`.
pub trait TreeNode: Sized {
    /// Sibling ordering key (categories: `(sort_order, id)`, comments:
    /// `(created_at, id)`).
    type SortKey: Ord;

    fn id(&self) -> DbId;

    /// `None` marks a root.
    fn parent_id(&self) -> Option<DbId>;

    fn sort_key(&self) -> Self::SortKey;

    fn children_mut(&mut self) -> &mut Vec<Self>;
}

/// Result of [`build_forest`].
#[derive(Debug)]
pub struct Forest<T> {
    /// Root nodes in first-encountered order, children populated.
    pub roots: Vec<T>,
    /// Ids of input nodes that ended up in no tree: orphans whose parent is
    /// missing, everything beneath them, and nodes on a `parent_id` cycle.
    /// Sorted ascending.
    pub unreachable: Vec<DbId>,
}

/// Arrange a flat node list into a forest and return only the roots.
///
/// See [`build_forest`] for the exact rules.
pub fn build_tree<T: TreeNode>(nodes: Vec<T>) -> Vec<T> {
    build_forest(nodes).roots
}

/// Arrange a flat node list into a forest.
///
/// The input is expected in the caller's sibling order; that order is kept
/// both for roots and for each node's children. Any `children` already
/// present on the input nodes are discarded.
///
/// A node whose `parent_id` does not match any input id is silently dropped
/// together with its descendants. This never fails.
pub fn build_forest<T: TreeNode>(nodes: Vec<T>) -> Forest<T> {
    let known: HashSet<DbId> = nodes.iter().map(T::id).collect();

    let mut roots = Vec::new();
    let mut pending: HashMap<DbId, Vec<T>> = HashMap::new();
    let mut unreachable = Vec::new();

    for mut node in nodes {
        node.children_mut().clear();
        match node.parent_id() {
            None => roots.push(node),
            Some(parent) if known.contains(&parent) => {
                pending.entry(parent).or_default().push(node);
            }
            Some(_) => unreachable.push(node.id()),
        }
    }

    // Children are only taken out of the index once every row has been seen,
    // so a grandchild listed after its parent still lands in the output.
    let roots = roots
        .into_iter()
        .map(|root| attach_children(root, &mut pending))
        .collect();

    unreachable.extend(pending.into_values().flatten().map(|node| node.id()));
    unreachable.sort_unstable();

    Forest { roots, unreachable }
}

fn attach_children<T: TreeNode>(mut node: T, pending: &mut HashMap<DbId, Vec<T>>) -> T {
    if let Some(children) = pending.remove(&node.id()) {
        *node.children_mut() = children
            .into_iter()
            .map(|child| attach_children(child, pending))
            .collect();
    }
    node
}

/// Inline a forest back into a flat pre-order list.
///
/// `parent_id` is left untouched and every returned node has empty
/// `children`, so `build_tree(flatten(roots))` rebuilds the same shape.
pub fn flatten<T: TreeNode>(roots: Vec<T>) -> Vec<T> {
    let mut flat = Vec::new();
    let mut stack: Vec<T> = roots.into_iter().rev().collect();

    while let Some(mut node) = stack.pop() {
        let children = std::mem::take(node.children_mut());
        flat.push(node);
        stack.extend(children.into_iter().rev());
    }

    flat
}

/// Stable-sort siblings by their [`TreeNode::sort_key`].
pub fn order_siblings<T: TreeNode>(siblings: &mut [T]) {
    siblings.sort_by_key(T::sort_key);
}

/// Source of "direct children of X" for [`load_subtree`].
#[async_trait]
pub trait ChildLoader: Sync {
    type Node: TreeNode + Send + 'static;
    type Error: Send + 'static;

    async fn children_of(&self, parent_id: DbId) -> Result<Vec<Self::Node>, Self::Error>;
}

/// Fetch every descendant of `parent_id`, one loader call per node.
///
/// Returns the direct children of `parent_id` with their own `children`
/// populated recursively. Siblings are ordered by sort key. Branches deeper
/// than [`MAX_TREE_DEPTH`] are cut off.
pub fn load_subtree<L: ChildLoader>(
    loader: &L,
    parent_id: DbId,
) -> BoxFuture<'_, Result<Vec<L::Node>, L::Error>> {
    load_level(loader, parent_id, 1)
}

fn load_level<L: ChildLoader>(
    loader: &L,
    parent_id: DbId,
    depth: usize,
) -> BoxFuture<'_, Result<Vec<L::Node>, L::Error>> {
    Box::pin(async move {
        let mut children = loader.children_of(parent_id).await?;
        order_siblings(&mut children);

        if depth < MAX_TREE_DEPTH {
            for child in &mut children {
                let grandchildren = load_level(loader, child.id(), depth + 1).await?;
                *child.children_mut() = grandchildren;
            }
        }

        Ok(children)
    })
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        id: DbId,
        parent_id: Option<DbId>,
        rank: i32,
        children: Vec<Node>,
    }

    impl TreeNode for Node {
        type SortKey = (i32, DbId);

        fn id(&self) -> DbId {
            self.id
        }

        fn parent_id(&self) -> Option<DbId> {
            self.parent_id
        }

        fn sort_key(&self) -> Self::SortKey {
            (self.rank, self.id)
        }

        fn children_mut(&mut self) -> &mut Vec<Self> {
            &mut self.children
        }
    }

    fn node(id: DbId, parent_id: Option<DbId>) -> Node {
        Node {
            id,
            parent_id,
            rank: 0,
            children: Vec::new(),
        }
    }

    fn ids(nodes: &[Node]) -> Vec<DbId> {
        nodes.iter().map(|n| n.id).collect()
    }

    fn count(nodes: &[Node]) -> usize {
        nodes.iter().map(|n| 1 + count(&n.children)).sum()
    }

    #[test]
    fn chain_with_orphan() {
        let input = vec![
            node(1, None),
            node(2, Some(1)),
            node(3, Some(2)),
            node(4, Some(99)),
        ];

        let forest = build_forest(input);

        assert_eq!(ids(&forest.roots), vec![1]);
        let child = &forest.roots[0].children;
        assert_eq!(ids(child), vec![2]);
        assert_eq!(ids(&child[0].children), vec![3]);
        assert!(child[0].children[0].children.is_empty());
        assert_eq!(forest.unreachable, vec![4]);
    }

    #[test]
    fn grandchild_listed_before_parent_is_kept() {
        // The grandchild arrives before its parent is attached to the root.
        let input = vec![node(3, Some(2)), node(1, None), node(2, Some(1))];

        let roots = build_tree(input);

        assert_eq!(ids(&roots), vec![1]);
        assert_eq!(ids(&roots[0].children), vec![2]);
        assert_eq!(ids(&roots[0].children[0].children), vec![3]);
    }

    #[test]
    fn siblings_keep_input_order() {
        let input = vec![
            node(10, None),
            node(5, Some(10)),
            node(2, None),
            node(7, Some(10)),
            node(1, Some(10)),
        ];

        let roots = build_tree(input);

        assert_eq!(ids(&roots), vec![10, 2]);
        assert_eq!(ids(&roots[0].children), vec![5, 7, 1]);
    }

    #[test]
    fn every_node_is_root_attached_or_unreachable() {
        let input = vec![
            node(1, None),
            node(2, Some(1)),
            node(3, Some(42)),
            node(4, Some(3)),
            node(5, None),
            node(6, Some(5)),
            node(7, Some(2)),
        ];
        let total = input.len();

        let forest = build_forest(input);

        assert_eq!(count(&forest.roots) + forest.unreachable.len(), total);
        assert_eq!(forest.unreachable, vec![3, 4]);
    }

    #[test]
    fn orphan_is_absent_everywhere() {
        let input = vec![node(1, None), node(2, Some(1)), node(9, Some(1000))];

        let roots = build_tree(input);

        let flat = flatten(roots);
        assert!(flat.iter().all(|n| n.id != 9));
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn rebuilding_flattened_output_is_isomorphic() {
        let input = vec![
            node(1, None),
            node(2, Some(1)),
            node(3, Some(1)),
            node(4, Some(2)),
            node(5, None),
            node(6, Some(4)),
        ];

        let first = build_tree(input);
        let second = build_tree(flatten(first.clone()));

        assert_eq!(first, second);
    }

    #[test]
    fn stale_children_on_input_are_discarded() {
        let mut root = node(1, None);
        root.children.push(node(100, Some(1)));

        let roots = build_tree(vec![root, node(2, Some(1))]);

        assert_eq!(ids(&roots[0].children), vec![2]);
    }

    #[test]
    fn cycle_members_are_dropped() {
        let input = vec![
            node(1, None),
            node(2, Some(3)),
            node(3, Some(2)),
            node(4, Some(4)),
        ];

        let forest = build_forest(input);

        assert_eq!(ids(&forest.roots), vec![1]);
        assert!(forest.roots[0].children.is_empty());
        assert_eq!(forest.unreachable, vec![2, 3, 4]);
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        let forest = build_forest(Vec::<Node>::new());
        assert!(forest.roots.is_empty());
        assert!(forest.unreachable.is_empty());
    }

    #[test]
    fn order_siblings_sorts_by_rank_then_id() {
        let mut siblings = vec![
            Node { rank: 2, ..node(1, None) },
            Node { rank: 1, ..node(3, None) },
            Node { rank: 1, ..node(2, None) },
        ];

        order_siblings(&mut siblings);

        assert_eq!(ids(&siblings), vec![2, 3, 1]);
    }

    struct MemoryLoader {
        rows: Vec<Node>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChildLoader for MemoryLoader {
        type Node = Node;
        type Error = Infallible;

        async fn children_of(&self, parent_id: DbId) -> Result<Vec<Node>, Infallible> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .rows
                .iter()
                .filter(|n| n.parent_id == Some(parent_id))
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn load_subtree_matches_batch_builder() {
        let rows = vec![
            node(1, None),
            node(2, Some(1)),
            node(3, Some(2)),
            node(4, Some(1)),
            node(5, Some(3)),
        ];
        let loader = MemoryLoader {
            rows: rows.clone(),
            calls: AtomicUsize::new(0),
        };

        let children = load_subtree(&loader, 1).await.unwrap();

        let batch = build_tree(rows);
        assert_eq!(children, batch[0].children);
        // One call per node in the subtree, including leaves.
        assert_eq!(loader.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn load_subtree_orders_siblings() {
        let loader = MemoryLoader {
            rows: vec![
                Node { rank: 5, ..node(2, Some(1)) },
                Node { rank: 1, ..node(3, Some(1)) },
            ],
            calls: AtomicUsize::new(0),
        };

        let children = load_subtree(&loader, 1).await.unwrap();

        assert_eq!(ids(&children), vec![3, 2]);
    }

    #[tokio::test]
    async fn load_subtree_stops_on_cycle() {
        let loader = MemoryLoader {
            rows: vec![node(1, Some(2)), node(2, Some(1))],
            calls: AtomicUsize::new(0),
        };

        let children = load_subtree(&loader, 1).await.unwrap();

        assert_eq!(ids(&children), vec![2]);
        assert_eq!(loader.calls.load(Ordering::SeqCst), MAX_TREE_DEPTH);
    }
}
