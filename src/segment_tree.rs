use crate::error::{check_range, Error, Result};
use crate::groups::{Magma, Semigroup};
use std::fmt;

mod node;
mod registry;

pub use node::{Node, Tag};
pub use registry::{Operation, OperationId, OperationRegistry};

/// Slot of the root node. The children of slot `i` live at `2 * i` and `2 * i + 1`.
pub const ROOT: usize = 1;

/// Segment tree with lazy range updates.
///
/// Adjacent ranges are folded with `G`. Updates go through operations registered
/// with [`add_operation`](Self::add_operation), each called as
/// `operation(aggregate, operand, begin, end)` on a node covering `begin..end`.
/// For results to match a direct fold, every operation has to distribute over `G`:
/// `op(add(a, b), x, l, r) == add(op(a, x, l, m), op(b, x, m, r))`.
///
/// A node holds at most one pending operation. Applying a tag to a child first
/// flushes the child's own tag, so operations reach the leaves in issue order.
pub struct LazySegmentTree<G: Semigroup, O = <G as Magma>::Elem> {
    group: G,
    operations: OperationRegistry<G::Elem, O>,
    nodes: Vec<Option<Node<G::Elem, O>>>,
    len: usize,
}

impl<G: Semigroup, O: Clone> LazySegmentTree<G, O> {
    /// O(n)
    pub fn new<Iter: IntoIterator<Item = G::Elem>>(group: G, iter: Iter) -> Self {
        let values: Vec<_> = iter.into_iter().collect();
        let len = values.len();

        let mut tree = Self {
            group,
            operations: OperationRegistry::new(),
            nodes: Vec::new(),
            len,
        };

        if len != 0 {
            tree.nodes.resize_with(4 * len, || None);
            tree.build(ROOT, 0, len, &mut values.into_iter());
        }

        log::debug!(
            "built lazy segment tree: len={}, allocation_size={}",
            tree.len,
            tree.allocation_size()
        );
        tree
    }

    fn build(
        &mut self,
        pos: usize,
        l: usize,
        r: usize,
        values: &mut std::vec::IntoIter<G::Elem>,
    ) {
        if r - l == 1 {
            let value = match values.next() {
                Some(value) => value,
                None => unreachable!("ran out of values while building leaf {}", l),
            };
            self.nodes[pos] = Some(Node::leaf(value, l));
            return;
        }

        let mid = (l + r) / 2;
        self.build(2 * pos, l, mid, values);
        self.build(2 * pos + 1, mid, r, values);

        let node = {
            let left = self.slot(2 * pos);
            let right = self.slot(2 * pos + 1);
            let sum = self.group.add(left.sum.clone(), right.sum.clone());
            Node::internal(sum, left, right)
        };
        self.nodes[pos] = Some(node);
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of node slots reserved, `4 * len()`.
    #[inline]
    pub fn allocation_size(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn group(&self) -> &G {
        &self.group
    }

    #[inline]
    pub fn operations(&self) -> &OperationRegistry<G::Elem, O> {
        &self.operations
    }

    /// The node at heap slot `pos`, if that slot holds one.
    #[inline]
    pub fn node(&self, pos: usize) -> Option<&Node<G::Elem, O>> {
        self.nodes.get(pos).and_then(Option::as_ref)
    }

    pub fn add_operation<F>(&mut self, operation: F) -> OperationId
    where
        F: Fn(&G::Elem, &O, usize, usize) -> G::Elem + Send + Sync + 'static,
    {
        let id = self.operations.push(operation);
        log::trace!("registered operation {}", id);
        id
    }

    #[inline]
    fn slot(&self, pos: usize) -> &Node<G::Elem, O> {
        match self.nodes[pos] {
            Some(ref node) => node,
            None => unreachable!("slot {} was never built", pos),
        }
    }

    #[inline]
    fn slot_mut(&mut self, pos: usize) -> &mut Node<G::Elem, O> {
        match self.nodes[pos] {
            Some(ref mut node) => node,
            None => unreachable!("slot {} was never built", pos),
        }
    }

    /// Runs `operation` on the aggregate at `pos` without touching any tag.
    fn apply(&mut self, pos: usize, operand: &O, operation: OperationId) {
        let f = match self.operations.get(operation) {
            Some(f) => f,
            None => unreachable!("tag refers to unregistered operation {}", operation),
        };
        let node = match self.nodes[pos] {
            Some(ref mut node) => node,
            None => unreachable!("slot {} was never built", pos),
        };
        node.sum = f(&node.sum, operand, node.begin_pos(), node.end_pos());
    }

    fn pull_up(&mut self, pos: usize) {
        let sum = self.group.add(
            self.slot(2 * pos).sum.clone(),
            self.slot(2 * pos + 1).sum.clone(),
        );
        self.slot_mut(pos).sum = sum;
    }

    /// Hands the pending tag at `pos` down to both children.
    ///
    /// Each child's own tag is flushed first, then the parent's operation is applied
    /// to the child's aggregate and the child inherits the tag. Does nothing for
    /// leaves, untagged nodes and empty slots, so calling it twice is the same as
    /// calling it once.
    pub fn push_down(&mut self, pos: usize) {
        let tag = match self.node(pos) {
            Some(node) if !node.is_leaf() => match node.tag() {
                Some(tag) => tag.clone(),
                None => return,
            },
            _ => return,
        };

        for &child in &[2 * pos, 2 * pos + 1] {
            self.push_down(child);
            self.apply(child, &tag.operand, tag.operation);
            self.slot_mut(child).set_tag(tag.operand.clone(), tag.operation);
        }

        self.slot_mut(pos).clear_tag();
    }

    /// Applies `operation` with `operand` to every element of `begin..end`.
    ///
    /// The descent itself visits O(log n) nodes and fully covered nodes keep the
    /// update as a tag. Every push-down on the way first flushes the tags already
    /// sitting on the children, though, and those flushes cascade through all tagged
    /// descendants. Repeated updates over the same range leave the whole subtree
    /// tagged, after which each update costs O(n).
    pub fn update(
        &mut self,
        begin: usize,
        end: usize,
        operation: OperationId,
        operand: O,
    ) -> Result<()> {
        check_range(begin, end, self.len)?;
        if self.operations.get(operation).is_none() {
            return Err(Error::UnknownOperation(operation));
        }

        log::trace!("update {}..{} with operation {}", begin, end, operation);
        self.update_node(ROOT, begin, end, operation, &operand);
        Ok(())
    }

    fn update_node(
        &mut self,
        pos: usize,
        begin: usize,
        end: usize,
        operation: OperationId,
        operand: &O,
    ) {
        self.push_down(pos);

        let (covered, mid) = {
            let node = self.slot(pos);
            (node.is_within(begin, end), node.mid())
        };

        if covered {
            self.apply(pos, operand, operation);
            self.slot_mut(pos).set_tag(operand.clone(), operation);
            return;
        }

        if begin < mid {
            self.update_node(2 * pos, begin, end, operation, operand);
        }
        if mid < end {
            self.update_node(2 * pos + 1, begin, end, operation, operand);
        }
        self.pull_up(pos);
    }

    /// Folds `begin..end` with the tree's group.
    ///
    /// Takes `&mut self` because pending tags on the visited path are pushed down,
    /// with the same cascading cost as [`update`](Self::update).
    pub fn query(&mut self, begin: usize, end: usize) -> Result<G::Elem> {
        check_range(begin, end, self.len)?;

        log::trace!("query {}..{}", begin, end);
        Ok(self.query_node(ROOT, begin, end))
    }

    fn query_node(&mut self, pos: usize, begin: usize, end: usize) -> G::Elem {
        self.push_down(pos);

        let (covered, mid) = {
            let node = self.slot(pos);
            (node.is_within(begin, end), node.mid())
        };

        if covered {
            self.slot(pos).sum.clone()
        } else if end <= mid {
            self.query_node(2 * pos, begin, end)
        } else if mid <= begin {
            self.query_node(2 * pos + 1, begin, end)
        } else {
            let left = self.query_node(2 * pos, begin, end);
            let right = self.query_node(2 * pos + 1, begin, end);
            self.group.add(left, right)
        }
    }

    /// The current value of a single element.
    #[inline]
    pub fn get(&mut self, index: usize) -> Result<G::Elem> {
        self.query(index, index.saturating_add(1))
    }
}

// Children sit at higher slots than their parent, so popping from the back
// releases every child before its parent.
impl<G: Semigroup, O> Drop for LazySegmentTree<G, O> {
    fn drop(&mut self) {
        while let Some(slot) = self.nodes.pop() {
            drop(slot);
        }
    }
}

impl<G, O> Clone for LazySegmentTree<G, O>
where
    G: Semigroup + Clone,
    O: Clone,
{
    fn clone(&self) -> Self {
        Self {
            group: self.group.clone(),
            operations: self.operations.clone(),
            nodes: self.nodes.clone(),
            len: self.len,
        }
    }
}

impl<G, O> fmt::Debug for LazySegmentTree<G, O>
where
    G: Semigroup + fmt::Debug,
    G::Elem: fmt::Debug,
    O: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySegmentTree")
            .field("group", &self.group)
            .field("operations", &self.operations)
            .field("len", &self.len)
            .field("nodes", &self.nodes.iter().flatten().collect::<Vec<_>>())
            .finish()
    }
}
