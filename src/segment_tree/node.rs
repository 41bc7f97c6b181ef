use super::OperationId;

/// An update that has been applied to a node's own `sum` but not yet to its
/// children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag<O> {
    pub operand: O,
    pub operation: OperationId,
}

/// One slot of a [`LazySegmentTree`](super::LazySegmentTree), covering
/// `begin_pos..end_pos` of the original sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<T, O> {
    pub(super) sum: T,
    begin_pos: usize,
    end_pos: usize,
    tag: Option<Tag<O>>,
}

impl<T, O> Node<T, O> {
    /// Leaf over `pos..pos + 1`.
    #[inline]
    pub(super) fn leaf(value: T, pos: usize) -> Self {
        Self {
            sum: value,
            begin_pos: pos,
            end_pos: pos + 1,
            tag: None,
        }
    }

    /// Parent spanning two adjacent, already built children.
    #[inline]
    pub(super) fn internal(sum: T, left: &Self, right: &Self) -> Self {
        debug_assert_eq!(left.end_pos, right.begin_pos);
        Self {
            sum,
            begin_pos: left.begin_pos,
            end_pos: right.end_pos,
            tag: None,
        }
    }

    #[inline]
    pub fn sum(&self) -> &T {
        &self.sum
    }

    #[inline]
    pub fn begin_pos(&self) -> usize {
        self.begin_pos
    }

    #[inline]
    pub fn end_pos(&self) -> usize {
        self.end_pos
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.end_pos - self.begin_pos == 1
    }

    #[inline]
    pub fn tag(&self) -> Option<&Tag<O>> {
        self.tag.as_ref()
    }

    #[inline]
    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    /// Last write wins: a pending tag is replaced, never composed.
    #[inline]
    pub(super) fn set_tag(&mut self, operand: O, operation: OperationId) {
        self.tag = Some(Tag { operand, operation });
    }

    #[inline]
    pub(super) fn clear_tag(&mut self) {
        self.tag = None;
    }

    /// Whether `begin..end` covers this node entirely.
    #[inline]
    pub(super) fn is_within(&self, begin: usize, end: usize) -> bool {
        begin <= self.begin_pos && self.end_pos <= end
    }

    #[inline]
    pub(super) fn mid(&self) -> usize {
        (self.begin_pos + self.end_pos) / 2
    }
}
