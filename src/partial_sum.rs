use crate::error::{check_range, Result};
use crate::groups::AbelianGroup;

/// Prefix sums over a sequence that only grows at the back.
///
/// Range sums are a single subtraction, so this beats a segment tree whenever the
/// elements never change.
#[derive(Clone, Debug)]
pub struct PartialSumSeries<G: AbelianGroup> {
    group: G,
    /// `prefix[i]` is the sum of the first `i` elements; `prefix[0]` is the identity.
    prefix: Vec<G::Elem>,
}

impl<G: AbelianGroup> PartialSumSeries<G> {
    #[inline]
    pub fn new(group: G) -> Self {
        let prefix = vec![group.id()];
        Self { group, prefix }
    }

    /// O(n)
    pub fn from_iter_with<Iter: IntoIterator<Item = G::Elem>>(group: G, iter: Iter) -> Self {
        let mut series = Self::new(group);
        series.extend(iter);
        log::debug!("built partial sum series: len={}", series.len());
        series
    }

    /// Constructs a new, empty `PartialSumSeries<G>` with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(group: G, capacity: usize) -> Self {
        let mut prefix = Vec::with_capacity(capacity + 1);
        prefix.push(group.id());
        Self { group, prefix }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prefix.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.prefix.reserve(additional);
    }

    /// O(1)
    pub fn push(&mut self, x: G::Elem) {
        let last = self.prefix[self.prefix.len() - 1].clone();
        self.prefix.push(self.group.add(last, x));
    }

    /// Sum of the first `i` elements. O(1)
    #[inline]
    pub fn prefix_sum(&self, i: usize) -> Option<&G::Elem> {
        self.prefix.get(i)
    }

    /// Sum of `begin..end`. O(1)
    pub fn query(&self, begin: usize, end: usize) -> Result<G::Elem> {
        check_range(begin, end, self.len())?;
        Ok(self
            .group
            .sub(self.prefix[end].clone(), self.prefix[begin].clone()))
    }

    /// Sum of the `n` elements starting at `begin`.
    #[inline]
    pub fn query_n(&self, begin: usize, n: usize) -> Result<G::Elem> {
        self.query(begin, begin.saturating_add(n))
    }

    /// The running totals, one per element.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, G::Elem> {
        self.prefix[1..].iter()
    }
}

impl<G: AbelianGroup + Default> Default for PartialSumSeries<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

impl<G: AbelianGroup> Extend<G::Elem> for PartialSumSeries<G> {
    fn extend<Iter: IntoIterator<Item = G::Elem>>(&mut self, iter: Iter) {
        let iter = iter.into_iter();
        match iter.size_hint() {
            (_, Some(len)) => self.reserve(len),
            (len, None) => self.reserve(len),
        }

        for x in iter {
            self.push(x);
        }
    }
}

impl<G: AbelianGroup + Default> std::iter::FromIterator<G::Elem> for PartialSumSeries<G> {
    fn from_iter<Iter: IntoIterator<Item = G::Elem>>(iter: Iter) -> Self {
        Self::from_iter_with(G::default(), iter)
    }
}

impl<'a, G: AbelianGroup> IntoIterator for &'a PartialSumSeries<G> {
    type Item = &'a G::Elem;
    type IntoIter = std::slice::Iter<'a, G::Elem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
