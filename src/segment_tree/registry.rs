use std::{fmt, sync::Arc};

/// Index of a registered operation. Ids are handed out in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(usize);

impl OperationId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `(aggregate, operand, range_begin, range_end) -> new aggregate`
pub type Operation<T, O> = Arc<dyn Fn(&T, &O, usize, usize) -> T + Send + Sync>;

/// Append-only list of range operations.
pub struct OperationRegistry<T, O> {
    operations: Vec<Operation<T, O>>,
}

impl<T, O> OperationRegistry<T, O> {
    #[inline]
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn push<F>(&mut self, operation: F) -> OperationId
    where
        F: Fn(&T, &O, usize, usize) -> T + Send + Sync + 'static,
    {
        let id = OperationId(self.operations.len());
        self.operations.push(Arc::new(operation));
        id
    }

    #[inline]
    pub fn get(&self, id: OperationId) -> Option<&Operation<T, O>> {
        self.operations.get(id.0)
    }
}

impl<T, O> Default for OperationRegistry<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

// Cloning shares the functions; `derive` would demand `T: Clone, O: Clone`.
impl<T, O> Clone for OperationRegistry<T, O> {
    fn clone(&self) -> Self {
        Self {
            operations: self.operations.clone(),
        }
    }
}

impl<T, O> fmt::Debug for OperationRegistry<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_registration_order() {
        let mut reg = OperationRegistry::<i64, i64>::new();
        assert!(reg.is_empty());

        let add = reg.push(|sum, x, b, e| sum + x * (e - b) as i64);
        let set = reg.push(|_, x, b, e| x * (e - b) as i64);
        assert_eq!(add.index(), 0);
        assert_eq!(set.index(), 1);
        assert_eq!(reg.len(), 2);

        assert_eq!((reg.get(add).unwrap())(&10, &2, 0, 3), 16);
        assert_eq!((reg.get(set).unwrap())(&10, &2, 0, 3), 6);
        assert!(reg.get(OperationId::new(2)).is_none());
    }

    #[test]
    fn clones_share_functions() {
        let mut reg = OperationRegistry::<i32, i32>::new();
        let id = reg.push(|sum, x, _, _| sum * x);
        let copy = reg.clone();
        assert_eq!((copy.get(id).unwrap())(&3, &4, 0, 1), 12);
        assert_eq!(format!("{:?}", copy), "OperationRegistry { len: 1 }");
    }
}
