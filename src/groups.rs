use std::marker::PhantomData;

pub trait Magma {
    type Elem: Clone;

    fn add(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem;
}

pub trait Associativity: Magma {}
pub trait Commutativity: Magma {}
pub trait Identity: Magma {
    /// Identity
    fn id(&self) -> Self::Elem;
}
pub trait Invertibillity: Magma {
    // Invertibillity
    fn inv(&self, x: Self::Elem) -> Self::Elem;

    #[inline]
    fn sub(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem {
        self.add(lhs, self.inv(rhs))
    }
}

/// Everything a segment tree needs to fold adjacent ranges.
pub trait Semigroup: Magma + Associativity {}
impl<S: Magma + Associativity> Semigroup for S {}

pub trait Monoid: Semigroup + Identity {}
impl<M: Semigroup + Identity> Monoid for M {}

pub trait CommutativeMonoid: Monoid + Commutativity {}
impl<CM: Monoid + Commutativity> CommutativeMonoid for CM {}

pub trait Group: Monoid + Invertibillity {}
impl<G: Monoid + Invertibillity> Group for G {}

pub trait AbelianGroup: Group + Commutativity {}
impl<AG: Group + Commutativity> AbelianGroup for AG {}

#[derive(Clone, Copy, Debug)]
pub struct NumAdditiveGroups<T>(PhantomData<T>);

impl<T> Default for NumAdditiveGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumAdditiveGroups<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: num::Num + Clone> Magma for NumAdditiveGroups<T> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        lhs + rhs
    }
}
impl<T: num::Num + Clone> Identity for NumAdditiveGroups<T> {
    #[inline]
    fn id(&self) -> T {
        T::zero()
    }
}
impl<T: num::Num + num::Signed + Clone> Invertibillity for NumAdditiveGroups<T> {
    #[inline]
    fn inv(&self, x: T) -> T {
        -x
    }

    #[inline]
    fn sub(&self, lhs: T, rhs: T) -> T {
        lhs - rhs
    }
}
impl<T: num::Num + Clone> Associativity for NumAdditiveGroups<T> {}
impl<T: num::Num + Clone> Commutativity for NumAdditiveGroups<T> {}

#[derive(Clone, Copy, Debug)]
pub struct Max<T>(PhantomData<T>);

impl<T> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Max<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Ord + Clone> Magma for Max<T> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        std::cmp::max(lhs, rhs)
    }
}
impl<T: Ord + Clone> Associativity for Max<T> {}
impl<T: Ord + Clone> Commutativity for Max<T> {}

#[derive(Clone, Copy, Debug)]
pub struct Min<T>(PhantomData<T>);

impl<T> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Min<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Ord + Clone> Magma for Min<T> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        std::cmp::min(lhs, rhs)
    }
}
impl<T: Ord + Clone> Associativity for Min<T> {}
impl<T: Ord + Clone> Commutativity for Min<T> {}

/// A semigroup backed by a closure.
///
/// The closure must be associative; nothing checks it. Folds over a segment tree
/// built with a non-associative closure depend on the tree's shape.
#[derive(Clone, Copy)]
pub struct FnSemigroup<T, F> {
    f: F,
    _elem: PhantomData<fn(T, T) -> T>,
}

impl<T, F: Fn(T, T) -> T> FnSemigroup<T, F> {
    #[inline]
    pub fn new(f: F) -> Self {
        Self {
            f,
            _elem: PhantomData,
        }
    }
}

impl<T, F> std::fmt::Debug for FnSemigroup<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSemigroup").finish()
    }
}

impl<T: Clone, F: Fn(T, T) -> T> Magma for FnSemigroup<T, F> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        (self.f)(lhs, rhs)
    }
}
impl<T: Clone, F: Fn(T, T) -> T> Associativity for FnSemigroup<T, F> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_group_subtracts() {
        let g = NumAdditiveGroups::<i64>::new();
        assert_eq!(g.add(3, 4), 7);
        assert_eq!(g.id(), 0);
        assert_eq!(g.sub(10, 4), 6);
        assert_eq!(g.inv(5), -5);
    }

    #[test]
    fn max_and_min() {
        assert_eq!(Max::<u8>::new().add(3, 9), 9);
        assert_eq!(Min::<u8>::new().add(3, 9), 3);
    }

    #[test]
    fn closure_semigroup() {
        let concat = FnSemigroup::new(|a: String, b: String| a + &b);
        assert_eq!(concat.add("ab".into(), "cd".into()), "abcd");
    }
}
