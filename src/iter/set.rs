use std::iter::FusedIterator;

use crate::{Comparator, IntoKeys, Keys, Set};

impl<T, C> Set<T, C> {
    /// Gets an iterator over the elements of the set, in ascending order.
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            inner: self.tree.keys(),
        }
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for Set<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Set<T, C> {
        let mut set = Set::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T> + Default, const N: usize> From<[T; N]> for Set<T, C> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

pub struct SetIter<'a, T> {
    inner: Keys<'a, T, ()>,
}

impl<T> Clone for SetIter<'_, T> {
    fn clone(&self) -> Self {
        SetIter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for SetIter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for SetIter<'_, T> {}
impl<T> FusedIterator for SetIter<'_, T> {}

impl<'a, T, C> IntoIterator for &'a Set<T, C> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> SetIter<'a, T> {
        self.iter()
    }
}

pub struct SetIntoIter<T, C> {
    inner: IntoKeys<T, (), C>,
}

impl<T, C> IntoIterator for Set<T, C> {
    type Item = T;
    type IntoIter = SetIntoIter<T, C>;

    fn into_iter(self) -> SetIntoIter<T, C> {
        SetIntoIter {
            inner: self.tree.into_keys(),
        }
    }
}

impl<T, C> Iterator for SetIntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, C> DoubleEndedIterator for SetIntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T, C> ExactSizeIterator for SetIntoIter<T, C> {}
impl<T, C> FusedIterator for SetIntoIter<T, C> {}
