use std::{fmt, marker::PhantomData};

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{Comparator, Set, Tree};

/// A tree is written as a map, in ascending key order.
impl<K, V, C> Serialize for Tree<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

/// Entries are inserted one by one, so input order does not matter and a
/// later duplicate key overwrites an earlier one.
impl<'de, K, V, C> Deserialize<'de> for Tree<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeVisitor {
            phantom: PhantomData,
        })
    }
}

struct TreeVisitor<K, V, C> {
    phantom: PhantomData<(K, V, C)>,
}

impl<'de, K, V, C> Visitor<'de> for TreeVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = Tree<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tree = Tree::default();
        while let Some((k, v)) = map.next_entry()? {
            tree.insert(k, v);
        }
        Ok(tree)
    }
}

/// A set is written as a sequence, in ascending order.
impl<T: Serialize, C> Serialize for Set<T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, T, C> Deserialize<'de> for Set<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor {
            phantom: PhantomData,
        })
    }
}

struct SetVisitor<T, C> {
    phantom: PhantomData<(T, C)>,
}

impl<'de, T, C> Visitor<'de> for SetVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = Set<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = Set::default();
        while let Some(element) = seq.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}
