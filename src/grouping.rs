//! Sequence-to-mapping grouping
//!
//! Groups are formed by key value across the whole input, not only over
//! consecutive runs. Items keep their relative order inside a group and
//! groups are ordered by the first time their key was seen.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    #[error("Key function failed: {0}")]
    InvalidKeyFunction(String),

    #[error("Key has {actual} components but {expected} field names were given")]
    FieldCountMismatch { expected: usize, actual: usize },
}

/// Insertion-ordered mapping from key to the values grouped under it.
#[derive(Debug, Clone)]
pub struct Groups<K, V> {
    entries: Vec<(K, Vec<V>)>,
    index: HashMap<K, usize>,
}

impl<K, V> Groups<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn push(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[V]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_slice())
    }

    /// Remove a group, returning its values or an empty list when the key
    /// was never seen.
    pub fn take<Q>(&mut self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(position) = self.index.remove(key) else {
            return Vec::new();
        };
        let (_, values) = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        values
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for Groups<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for Groups<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> IntoIterator for Groups<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn collect_groups<T, K, V, E, F, G>(
    items: impl IntoIterator<Item = T>,
    mut key_fn: F,
    mut value_fn: G,
) -> Result<Groups<K, V>, E>
where
    K: Hash + Eq + Clone,
    F: FnMut(&T) -> Result<K, E>,
    G: FnMut(T) -> V,
{
    let mut groups = Groups::new();
    for item in items {
        let key = key_fn(&item)?;
        groups.push(key, value_fn(item));
    }
    Ok(groups)
}

/// Group items by key, keeping the items themselves as values.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Groups<K, T>
where
    K: Hash + Eq + Clone,
    F: FnMut(&T) -> K,
{
    group_by_map(items, key_fn, |item| item)
}

/// Group items by key, storing the projection of each item.
pub fn group_by_map<T, K, V, F, G>(
    items: impl IntoIterator<Item = T>,
    mut key_fn: F,
    value_fn: G,
) -> Groups<K, V>
where
    K: Hash + Eq + Clone,
    F: FnMut(&T) -> K,
    G: FnMut(T) -> V,
{
    let grouped: Result<_, std::convert::Infallible> =
        collect_groups(items, |item| Ok(key_fn(item)), value_fn);
    match grouped {
        Ok(groups) => groups,
        Err(never) => match never {},
    }
}

/// Like [`group_by_map`] with a fallible key function. The first failure
/// aborts the whole grouping.
pub fn try_group_by<T, K, V, E, F, G>(
    items: impl IntoIterator<Item = T>,
    mut key_fn: F,
    value_fn: G,
) -> Result<Groups<K, V>, GroupingError>
where
    K: Hash + Eq + Clone,
    E: Display,
    F: FnMut(&T) -> Result<K, E>,
    G: FnMut(T) -> V,
{
    collect_groups(
        items,
        |item| key_fn(item).map_err(|e| GroupingError::InvalidKeyFunction(e.to_string())),
        value_fn,
    )
}

/// One group produced by [`group_by_composite`]: a named field per key
/// component plus the grouped values under their own field name.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord<K, V> {
    fields: Vec<(String, K)>,
    value_field: String,
    values: Vec<V>,
}

impl<K, V> GroupRecord<K, V> {
    pub fn key(&self, name: &str) -> Option<&K> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn key_tuple(&self) -> Vec<&K> {
        self.fields.iter().map(|(_, value)| value).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &K)> {
        self.fields.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

impl<K, V> Serialize for GroupRecord<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.serialize_entry(&self.value_field, &self.values)?;
        map.end()
    }
}

/// Group by a composite key and name each key component.
///
/// `key_fn` must return exactly `key_field_names.len()` components for every
/// item, otherwise the call fails with [`GroupingError::FieldCountMismatch`].
pub fn group_by_composite<T, K, V, F, G>(
    items: impl IntoIterator<Item = T>,
    mut key_fn: F,
    value_fn: G,
    key_field_names: &[&str],
    value_field_name: &str,
) -> Result<Vec<GroupRecord<K, V>>, GroupingError>
where
    K: Hash + Eq + Clone,
    F: FnMut(&T) -> Vec<K>,
    G: FnMut(T) -> V,
{
    let expected = key_field_names.len();
    let groups = collect_groups(
        items,
        |item| {
            let key = key_fn(item);
            if key.len() == expected {
                Ok(key)
            } else {
                Err(GroupingError::FieldCountMismatch {
                    expected,
                    actual: key.len(),
                })
            }
        },
        value_fn,
    )?;

    Ok(groups
        .into_iter()
        .map(|(key, values)| GroupRecord {
            fields: key_field_names
                .iter()
                .map(|name| name.to_string())
                .zip(key)
                .collect(),
            value_field: value_field_name.to_string(),
            values,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_group_by_empty() {
        let groups = group_by(Vec::<i32>::new(), |n| n % 2);
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }

    #[test]
    fn test_group_by_merges_non_adjacent_keys() {
        let groups = group_by(vec![1, 2, 3, 4, 5], |n| n % 2 == 0);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get(&false), Some(&[1, 3, 5][..]));
        assert_eq!(groups.get(&true), Some(&[2, 4][..]));
    }

    #[test]
    fn test_group_by_first_seen_key_order() {
        let words = vec!["beta", "alpha", "bravo", "apple", "charlie"];
        let groups = group_by(words, |w| w.chars().next().unwrap_or_default());

        let keys: Vec<char> = groups.keys().copied().collect();
        assert_eq!(keys, vec!['b', 'a', 'c']);
        assert_eq!(groups.get(&'b'), Some(&["beta", "bravo"][..]));
        assert_eq!(groups.get(&'a'), Some(&["alpha", "apple"][..]));
    }

    #[test]
    fn test_group_by_value_equal_keys_merge() {
        let cities = vec![
            ("San Francisco".to_string(), 1),
            ("New York".to_string(), 2),
            ("San Francisco".to_string(), 3),
        ];
        let groups = group_by_map(cities, |(city, _)| city.clone(), |(_, id)| id);

        assert_eq!(groups.get("San Francisco"), Some(&[1, 3][..]));
        assert_eq!(groups.get("New York"), Some(&[2][..]));
    }

    #[test]
    fn test_group_by_is_a_partition() {
        let items: Vec<i32> = (0..50).map(|n| (n * 7) % 13).collect();
        let groups = group_by(items.clone(), |n| n % 4);

        let mut flattened: Vec<i32> = groups.iter().flat_map(|(_, v)| v.to_vec()).collect();
        let mut original = items.clone();
        flattened.sort_unstable();
        original.sort_unstable();
        assert_eq!(flattened, original);

        for (key, values) in groups.iter() {
            let expected: Vec<i32> = items.iter().copied().filter(|n| n % 4 == *key).collect();
            assert_eq!(values, expected.as_slice());
        }
    }

    #[test]
    fn test_group_by_past_and_upcoming_shows() {
        let now = Utc::now();
        let shows = vec![now - Duration::days(1), now + Duration::days(1)];

        let groups = group_by(shows, |start| *start < now);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get(&true).map(|v| v.len()), Some(1));
        assert_eq!(groups.get(&false).map(|v| v.len()), Some(1));
    }

    #[test]
    fn test_take_removes_group() {
        let mut groups = group_by(vec![1, 2, 3, 4], |n| n % 2 == 0);

        assert_eq!(groups.take(&false), vec![1, 3]);
        assert_eq!(groups.take(&false), Vec::<i32>::new());
        assert_eq!(groups.get(&true), Some(&[2, 4][..]));
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_try_group_by_key_failure_aborts() {
        let result = try_group_by(
            vec!["1", "2", "x", "3"],
            |s| s.parse::<i32>(),
            |s| s.to_string(),
        );

        match result {
            Err(GroupingError::InvalidKeyFunction(message)) => {
                assert!(message.contains("invalid digit"))
            }
            other => panic!("expected InvalidKeyFunction, got {:?}", other),
        }
    }

    #[test]
    fn test_try_group_by_success() {
        let groups = try_group_by(vec!["1", "1", "2"], |s| s.parse::<i32>(), |s| s.len())
            .expect("all keys parse");
        assert_eq!(groups.get(&1), Some(&[1, 1][..]));
    }

    #[test]
    fn test_group_by_composite_records() {
        let venues = vec![
            ("San Francisco", "CA", "The Musical Hop"),
            ("New York", "NY", "The Dueling Pianos Bar"),
            ("San Francisco", "CA", "Park Square Live Music & Coffee"),
        ];

        let records = group_by_composite(
            venues,
            |(city, state, _)| vec![city.to_string(), state.to_string()],
            |(_, _, name)| name.to_string(),
            &["city", "state"],
            "venues",
        )
        .expect("field counts match");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key("city").map(String::as_str), Some("San Francisco"));
        assert_eq!(records[0].key("state").map(String::as_str), Some("CA"));
        assert_eq!(
            records[0].values(),
            &[
                "The Musical Hop".to_string(),
                "Park Square Live Music & Coffee".to_string()
            ]
        );
        assert_eq!(records[1].key("city").map(String::as_str), Some("New York"));
        assert_eq!(records[1].value_field(), "venues");
    }

    #[test]
    fn test_group_by_composite_key_round_trip() {
        let rows = vec![(1, 'a', 10), (2, 'b', 20), (1, 'a', 30), (1, 'b', 40)];
        let records = group_by_composite(
            rows.clone(),
            |(n, c, _)| vec![n.to_string(), c.to_string()],
            |row| row,
            &["n", "c"],
            "rows",
        )
        .expect("field counts match");

        for record in &records {
            let rebuilt: Vec<String> = ["n", "c"]
                .iter()
                .filter_map(|name| record.key(name).cloned())
                .collect();
            assert!(record
                .values()
                .iter()
                .any(|(n, c, _)| rebuilt == vec![n.to_string(), c.to_string()]));
        }
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_group_by_composite_field_count_mismatch() {
        let result = group_by_composite(
            vec![("San Francisco", "CA")],
            |(city, state)| vec![city.to_string(), state.to_string()],
            |item| item,
            &["city"],
            "venues",
        );

        assert_eq!(
            result.unwrap_err(),
            GroupingError::FieldCountMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_group_record_serializes_flat() {
        let records = group_by_composite(
            vec![("Seattle", "WA", 7)],
            |(city, state, _)| vec![city.to_string(), state.to_string()],
            |(_, _, id)| id,
            &["city", "state"],
            "venues",
        )
        .expect("field counts match");

        let value = serde_json::to_value(&records).unwrap();
        assert_eq!(
            value,
            json!([{ "city": "Seattle", "state": "WA", "venues": [7] }])
        );
    }
}
