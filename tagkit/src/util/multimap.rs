//! An insertion-ordered, multi-value map
//!
//! Every tag format here allows a key to appear more than once (multiple artists, multiple
//! `APIC` frames, ...). A [`MultiMap`] keeps all of them, in the order they were read.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

/// An ordered multi-value dictionary
///
/// * Keys are iterated in the order they were first inserted
/// * Values under a key keep their insertion order, and the first one is treated as canonical
/// * A key is never present with zero values
///
/// # Examples
///
/// ```rust
/// use tagkit::MultiMap;
///
/// let mut map = MultiMap::new();
/// map.insert(String::from("artist"), String::from("Foo"));
/// map.insert(String::from("artist"), String::from("Bar"));
///
/// assert_eq!(map.get("artist").map(String::as_str), Some("Foo"));
/// assert_eq!(map.get_all("artist").len(), 2);
///
/// map.remove_at("artist", Some(0));
/// map.remove_at("artist", Some(0));
/// assert!(!map.contains_key("artist"));
/// ```
#[derive(Clone)]
pub struct MultiMap<K, V> {
	entries: Vec<(K, Vec<V>)>,
	// Key -> position in `entries`
	index: HashMap<K, usize>,
}

impl<K, V> Default for MultiMap<K, V> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}
}

impl<K: PartialEq, V: PartialEq> PartialEq for MultiMap<K, V> {
	fn eq(&self, other: &Self) -> bool {
		self.entries == other.entries
	}
}

impl<K: Eq, V: Eq> Eq for MultiMap<K, V> {}

impl<K: Debug, V: Debug> Debug for MultiMap<K, V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.entries.iter().map(|(key, values)| (key, values)))
			.finish()
	}
}

impl<K, V> MultiMap<K, V> {
	/// Create an empty `MultiMap`
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of distinct keys
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// The total number of values, across all keys
	pub fn value_count(&self) -> usize {
		self.entries.iter().map(|(_, values)| values.len()).sum()
	}

	/// Whether the map contains no keys
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate over every key and value pair, in order
	///
	/// A key with multiple values will be yielded once per value.
	pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
		self.entries
			.iter()
			.flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
	}

	/// Iterate over every key along with all of its values
	pub fn iter_grouped(&self) -> impl Iterator<Item = (&K, &[V])> {
		self.entries
			.iter()
			.map(|(key, values)| (key, values.as_slice()))
	}

	/// Iterate over the keys, in order
	pub fn keys(&self) -> impl Iterator<Item = &K> {
		self.entries.iter().map(|(key, _)| key)
	}

	/// Iterate over every value, in order
	pub fn values(&self) -> impl Iterator<Item = &V> {
		self.entries.iter().flat_map(|(_, values)| values.iter())
	}

	/// Remove every key and value
	pub fn clear(&mut self) {
		self.entries.clear();
		self.index.clear();
	}
}

impl<K, V> MultiMap<K, V>
where
	K: Eq + Hash + Clone,
{
	fn position<Q>(&self, key: &Q) -> Option<usize>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.index.get(key).copied()
	}

	fn push_key(&mut self, key: K, value: V) {
		self.index.insert(key.clone(), self.entries.len());
		self.entries.push((key, vec![value]));
	}

	// Positions after a removed key shift down
	fn remove_entry(&mut self, pos: usize) -> Vec<V> {
		let (key, values) = self.entries.remove(pos);
		self.index.remove(&key);

		for (_, entry_pos) in self.index.iter_mut().filter(|(_, p)| **p > pos) {
			*entry_pos -= 1;
		}

		values
	}

	fn reindex(&mut self) {
		self.index.clear();
		for (pos, (key, _)) in self.entries.iter().enumerate() {
			self.index.insert(key.clone(), pos);
		}
	}

	/// Append `value` to `key`'s values, creating the key if necessary
	pub fn insert(&mut self, key: K, value: V) {
		match self.position(&key) {
			Some(pos) => self.entries[pos].1.push(value),
			None => self.push_key(key, value),
		}
	}

	/// Replace the first value of `key`, or insert it if the key is absent
	///
	/// Returns the replaced value, if any.
	pub fn set(&mut self, key: K, value: V) -> Option<V> {
		match self.position(&key) {
			Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1[0], value)),
			None => {
				self.push_key(key, value);
				None
			},
		}
	}

	/// Keep only the values matching `f`
	///
	/// Keys left without values are removed.
	pub fn retain<F>(&mut self, mut f: F)
	where
		F: FnMut(&K, &V) -> bool,
	{
		for (key, values) in &mut self.entries {
			values.retain(|value| f(key, value));
		}

		let len = self.entries.len();
		self.entries.retain(|(_, values)| !values.is_empty());

		if self.entries.len() != len {
			self.reindex();
		}
	}

	/// Whether `key` has any values
	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.position(key).is_some()
	}

	/// Get the first value of `key`
	pub fn get<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.get_at(key, 0)
	}

	/// Get the value of `key` at `index`
	pub fn get_at<Q>(&self, key: &Q, index: usize) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.get_all(key).get(index)
	}

	/// Get a mutable reference to the value of `key` at `index`
	pub fn get_at_mut<Q>(&mut self, key: &Q, index: usize) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		let pos = self.position(key)?;
		self.entries[pos].1.get_mut(index)
	}

	/// Get all values of `key`, in insertion order
	///
	/// This is empty if the key is absent.
	pub fn get_all<Q>(&self, key: &Q) -> &[V]
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		match self.position(key) {
			Some(pos) => &self.entries[pos].1,
			None => &[],
		}
	}

	/// Replace the value of `key` at `index`
	///
	/// Returns the old value, or gives `value` back as an `Err` if there is nothing at `index`.
	pub fn replace_at<Q>(&mut self, key: &Q, index: usize, value: V) -> Result<V, V>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		match self.get_at_mut(key, index) {
			Some(existing) => Ok(std::mem::replace(existing, value)),
			None => Err(value),
		}
	}

	/// Remove values from `key`
	///
	/// With an `index`, only the value at that position is removed. Otherwise, every value
	/// (and the key itself) is removed. Removing the last value of a key removes the key.
	///
	/// Returns the removed values.
	pub fn remove_at<Q>(&mut self, key: &Q, index: Option<usize>) -> Vec<V>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		let Some(pos) = self.position(key) else {
			return Vec::new();
		};

		let Some(index) = index else {
			return self.remove_entry(pos);
		};

		let values = &mut self.entries[pos].1;
		if index >= values.len() {
			return Vec::new();
		}

		let removed = values.remove(index);
		if values.is_empty() {
			self.remove_entry(pos);
		}

		vec![removed]
	}
}

impl<K, V> IntoIterator for MultiMap<K, V> {
	type Item = (K, Vec<V>);
	type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
