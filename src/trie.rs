//! Trie data structure for dictionary lookups.
//!
//! The same structure serves two granularities: word and stem tries walk the
//! characters of a single word, phrase tries walk whole words. Keys are
//! case-folded on insert and on lookup. A child keyed by the wildcard `*`
//! stands for "this prefix followed by anything" and wins over any longer
//! exact path below the same node.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A single step of a key path
pub trait TrieKey: Clone + Eq + Hash {
    /// Look up the wildcard (`*`) entry of a child map
    fn wildcard_in<V>(children: &HashMap<Self, V>) -> Option<&V>;

    /// The case-folded comparison form of this key
    fn folded(&self) -> Self;
}

impl TrieKey for char {
    fn wildcard_in<V>(children: &HashMap<char, V>) -> Option<&V> {
        children.get(&'*')
    }

    /// Characters whose lowercase form spans several code points keep
    /// only the first one.
    fn folded(&self) -> char {
        self.to_lowercase().next().unwrap_or(*self)
    }
}

impl TrieKey for String {
    fn wildcard_in<V>(children: &HashMap<String, V>) -> Option<&V> {
        children.get("*")
    }

    fn folded(&self) -> String {
        self.to_lowercase()
    }
}

/// A node in the Trie
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, T: Serialize",
    deserialize = "K: Deserialize<'de>, T: Deserialize<'de>"
))]
struct TrieNode<K: TrieKey, T> {
    /// Children nodes, keyed by folded token
    children: HashMap<K, TrieNode<K, T>>,
    /// Payload of the path ending here
    payload: Option<T>,
}

impl<K: TrieKey, T> TrieNode<K, T> {
    fn new() -> Self {
        TrieNode {
            children: HashMap::new(),
            payload: None,
        }
    }

    /// The `*` child of this node, if any
    fn wildcard(&self) -> Option<&TrieNode<K, T>> {
        let child = K::wildcard_in(&self.children)?;
        debug_assert!(
            child.children.is_empty(),
            "wildcard node must not have descendants"
        );
        Some(child)
    }
}

/// Result of a successful walk through the trie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieMatch<'a, T> {
    /// Payload at the reached node (`None` when the path exists but
    /// carries no entry of its own)
    pub payload: Option<&'a T>,
    /// Number of key tokens consumed
    pub depth: usize,
}

/// A Trie mapping case-folded key paths to payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, T: Serialize",
    deserialize = "K: Deserialize<'de>, T: Deserialize<'de>"
))]
pub struct Trie<K: TrieKey, T> {
    /// The root node
    root: TrieNode<K, T>,
    /// Number of paths carrying a payload
    entry_count: usize,
}

impl<K: TrieKey, T> Default for Trie<K, T> {
    fn default() -> Self {
        Trie::new()
    }
}

impl<K: TrieKey, T> Trie<K, T> {
    /// Create a new empty Trie
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
            entry_count: 0,
        }
    }

    /// Get the number of entries in the trie
    pub fn len(&self) -> usize {
        self.entry_count
    }

    /// Check if the trie is empty
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Insert `payload` at the end of `path`, returning the payload it
    /// replaced, if any.
    pub fn insert<I>(&mut self, path: I, payload: T) -> Option<T>
    where
        I: IntoIterator<Item = K>,
    {
        let mut current = &mut self.root;
        for key in path {
            current = current
                .children
                .entry(key.folded())
                .or_insert_with(TrieNode::new);
        }

        let previous = current.payload.replace(payload);
        if previous.is_none() {
            self.entry_count += 1;
        }
        previous
    }

    /// Get the payload at exactly `path`, inserting one built by `make`
    /// when the path has none yet. Wildcards are not interpreted.
    pub fn get_or_insert_with<I, F>(&mut self, path: I, make: F) -> &mut T
    where
        I: IntoIterator<Item = K>,
        F: FnOnce() -> T,
    {
        let mut current = &mut self.root;
        for key in path {
            current = current
                .children
                .entry(key.folded())
                .or_insert_with(TrieNode::new);
        }

        if current.payload.is_none() {
            self.entry_count += 1;
        }
        current.payload.get_or_insert_with(make)
    }

    /// Walk `path` through the trie.
    ///
    /// Returns `None` when some token has no matching child. A `*` child met
    /// on the way (or at the end of the path) answers immediately with its
    /// own payload.
    pub fn search<I>(&self, path: I) -> Option<TrieMatch<'_, T>>
    where
        I: IntoIterator<Item = K>,
    {
        let mut current = &self.root;
        let mut depth = 0;
        let mut path = path.into_iter();

        loop {
            if let Some(wildcard) = current.wildcard() {
                return Some(TrieMatch {
                    payload: wildcard.payload.as_ref(),
                    depth,
                });
            }

            match path.next() {
                None => {
                    return Some(TrieMatch {
                        payload: current.payload.as_ref(),
                        depth,
                    })
                }
                Some(key) => {
                    current = current.children.get(&key.folded())?;
                    depth += 1;
                }
            }
        }
    }

    /// Get the payload matching `path`, if any
    pub fn get<I>(&self, path: I) -> Option<&T>
    where
        I: IntoIterator<Item = K>,
    {
        self.search(path).and_then(|m| m.payload)
    }

    /// Find the longest prefix of `path` that carries a payload.
    ///
    /// Returns the number of tokens in that prefix and its payload, or
    /// `(0, None)` when no node along the path has one.
    pub fn search_deepest<I>(&self, path: I) -> (usize, Option<&T>)
    where
        I: IntoIterator<Item = K>,
    {
        let mut current = &self.root;
        let mut depth = 0;
        let mut deepest = (0, None);
        let mut path = path.into_iter();

        loop {
            if current.payload.is_some() {
                deepest = (depth, current.payload.as_ref());
            }

            if let Some(wildcard) = current.wildcard() {
                return (depth, wildcard.payload.as_ref());
            }

            let Some(key) = path.next() else {
                return deepest;
            };
            match current.children.get(&key.folded()) {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => return deepest,
            }
        }
    }
}
