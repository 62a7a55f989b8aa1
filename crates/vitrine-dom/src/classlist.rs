//! Class Lists
//!
//! Ordered, duplicate-free token sets backing the `class` attribute.
//! Mutators report whether they changed anything, which lets callers
//! detect repeated decoration without reading the list back.

use std::fmt;

/// Space-separated class tokens in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parses a `class` attribute value, dropping duplicate tokens.
    pub fn from_value(value: &str) -> Self {
        let mut list = Self::new();
        for token in value.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Number of tokens in the list.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the list has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when `token` is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Adds a token, returning true when it was not already present.
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Removes a token, returning true when it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Toggles a token and returns whether it is present afterwards.
    ///
    /// `force` pins the outcome: `Some(true)` always adds, `Some(false)`
    /// always removes.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        match force {
            Some(true) => {
                self.add(token);
                true
            }
            Some(false) => {
                self.remove(token);
                false
            }
            None => {
                if self.remove(token) {
                    false
                } else {
                    self.add(token);
                    true
                }
            }
        }
    }

    /// Replaces the whole list from a `class` attribute value.
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_value(value);
    }

    /// Serializes the list back to attribute form.
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterates the tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
