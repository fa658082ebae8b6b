use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::entry::model::Example;

// Fullwidth and ASCII brackets/colons both occur in hand-entered data.
static WORD_READING_GLOSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+?)\s*[（(]\s*(.*?)\s*[）)]\s*[:：]\s*(.*?)\s*$")
        .expect("valid word-reading-gloss regex")
});
static WORD_READING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+?)\s*[（(]\s*(.*?)\s*[）)]\s*$").expect("valid word-reading regex")
});
static WORD_GLOSS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*[:：]\s*(.*?)\s*$").expect("valid word-gloss regex"));

/// Parse a free-text example such as `日本（にほん）: Japan`.
///
/// Patterns are tried in order, first match wins:
///
/// 1. `word（reading）: gloss`
/// 2. `word（reading）`
/// 3. `word: gloss`
///
/// Anything else becomes the word with empty reading and gloss.
pub fn parse_example(text: &str) -> Example {
    if let Some(c) = WORD_READING_GLOSS.captures(text) {
        return Example::new(&c[1], &c[2], &c[3]);
    }
    if let Some(c) = WORD_READING.captures(text) {
        return Example::new(&c[1], &c[2], "");
    }
    if let Some(c) = WORD_GLOSS.captures(text) {
        return Example::new(&c[1], "", &c[2]);
    }
    Example::new(text.trim(), "", "")
}

/// Ordered example list that suppresses structural duplicates.
///
/// The first occurrence of a `(tu, hiragana, nghia)` triple wins.
#[derive(Debug, Default, Clone)]
pub struct ExampleSet {
    seen: HashSet<Example>,
    items: Vec<Example>,
}

impl ExampleSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `ex` unless an equal example is already present; returns whether it was added.
    ///
    /// Examples without a headword are dropped.
    pub fn insert(&mut self, ex: Example) -> bool {
        if ex.tu.is_empty() {
            return false;
        }
        if !self.seen.insert(ex.clone()) {
            return false;
        }
        self.items.push(ex);
        true
    }

    /// Parse and insert a free-text example.
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.insert(parse_example(text))
    }

    /// Number of unique examples.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no example has been kept.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Examples in first-seen order.
    pub fn into_vec(self) -> Vec<Example> {
        self.items
    }
}

impl Extend<Example> for ExampleSet {
    fn extend<I: IntoIterator<Item = Example>>(&mut self, iter: I) {
        for ex in iter {
            self.insert(ex);
        }
    }
}

impl FromIterator<Example> for ExampleSet {
    fn from_iter<I: IntoIterator<Item = Example>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Merge several example sources into one de-duplicated list.
pub fn collect_examples<I, S>(sources: I) -> Vec<Example>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = Example>,
{
    let mut set = ExampleSet::new();
    for source in sources {
        set.extend(source);
    }
    set.into_vec()
}

#[cfg(test)]
#[path = "../../tests/unit/entry/examples.rs"]
mod tests;
