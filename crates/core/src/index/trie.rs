use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// Prefix tree over declaration names.
///
/// Queries cost the prefix length plus the size of the matching subtree.
/// Words can be added at any time; nothing is ever removed.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `word`, returning `false` if it was already present. Empty
    /// words are ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.terminal)
    }

    /// All known words starting with `prefix` (case-sensitive). The empty
    /// prefix returns every word. Results come back in lexicographic order,
    /// which callers must not rely on.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(node) = self.find(prefix) {
            let mut buf = prefix.to_string();
            Self::collect(node, &mut buf, &mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn collect(node: &TrieNode, buf: &mut String, out: &mut Vec<String>) {
        if node.terminal {
            out.push(buf.clone());
        }
        for (ch, child) in &node.children {
            buf.push(*ch);
            Self::collect(child, buf, out);
            buf.pop();
        }
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, words: I) {
        for word in words {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut index = Self::new();
        index.extend(words);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_returns_only_prefixed_words() {
        let index: PrefixIndex = ["getName", "getValue", "setName", "get"].into_iter().collect();

        let mut got = index.complete("get");
        got.sort();
        assert_eq!(got, vec!["get", "getName", "getValue"]);
        assert!(index.complete("x").is_empty());
        assert_eq!(index.complete("setN"), vec!["setName"]);
    }

    #[test]
    fn test_empty_prefix_returns_everything() {
        let index: PrefixIndex = ["b", "a", "c"].into_iter().collect();
        assert_eq!(index.complete("").len(), 3);
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let index: PrefixIndex = ["Foo", "foo"].into_iter().collect();
        assert_eq!(index.complete("F"), vec!["Foo"]);
    }

    #[test]
    fn test_duplicates_are_stored_once() {
        let mut index = PrefixIndex::new();
        assert!(index.insert("process"));
        assert!(!index.insert("process"));
        assert!(!index.insert(""));
        assert_eq!(index.len(), 1);
        assert_eq!(index.complete("pro"), vec!["process"]);
    }

    #[test]
    fn test_incremental_extension() {
        let mut index: PrefixIndex = ["alpha"].into_iter().collect();
        index.extend(["alphabet", "beta"]);
        assert!(index.contains("alphabet"));
        assert!(!index.contains("alph"));
        assert_eq!(index.complete("alpha").len(), 2);
    }

    #[test]
    fn test_non_ascii_names() {
        let index: PrefixIndex = ["größe", "grün"].into_iter().collect();
        assert_eq!(index.complete("grö"), vec!["größe"]);
    }
}
