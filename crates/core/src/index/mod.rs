//! Flattening of declaration forests into lookup tables and the prefix
//! index that backs autocomplete.

mod indexer;
mod trie;

pub use indexer::SourceIndexer;
pub use trie::PrefixIndex;
