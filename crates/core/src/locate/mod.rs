//! Resolution of declarations and free text into highlighted spans of the
//! rendered buffer.

pub mod buffer;
mod locator;
pub mod outline;
pub mod search;
pub mod signature;

pub use buffer::{BadLocation, Span, StringBuffer, TextBuffer};
pub use locator::{DeclarationLocator, NavigationTarget, Notification, find_text};
pub use outline::{Outline, OutlineNode, OutlinePath};
pub use search::{SearchError, SearchOptions, SearchQuery};
pub use signature::{Signature, extract_signature};
