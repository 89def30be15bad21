// Alias module - word -> alias storage and the alias text rewriter used by the fact command

mod mapping;
mod rewriter;
mod store;

pub use mapping::{capitalize, AliasMapping};
pub use rewriter::AliasRewriter;
pub use store::{AliasEntry, AliasError, AliasStore, FileAliasStore};
pub(crate) use store::{alias_conflicts, validate};
