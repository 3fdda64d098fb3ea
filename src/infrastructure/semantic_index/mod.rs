//! Semantic index implementations

mod in_memory;
mod snapshot;

pub use in_memory::InMemorySemanticIndex;
