//! Session memory implementations for Eatba.

pub mod in_memory;

pub use in_memory::InMemorySessionStore;
