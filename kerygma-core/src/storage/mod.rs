//! Durable storage: key-value substrates and the collection adapter

mod adapter;
mod substrate;

pub use adapter::Persistence;
pub use substrate::{FileStore, KeyValueStore, MemoryStore};
