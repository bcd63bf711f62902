pub mod loader;
pub mod cache;
pub mod manager;

pub use loader::{Corpus, CorpusLoader, LoadReport};
pub use cache::FlatFileCache;
pub use manager::{CorpusManager, RecommenderContext, StorageSettings};
