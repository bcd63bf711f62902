//! # SchemeRec
//!
//! Content-based recommendations for welfare schemes.
//!
//! SchemeRec fits a TF-IDF vector space over scheme names and descriptions
//! and ranks schemes by cosine similarity, either to a free-text query or to
//! a known user's own record.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! schemerec --dataset recommendation_dataset.csv prompt
//! schemerec --dataset recommendation_dataset.csv serve --port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use schemerec::prelude::*;
//!
//! let settings = StorageSettings {
//!     dataset: "recommendation_dataset.csv".into(),
//!     ..Default::default()
//! };
//! let context = CorpusManager::new(settings).build().unwrap();
//! let ranker = context.ranker().unwrap();
//!
//! let query = SearchQuery::new(["education", "scholarship"]);
//! for rec in ranker.search(&query, 5) {
//!     println!("{} ({:.3})", rec.name, rec.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `schemerec-core` - Scheme records, TF-IDF vector space, cosine ranking
//! - `schemerec-storage` - CSV loading and content-addressed caching
//! - `schemerec-api` - REST endpoint

pub mod prompt;

// Re-export core types
pub use schemerec_core::{
    AgeBracket, Demographics, Domicile, Gender, Scheme, SocialCategory,
    TfidfVectorizer, DocumentMatrix, SparseVector, VectorSpaceConfig, TextField, StopWords,
    QueryRanker, Recommendation, SearchQuery,
    Filter, EligibilityFilter,
    Error, Result,
};

// Re-export storage
pub use schemerec_storage::{Corpus, CorpusLoader, CorpusManager, RecommenderContext, StorageSettings};

// Re-export API
pub use schemerec_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AgeBracket, Demographics, Domicile, Gender, Scheme, SocialCategory,
        VectorSpaceConfig, TextField, StopWords,
        QueryRanker, Recommendation, SearchQuery,
        Error, Result,
        CorpusManager, RecommenderContext, StorageSettings,
        RestApi,
    };
}
