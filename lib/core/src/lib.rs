//! # SchemeRec Core
//!
//! Core library for the SchemeRec recommender.
//!
//! This crate provides the data model and the ranking algorithms:
//!
//! - [`Scheme`] - A welfare scheme row with categorical eligibility fields
//! - [`TfidfVectorizer`] - TF-IDF vector space fitted over scheme text
//! - [`SparseVector`] - Sparse term-weight vector with cosine similarity
//! - [`QueryRanker`] - Cosine ranking with name de-duplication
//! - [`EligibilityFilter`] - Optional demographic filtering
//!
//! ## Example
//!
//! ```rust
//! use schemerec_core::{
//!     AgeBracket, Domicile, Gender, QueryRanker, Scheme, SocialCategory,
//!     TfidfVectorizer, VectorSpaceConfig,
//! };
//!
//! let scheme = |name: &str, description: &str| Scheme {
//!     name: name.to_string(),
//!     description: description.to_string(),
//!     age: AgeBracket::From21To25,
//!     social_category: SocialCategory::St,
//!     gender: Gender::Male,
//!     domicile: Domicile::Yes,
//!     user_id: None,
//! };
//! let schemes = vec![
//!     scheme("SchemeA", "education scholarship for students"),
//!     scheme("SchemeB", "healthcare subsidy for elderly"),
//! ];
//!
//! let (vectorizer, matrix) =
//!     TfidfVectorizer::fit_schemes(&schemes, &VectorSpaceConfig::default()).unwrap();
//! let ranker = QueryRanker::new(&schemes, &vectorizer, &matrix).unwrap();
//!
//! let results = ranker.recommend("education scholarship", 1);
//! assert_eq!(results[0].name, "SchemeA");
//! ```

pub mod error;
pub mod scheme;
pub mod tokenize;
pub mod vector;
pub mod tfidf;
pub mod filter;
pub mod ranker;

pub use error::{Error, Result};
pub use scheme::{AgeBracket, Demographics, Domicile, Gender, Scheme, SocialCategory, UnknownLabel};
pub use tokenize::{tokenize, StopWords};
pub use vector::SparseVector;
pub use tfidf::{DocumentMatrix, TextField, TfidfVectorizer, VectorSpaceConfig};
pub use filter::{EligibilityFilter, Filter};
pub use ranker::{QueryRanker, Recommendation, SearchQuery};
