//! # SchemeRec API
//!
//! HTTP front end over a shared, read-only [`RecommenderContext`](schemerec_storage::RecommenderContext).
//!
//! | Method | Path         | Body                                          |
//! |--------|--------------|-----------------------------------------------|
//! | POST   | `/recommend` | `{"user_id": 1, "num_recommendations": 5}`    |
//! | GET    | `/health`    |                                               |

pub mod rest;

pub use rest::{RecommendationRequest, RestApi};
