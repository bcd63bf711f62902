//! Cosine ranking over a fitted TF-IDF space
//!
//! Two query paths share the same scoring:
//! - free text projected with the fitted vectorizer ([`QueryRanker::recommend`])
//! - an existing row's stored vector ([`QueryRanker::similar_to_user`])

use crate::filter::Filter;
use crate::{Demographics, DocumentMatrix, Error, Result, Scheme, SparseVector, TfidfVectorizer};
use ahash::AHashSet;
use serde::Serialize;

/// A ranked scheme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Row of the scheme in the corpus
    pub index: usize,
    pub name: String,
    pub score: f32,
}

/// Free-text search terms plus optional demographic tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub terms: Vec<String>,
    pub demographics: Demographics,
}

impl SearchQuery {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            demographics: Demographics::default(),
        }
    }

    #[must_use]
    pub fn with_demographics(mut self, demographics: Demographics) -> Self {
        self.demographics = demographics;
        self
    }

    /// Terms joined by spaces, followed by the raw demographic labels
    pub fn to_text(&self) -> String {
        let mut words: Vec<&str> = self.terms.iter().map(String::as_str).collect();
        words.extend(self.demographics.labels());
        words.join(" ")
    }
}

/// Read-only ranker over one corpus snapshot
#[derive(Clone, Copy)]
pub struct QueryRanker<'a> {
    schemes: &'a [Scheme],
    vectorizer: &'a TfidfVectorizer,
    matrix: &'a DocumentMatrix,
}

impl<'a> QueryRanker<'a> {
    /// `matrix` row `i` must be the vector of `schemes[i]`
    pub fn new(
        schemes: &'a [Scheme],
        vectorizer: &'a TfidfVectorizer,
        matrix: &'a DocumentMatrix,
    ) -> Result<Self> {
        if schemes.len() != matrix.len() {
            return Err(Error::InvalidConfig(format!(
                "corpus has {} schemes but matrix has {} rows",
                schemes.len(),
                matrix.len()
            )));
        }
        Ok(Self { schemes, vectorizer, matrix })
    }

    /// Top `k` distinct scheme names for a free-text query
    pub fn recommend(&self, query: &str, k: usize) -> Vec<Recommendation> {
        let query_vector = self.vectorizer.transform(query);
        let scored = self.score_all(&query_vector, |_| true);
        self.distinct_names(scored, k)
    }

    /// Like [`recommend`](Self::recommend) but only over schemes the filter accepts
    pub fn recommend_filtered(
        &self,
        query: &str,
        k: usize,
        filter: &dyn Filter,
    ) -> Vec<Recommendation> {
        let query_vector = self.vectorizer.transform(query);
        let scored = self.score_all(&query_vector, |i| filter.matches(&self.schemes[i]));
        self.distinct_names(scored, k)
    }

    pub fn search(&self, query: &SearchQuery, k: usize) -> Vec<Recommendation> {
        self.recommend(&query.to_text(), k)
    }

    /// The `k` rows most similar to the row owned by `user_id`.
    ///
    /// The user's stored vector is the query. The user's own row is excluded
    /// by index; other rows sharing its name are kept.
    pub fn similar_to_user(&self, user_id: u64, k: usize) -> Result<Vec<(usize, f32)>> {
        let own = self
            .schemes
            .iter()
            .position(|s| s.user_id == Some(user_id))
            .ok_or(Error::UserNotFound(user_id))?;

        let query_vector = self
            .matrix
            .row(own)
            .ok_or(Error::UserNotFound(user_id))?;

        let mut scored = self.score_all(query_vector, |i| i != own);
        scored.truncate(k);
        Ok(scored)
    }

    /// Cosine score of every accepted row, sorted descending.
    /// The sort is stable, so equal scores keep corpus order.
    fn score_all<P>(&self, query: &SparseVector, accept: P) -> Vec<(usize, f32)>
    where
        P: Fn(usize) -> bool,
    {
        let mut scored: Vec<(usize, f32)> = self
            .matrix
            .rows()
            .iter()
            .enumerate()
            .filter(|(i, _)| accept(*i))
            .map(|(i, row)| (i, query.cosine_similarity(row)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    fn distinct_names(&self, scored: Vec<(usize, f32)>, k: usize) -> Vec<Recommendation> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut results = Vec::with_capacity(k.min(scored.len()));
        for (index, score) in scored {
            if results.len() >= k {
                break;
            }
            let name = self.schemes[index].name.as_str();
            if seen.insert(name) {
                results.push(Recommendation {
                    index,
                    name: name.to_string(),
                    score,
                });
            }
        }
        results
    }
}
