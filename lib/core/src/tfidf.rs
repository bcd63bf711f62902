//! TF-IDF vector space
//!
//! Fitting assigns every term seen in the corpus a column and a smoothed
//! inverse document frequency. Projection reuses those columns and weights
//! without touching them, so out-of-vocabulary query terms contribute nothing.

use crate::tokenize::{analyze, StopWords};
use crate::{Error, Result, Scheme, SparseVector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Which scheme fields make up a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextField {
    /// `scheme_name + " " + description`
    #[default]
    NameAndDescription,
    DescriptionOnly,
}

impl TextField {
    pub fn document(self, scheme: &Scheme) -> String {
        match self {
            TextField::NameAndDescription => scheme.name_and_description(),
            TextField::DescriptionOnly => scheme.description.clone(),
        }
    }
}

/// Document and tokenizer policy for one vector space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VectorSpaceConfig {
    pub text_field: TextField,
    pub stop_words: StopWords,
}

impl VectorSpaceConfig {
    /// Stable string identifying this policy, used in cache keys
    pub fn fingerprint(&self) -> String {
        format!("{:?}/{:?}", self.text_field, self.stop_words)
    }
}

/// One normalized TF-IDF row per document, in corpus order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentMatrix {
    rows: Vec<SparseVector>,
    n_features: usize,
}

impl DocumentMatrix {
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }
}

/// A fitted term-weighting model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TfidfVectorizer {
    // term -> column
    vocabulary: AHashMap<String, u32>,
    // column -> smoothed idf
    idf: Vec<f32>,
    n_documents: usize,
    stop_words: StopWords,
}

impl TfidfVectorizer {
    /// Fit on `documents` and return the model with the transformed corpus.
    ///
    /// Row `i` of the matrix corresponds to `documents[i]`.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        stop_words: StopWords,
    ) -> Result<(Self, DocumentMatrix)> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| analyze(doc.as_ref(), stop_words))
            .collect();

        // term -> document frequency
        let mut dfs: AHashMap<&str, u32> = AHashMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *dfs.entry(term).or_insert(0) += 1;
            }
        }

        if dfs.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        // Columns in sorted term order keep fits deterministic
        let mut terms: Vec<&str> = dfs.keys().copied().collect();
        terms.sort_unstable();

        let n = documents.len() as f32;
        let mut vocabulary = AHashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (column, term) in terms.iter().enumerate() {
            let df = dfs[term] as f32;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert((*term).to_string(), column as u32);
        }

        let vectorizer = Self {
            vocabulary,
            idf,
            n_documents: documents.len(),
            stop_words,
        };

        let rows = tokenized
            .iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();
        let matrix = DocumentMatrix {
            rows,
            n_features: vectorizer.idf.len(),
        };

        tracing::debug!(
            "Fitted TF-IDF: {} documents, {} terms",
            vectorizer.n_documents,
            vectorizer.idf.len()
        );

        Ok((vectorizer, matrix))
    }

    /// Fit over the configured document text of each scheme
    pub fn fit_schemes(
        schemes: &[Scheme],
        config: &VectorSpaceConfig,
    ) -> Result<(Self, DocumentMatrix)> {
        let documents: Vec<String> = schemes
            .iter()
            .map(|s| config.text_field.document(s))
            .collect();
        Self::fit_transform(&documents, config.stop_words)
    }

    /// Project text into the fitted space
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text, self.stop_words))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: AHashMap<u32, f32> = AHashMap::new();
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }
        let pairs = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column as usize]))
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }

    #[inline]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary
            .get(term)
            .map(|&column| self.idf[column as usize])
    }
}
