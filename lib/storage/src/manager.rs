use crate::cache::{self, FlatFileCache, CORPUS_FILE, MATRIX_FILE, VECTORIZER_FILE};
use crate::loader::{Corpus, CorpusLoader};
use schemerec_core::{
    DocumentMatrix, Error, QueryRanker, Result, Scheme, TfidfVectorizer, VectorSpaceConfig,
};
use std::path::PathBuf;

/// Where the corpus comes from and how the vector space is built
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub dataset: PathBuf,
    /// `None` disables the flat-file cache
    pub cache_dir: Option<PathBuf>,
    pub require_user_id: bool,
    pub vector_space: VectorSpaceConfig,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("recommendation_dataset.csv"),
            cache_dir: Some(PathBuf::from(".schemerec")),
            require_user_id: false,
            vector_space: VectorSpaceConfig::default(),
        }
    }
}

/// Immutable corpus + fitted vector space shared by every front end
#[derive(Debug)]
pub struct RecommenderContext {
    corpus: Corpus,
    vectorizer: TfidfVectorizer,
    matrix: DocumentMatrix,
}

impl RecommenderContext {
    /// Fit a vector space over an in-memory corpus
    pub fn build(corpus: Corpus, config: VectorSpaceConfig) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let (vectorizer, matrix) = TfidfVectorizer::fit_schemes(corpus.schemes(), &config)?;
        Ok(Self { corpus, vectorizer, matrix })
    }

    pub fn ranker(&self) -> Result<QueryRanker<'_>> {
        QueryRanker::new(self.corpus.schemes(), &self.vectorizer, &self.matrix)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn scheme(&self, index: usize) -> Option<&Scheme> {
        self.corpus.get(index)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn matrix(&self) -> &DocumentMatrix {
        &self.matrix
    }
}

/// Builds a [`RecommenderContext`], going through the cache when enabled
pub struct CorpusManager {
    settings: StorageSettings,
}

impl CorpusManager {
    pub fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    pub fn build(&self) -> Result<RecommenderContext> {
        let dataset = &self.settings.dataset;
        if !dataset.is_file() {
            return Err(Error::SourceNotFound(dataset.clone()));
        }

        let cache = match &self.settings.cache_dir {
            Some(dir) => match FlatFileCache::new(dir) {
                Ok(cache) => Some(cache),
                Err(e) => {
                    tracing::warn!("Cache disabled, cannot open {:?}: {}", dir, e);
                    None
                }
            },
            None => None,
        };

        let Some(cache) = cache else {
            return self.compute();
        };

        let key = cache::source_key(dataset, &self.settings.vector_space.fingerprint())
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;

        if let Some(context) = self.restore(&cache, &key) {
            tracing::info!(
                "Restored {} schemes from cache {:?}",
                context.corpus.len(),
                cache.dir()
            );
            return Ok(context);
        }

        let context = self.compute()?;
        self.persist(&cache, &key, &context);
        Ok(context)
    }

    fn compute(&self) -> Result<RecommenderContext> {
        let corpus = CorpusLoader::new()
            .require_user_id(self.settings.require_user_id)
            .load(&self.settings.dataset)?;
        RecommenderContext::build(corpus, self.settings.vector_space)
    }

    fn restore(&self, cache: &FlatFileCache, key: &str) -> Option<RecommenderContext> {
        let corpus: Corpus = cache.load(CORPUS_FILE, key)?;
        let vectorizer: TfidfVectorizer = cache.load(VECTORIZER_FILE, key)?;
        let matrix: DocumentMatrix = cache.load(MATRIX_FILE, key)?;

        if corpus.is_empty() || matrix.len() != corpus.len() {
            tracing::debug!("Cache miss: blobs disagree on corpus size");
            return None;
        }
        if self.settings.require_user_id && corpus.iter().any(|s| s.user_id.is_none()) {
            tracing::debug!("Cache miss: cached corpus has no user ids");
            return None;
        }

        Some(RecommenderContext {
            corpus,
            vectorizer,
            matrix,
        })
    }

    fn persist(&self, cache: &FlatFileCache, key: &str, context: &RecommenderContext) {
        let results = [
            cache.store(CORPUS_FILE, key, &context.corpus),
            cache.store(VECTORIZER_FILE, key, &context.vectorizer),
            cache.store(MATRIX_FILE, key, &context.matrix),
        ];
        for result in results {
            if let Err(e) = result {
                tracing::warn!("Cache write failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DATASET: &str = "scheme_name,description,age,social_category,gender,domicile_of_tripura,user_id\n\
        SchemeA,education scholarship for students,16-20,ST,F,Y,1\n\
        SchemeB,healthcare subsidy for elderly,Above 50,SC,M,N,2\n\
        SchemeC,scholarship for girl students,16-20,OBC,F,Y,3\n";

    fn settings(dir: &std::path::Path) -> StorageSettings {
        let dataset = dir.join("recommendation_dataset.csv");
        fs::write(&dataset, DATASET).unwrap();
        StorageSettings {
            dataset,
            cache_dir: Some(dir.join("cache")),
            require_user_id: true,
            vector_space: VectorSpaceConfig::default(),
        }
    }

    #[test]
    fn test_build_writes_cache_and_restores_identically() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CorpusManager::new(settings(dir.path()));

        let first = manager.build().unwrap();
        assert!(dir.path().join("cache").join(CORPUS_FILE).exists());
        assert!(dir.path().join("cache").join(MATRIX_FILE).exists());

        let second = manager.build().unwrap();
        assert_eq!(first.corpus(), second.corpus());
        assert_eq!(first.matrix(), second.matrix());
        assert_eq!(
            first.ranker().unwrap().recommend("scholarship students", 3),
            second.ranker().unwrap().recommend("scholarship students", 3)
        );
    }

    #[test]
    fn test_changed_source_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let manager = CorpusManager::new(settings.clone());
        assert_eq!(manager.build().unwrap().corpus().len(), 3);

        fs::write(
            &settings.dataset,
            format!("{DATASET}SchemeD,rural housing grant,26-30,SC,M,Y,4\n"),
        )
        .unwrap();
        assert_eq!(manager.build().unwrap().corpus().len(), 4);
    }

    #[test]
    fn test_without_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.cache_dir = None;
        let context = CorpusManager::new(settings).build().unwrap();
        assert_eq!(context.matrix().len(), 3);
        assert!(!dir.path().join("cache").exists());
    }

    #[test]
    fn test_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            dataset: dir.path().join("absent.csv"),
            ..Default::default()
        };
        let err = CorpusManager::new(settings).build().unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }

    #[test]
    fn test_context_ranks_example() {
        let dir = tempfile::tempdir().unwrap();
        let context = CorpusManager::new(settings(dir.path())).build().unwrap();
        let results = context.ranker().unwrap().recommend("education scholarship", 1);
        assert_eq!(results[0].name, "SchemeA");
    }
}
