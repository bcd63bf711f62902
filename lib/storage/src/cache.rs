// Content-addressed flat-file cache for the cleaned corpus and fitted vector space
use anyhow::{anyhow, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CORPUS_FILE: &str = "cleaned_corpus.bin";
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.bin";
pub const MATRIX_FILE: &str = "tfidf_matrix.bin";

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    key: &'a str,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    key: String,
    payload: T,
}

/// Cache key: SHA-256 of the source bytes plus the vector-space fingerprint
pub fn source_key<P: AsRef<Path>>(source: P, fingerprint: &str) -> Result<String> {
    let data = fs::read(source.as_ref())?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    hasher.update([0u8]);
    hasher.update(fingerprint.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// A directory of bincode blobs, each stamped with the key it was built from.
///
/// A blob is only returned when its stamp equals the requested key, so a
/// changed source file or vector-space policy forces recomputation.
pub struct FlatFileCache {
    cache_dir: PathBuf,
}

impl FlatFileCache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(name)
    }

    /// `None` on a missing, undecodable or stale blob
    pub fn load<T: DeserializeOwned>(&self, name: &str, key: &str) -> Option<T> {
        let path = self.path(name);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(_) => {
                tracing::debug!("Cache miss: {:?} not present", path);
                return None;
            }
        };

        match bincode::deserialize::<Envelope<T>>(&data) {
            Ok(envelope) if envelope.key == key => Some(envelope.payload),
            Ok(_) => {
                tracing::debug!("Cache miss: {:?} built from a different source", path);
                None
            }
            Err(e) => {
                tracing::debug!("Cache miss: {:?} undecodable: {}", path, e);
                None
            }
        }
    }

    pub fn store<T: Serialize>(&self, name: &str, key: &str, payload: &T) -> Result<()> {
        let data = bincode::serialize(&EnvelopeRef { key, payload })
            .map_err(|e| anyhow!("Serialization error: {}", e))?;
        AtomicFile::new(self.path(name), AllowOverwrite)
            .write(|f| f.write_all(&data))
            .map_err(|e| anyhow!("Failed to write cache file {}: {}", name, e))?;
        Ok(())
    }
}
