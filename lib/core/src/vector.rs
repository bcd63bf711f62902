use serde::{Deserialize, Serialize};

/// A sparse vector of term weights, entries sorted by column index
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from unordered `(index, weight)` pairs.
    /// Zero weights are dropped; duplicate indices are summed.
    #[must_use]
    pub fn from_pairs(mut pairs: Vec<(u32, f32)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);
        let mut entries: Vec<(u32, f32)> = Vec::with_capacity(pairs.len());
        for (idx, weight) in pairs {
            match entries.last_mut() {
                Some(last) if last.0 == idx => last.1 += weight,
                _ => entries.push((idx, weight)),
            }
        }
        entries.retain(|&(_, w)| w != 0.0);
        Self { entries }
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Weight stored at `index`, zero when absent
    pub fn get(&self, index: u32) -> f32 {
        self.entries
            .binary_search_by_key(&index, |&(idx, _)| idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product by merging the two sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; zero when either side is the zero vector
    #[inline]
    pub fn cosine_similarity(&self, other: &SparseVector) -> f32 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for (_, w) in &mut self.entries {
                *w *= inv_norm;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}
