//! TF-IDF vectorization over the catalog text corpus
//!
//! Term weighting uses smoothed inverse document frequency with L2-normalized
//! rows: idf(t) = ln((1 + n) / (1 + df(t))) + 1, w(t, d) = tf(t, d) * idf(t).
//! Vocabulary and weights are corpus-relative; the model must be refit
//! whenever catalog membership or text changes.

use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Word tokens of 2+ alphanumeric characters, lowercased
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"))
}

/// Tokenize a text into lowercase word terms
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A fitted TF-IDF model: vocabulary plus per-term inverse document frequency
///
/// Terms map to dense vector columns in sorted order, so two fits over the
/// same corpus produce byte-identical vectors.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfModel {
    /// Fit a model over a document corpus
    ///
    /// An empty corpus (or a corpus with no tokens at all) produces a model
    /// with an empty vocabulary; every transform then yields an empty vector.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

        // Document frequency per term
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&String> = tokens.iter().collect();
            seen.sort();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term.clone()).or_default() += 1;
            }
        }

        // Sorted terms take dense columns in order
        let vocabulary: BTreeMap<String, usize> = doc_freq
            .keys()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let n_docs = docs.len() as f32;
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = doc_freq[term] as f32;
            idf[idx] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }

        Self { vocabulary, idf }
    }

    /// Number of terms in the fitted vocabulary
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Map a text into the fitted vocabulary space
    ///
    /// Terms outside the vocabulary are dropped. The result is L2-normalized;
    /// a text with no known terms yields an all-zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension()];
        if self.vocabulary.is_empty() {
            return vector;
        }

        let mut counts: HashMap<usize, f32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_default() += 1.0;
            }
        }

        for (idx, tf) in counts {
            vector[idx] = tf * self.idf[idx];
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }

    /// Transform a batch of documents in parallel
    pub fn transform_batch<S: AsRef<str> + Sync>(&self, docs: &[S]) -> Vec<Vec<f32>> {
        docs.par_iter().map(|d| self.transform(d.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;
    use approx::assert_relative_eq;

    #[test]
    fn test_tokenize_drops_short_tokens() {
        let tokens = tokenize("A Python ML tutorial, part 2!");
        assert_eq!(tokens, vec!["python", "ml", "tutorial", "part"]);
    }

    #[test]
    fn test_empty_text_yields_zero_vector() {
        let model = TfidfModel::fit(&["python machine learning", "cooking pasta"]);
        let vector = model.transform("");
        assert_eq!(vector.len(), model.dimension());
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_corpus() {
        let docs: Vec<String> = vec![];
        let model = TfidfModel::fit(&docs);
        assert_eq!(model.dimension(), 0);
        assert!(model.transform("anything").is_empty());
    }

    #[test]
    fn test_unknown_terms_dropped() {
        let model = TfidfModel::fit(&["python machine learning"]);
        let vector = model.transform("quantum chromodynamics");
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let model = TfidfModel::fit(&["python machine learning", "cooking pasta recipes"]);
        let vector = model.transform("python learning");
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_shared_terms_score_higher() {
        let docs = [
            "python machine learning tutorial",
            "deep learning with python",
            "cooking italian pasta at home",
        ];
        let model = TfidfModel::fit(&docs);
        let vectors: Vec<Vec<f32>> = docs.iter().map(|d| model.transform(d)).collect();

        let ml_pair = cosine_similarity(&vectors[0], &vectors[1]);
        let cross_domain = cosine_similarity(&vectors[0], &vectors[2]);
        assert!(
            ml_pair > cross_domain,
            "expected {} > {}",
            ml_pair,
            cross_domain
        );
    }

    #[test]
    fn test_fit_is_deterministic() {
        let docs = ["python machine learning", "rust systems programming"];
        let a = TfidfModel::fit(&docs);
        let b = TfidfModel::fit(&docs);
        assert_eq!(a.transform(docs[0]), b.transform(docs[0]));
    }

    #[test]
    fn test_transform_batch_matches_single() {
        let docs = ["python machine learning", "cooking pasta"];
        let model = TfidfModel::fit(&docs);
        let batch = model.transform_batch(&docs);
        assert_eq!(batch[0], model.transform(docs[0]));
        assert_eq!(batch[1], model.transform(docs[1]));
    }
}
