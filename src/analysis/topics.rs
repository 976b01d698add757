//! Topic modeling over cleaned titles: TF-IDF vectorization plus latent
//! Dirichlet allocation.
//!
//! Titles are preprocessed (lowercased, reduced to letter runs, stop words
//! and short tokens removed), vectorized with document-frequency bounds, and
//! decomposed into a fixed number of topics with a variational LDA fit in the
//! exp-digamma parameterization. The fit is deterministic: fixed seed, fixed
//! iteration count.
//!
//! Headline corpora are small and sparse, so degenerate inputs are an
//! expected outcome: fewer than two usable titles, or a vocabulary that
//! collapses below the document-frequency floor, yield
//! [`AnalysisError::Degenerate`] with an explanation, never a panic and never a
//! failed run.

use crate::error::AnalysisError;
use crate::models::{Article, Topic};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Terms must appear in at least this many documents.
const MIN_DOC_FREQ: usize = 2;
/// Terms appearing in more than this share of documents are ignored.
const MAX_DOC_FREQ_RATIO: f64 = 0.90;
/// Newsroom boilerplate that survives the standard stop-word list.
const CUSTOM_STOP_WORDS: [&str; 2] = ["say", "courtesy"];
/// Convergence threshold for the per-document variational loop.
const GAMMA_TOLERANCE: f64 = 1e-3;
/// Cap on per-document variational iterations.
const MAX_GAMMA_ITER: usize = 100;

static LETTER_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z]+").unwrap());

static STOP_WORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut words: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .collect();
    words.extend(CUSTOM_STOP_WORDS.iter().map(|w| w.to_string()));
    words
});

/// Tunable parameters for one topic-modeling pass.
#[derive(Debug, Clone)]
pub struct TopicModelConfig {
    /// Number of topics to fit; capped at the usable document count.
    pub num_topics: usize,
    /// Outer E/M iterations.
    pub max_iter: usize,
    /// Seed for the variational parameter initialization.
    pub seed: u64,
    /// Terms reported per topic.
    pub top_terms: usize,
}

impl Default for TopicModelConfig {
    fn default() -> Self {
        Self {
            num_topics: 5,
            max_iter: 10,
            seed: 42,
            top_terms: 10,
        }
    }
}

/// Reduce a title to the tokens worth modeling.
///
/// Lowercases, collapses everything that is not a letter run to single
/// spaces (digits included; bare numbers carry no topical signal in
/// headlines), then drops stop words and tokens of length two or less.
pub fn preprocess_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let squashed = LETTER_RUNS.replace_all(&lowered, " ");
    squashed
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOP_WORDS.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fit topics over the cleaned collection.
///
/// # Errors
///
/// [`AnalysisError::Degenerate`] when fewer than two titles survive
/// preprocessing or the vocabulary collapses below the document-frequency
/// floor. The caller reports the condition and carries on.
#[instrument(level = "debug", skip_all, fields(articles = articles.len()))]
pub fn model_topics(
    articles: &[Article],
    config: &TopicModelConfig,
) -> Result<Vec<Topic>, AnalysisError> {
    let processed: Vec<String> = articles
        .iter()
        .map(|article| preprocess_title(&article.title))
        .filter(|doc| !doc.is_empty())
        .collect();

    if processed.len() < 2 {
        return Err(AnalysisError::Degenerate {
            reason: format!(
                "only {} usable titles after preprocessing (need at least 2)",
                processed.len()
            ),
        });
    }

    let Some(matrix) = build_tfidf(&processed) else {
        return Err(AnalysisError::Degenerate {
            reason: "vocabulary collapsed below the document-frequency floor".to_string(),
        });
    };
    debug!(
        docs = matrix.rows.len(),
        terms = matrix.vocab.len(),
        "Vectorized titles"
    );

    let num_topics = config.num_topics.clamp(1, processed.len());
    let lambda = fit_lda(&matrix, num_topics, config);

    let topics = lambda
        .iter()
        .enumerate()
        .map(|(topic_idx, weights)| {
            let mut order: Vec<usize> = (0..weights.len()).collect();
            order.sort_by(|&a, &b| {
                weights[b]
                    .partial_cmp(&weights[a])
                    .unwrap_or(Ordering::Equal)
            });
            Topic {
                index: topic_idx + 1,
                terms: order
                    .into_iter()
                    .take(config.top_terms)
                    .map(|term_idx| matrix.vocab[term_idx].clone())
                    .collect(),
            }
        })
        .collect();

    Ok(topics)
}

/// Dense TF-IDF matrix over the processed titles. Headline corpora are tiny,
/// so dense rows beat the bookkeeping of a sparse layout.
struct TfidfMatrix {
    /// Alphabetically ordered vocabulary.
    vocab: Vec<String>,
    /// One L2-normalized weight row per document.
    rows: Vec<Vec<f64>>,
}

/// Vectorize documents with document-frequency bounds and a second stop-word
/// pass. Returns `None` when no term satisfies the bounds.
fn build_tfidf(docs: &[String]) -> Option<TfidfMatrix> {
    let n_docs = docs.len();
    let tokenized: Vec<Vec<&str>> = docs
        .iter()
        .map(|doc| doc.split_whitespace().collect())
        .collect();

    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        let unique: HashSet<&str> = tokens.iter().copied().collect();
        for token in unique {
            *doc_freq.entry(token).or_insert(0) += 1;
        }
    }

    let max_doc_freq = (MAX_DOC_FREQ_RATIO * n_docs as f64).floor() as usize;
    let mut vocab: Vec<String> = doc_freq
        .iter()
        .filter(|&(token, &freq)| {
            freq >= MIN_DOC_FREQ && freq <= max_doc_freq && !STOP_WORDS.contains(*token)
        })
        .map(|(token, _)| token.to_string())
        .collect();
    vocab.sort();
    if vocab.is_empty() {
        return None;
    }

    let term_index: HashMap<&str, usize> = vocab
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.as_str(), idx))
        .collect();
    let idf: Vec<f64> = vocab
        .iter()
        .map(|term| {
            let freq = doc_freq[term.as_str()] as f64;
            ((1.0 + n_docs as f64) / (1.0 + freq)).ln() + 1.0
        })
        .collect();

    let rows = tokenized
        .iter()
        .map(|tokens| {
            let mut row = vec![0.0; vocab.len()];
            for token in tokens {
                if let Some(&idx) = term_index.get(token) {
                    row[idx] += 1.0;
                }
            }
            for (idx, value) in row.iter_mut().enumerate() {
                *value *= idf[idx];
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for value in &mut row {
                    *value /= norm;
                }
            }
            row
        })
        .collect();

    Some(TfidfMatrix { vocab, rows })
}

/// Variational LDA fit; returns the topic-term parameter matrix.
///
/// Symmetric priors of 1/K, seeded initialization, and a fixed number of
/// outer E/M sweeps make the fit fully deterministic for a given corpus.
fn fit_lda(matrix: &TfidfMatrix, num_topics: usize, config: &TopicModelConfig) -> Vec<Vec<f64>> {
    let n_terms = matrix.vocab.len();
    let alpha = 1.0 / num_topics as f64;
    let eta = 1.0 / num_topics as f64;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut lambda: Vec<Vec<f64>> = (0..num_topics)
        .map(|_| (0..n_terms).map(|_| rng.random_range(0.5..1.5)).collect())
        .collect();

    for _ in 0..config.max_iter {
        let exp_elog_beta = exp_dirichlet_expectation(&lambda);

        let mut sstats = vec![vec![0.0; n_terms]; num_topics];
        for doc in &matrix.rows {
            let terms: Vec<usize> = doc
                .iter()
                .enumerate()
                .filter(|&(_, &weight)| weight > 0.0)
                .map(|(idx, _)| idx)
                .collect();
            if terms.is_empty() {
                continue;
            }

            let mut gamma = vec![1.0; num_topics];
            for _ in 0..MAX_GAMMA_ITER {
                let exp_elog_theta = exp_dirichlet_expectation_row(&gamma);
                let mut next_gamma = vec![alpha; num_topics];
                for &term in &terms {
                    let phinorm: f64 = (0..num_topics)
                        .map(|k| exp_elog_theta[k] * exp_elog_beta[k][term])
                        .sum::<f64>()
                        + 1e-100;
                    let scaled = doc[term] / phinorm;
                    for (k, next) in next_gamma.iter_mut().enumerate() {
                        *next += exp_elog_theta[k] * exp_elog_beta[k][term] * scaled;
                    }
                }
                let mean_change: f64 = gamma
                    .iter()
                    .zip(&next_gamma)
                    .map(|(old, new)| (old - new).abs())
                    .sum::<f64>()
                    / num_topics as f64;
                gamma = next_gamma;
                if mean_change < GAMMA_TOLERANCE {
                    break;
                }
            }

            let exp_elog_theta = exp_dirichlet_expectation_row(&gamma);
            for &term in &terms {
                let phinorm: f64 = (0..num_topics)
                    .map(|k| exp_elog_theta[k] * exp_elog_beta[k][term])
                    .sum::<f64>()
                    + 1e-100;
                let scaled = doc[term] / phinorm;
                for (k, row) in sstats.iter_mut().enumerate() {
                    row[term] += exp_elog_theta[k] * exp_elog_beta[k][term] * scaled;
                }
            }
        }

        for (lambda_row, sstats_row) in lambda.iter_mut().zip(&sstats) {
            for (value, stat) in lambda_row.iter_mut().zip(sstats_row) {
                *value = eta + stat;
            }
        }
    }

    lambda
}

/// exp(E[log X]) for each row of a Dirichlet parameter matrix.
fn exp_dirichlet_expectation(parameters: &[Vec<f64>]) -> Vec<Vec<f64>> {
    parameters
        .iter()
        .map(|row| exp_dirichlet_expectation_row(row))
        .collect()
}

fn exp_dirichlet_expectation_row(row: &[f64]) -> Vec<f64> {
    let total = digamma(row.iter().sum());
    row.iter()
        .map(|&value| (digamma(value) - total).exp())
        .collect()
}

/// Digamma via the standard asymptotic series after shifting x above 6.
fn digamma(mut x: f64) -> f64 {
    let mut acc = 0.0;
    while x < 6.0 {
        acc -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    acc + x.ln() - 0.5 * inv - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 / 252.0))
}
