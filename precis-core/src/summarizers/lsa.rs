//! Latent Semantic Analysis summarization
//!
//! Builds a term × sentence matrix, smooths each column by its maximum term
//! count, decomposes it with a thin SVD and rates sentence `j` as
//! `sqrt(Σ σₖ² · Vᵀ[k][j]²)` over the strongest topics.

use super::{normalize_word, SentenceRanker, SummarizeError};
use crate::model::Algorithm;
use crate::nlp::{Document, StopwordFilter};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Lsa {
    /// Topics always kept, regardless of the reduction ratio
    pub min_dimensions: usize,
    /// Share of the singular values kept
    pub reduction_ratio: f64,
    /// Weight given to every term of a sentence before frequencies
    pub smoothing: f64,
}

impl Default for Lsa {
    fn default() -> Self {
        Self {
            min_dimensions: 3,
            reduction_ratio: 1.0,
            smoothing: 0.4,
        }
    }
}

impl Lsa {
    /// Row index per distinct normalized word
    fn dictionary(document: &Document, stopwords: &StopwordFilter) -> HashMap<String, usize> {
        let mut dictionary = HashMap::new();
        for word in document.words().map(normalize_word) {
            if !stopwords.is_stopword(&word) {
                let next = dictionary.len();
                dictionary.entry(word).or_insert(next);
            }
        }
        dictionary
    }

    /// Term-frequency matrix, stored as one column per sentence
    fn term_matrix(&self, document: &Document, dictionary: &HashMap<String, usize>) -> Vec<Vec<f64>> {
        let mut columns: Vec<Vec<f64>> = document
            .sentences()
            .map(|sentence| {
                let mut column = vec![0.0; dictionary.len()];
                for word in &sentence.words {
                    if let Some(&row) = dictionary.get(&normalize_word(word)) {
                        column[row] += 1.0;
                    }
                }
                column
            })
            .collect();

        for column in &mut columns {
            let max = column.iter().copied().fold(0.0, f64::max);
            if max != 0.0 {
                for value in column.iter_mut() {
                    *value = self.smoothing + (1.0 - self.smoothing) * *value / max;
                }
            }
        }

        columns
    }

    /// Rank sentences from singular values and right singular vectors
    fn ranks(&self, svd: &Svd) -> Vec<f64> {
        let dimensions = self
            .min_dimensions
            .max((svd.sigma.len() as f64 * self.reduction_ratio) as usize);
        let powered: Vec<f64> = svd
            .sigma
            .iter()
            .enumerate()
            .map(|(k, s)| if k < dimensions { s * s } else { 0.0 })
            .collect();

        // v_rows[j][k] = Vᵀ[k][j]
        svd.v_rows
            .iter()
            .map(|row| {
                powered
                    .iter()
                    .zip(row.iter())
                    .map(|(s, v)| s * v * v)
                    .sum::<f64>()
                    .sqrt()
            })
            .collect()
    }
}

impl SentenceRanker for Lsa {
    fn rate(
        &self,
        document: &Document,
        stopwords: &StopwordFilter,
    ) -> Result<Vec<f64>, SummarizeError> {
        let dictionary = Self::dictionary(document, stopwords);
        let sentence_count = document.sentence_count();

        if dictionary.is_empty() {
            debug!("LSA dictionary is empty, nothing to rate");
            return Ok(Vec::new());
        }
        if dictionary.len() < sentence_count {
            warn!(
                "Number of words ({}) is lower than number of sentences ({}); LSA may not work properly",
                dictionary.len(),
                sentence_count
            );
        }

        let columns = self.term_matrix(document, &dictionary);
        let svd = Svd::decompose(columns, dictionary.len()).map_err(|reason| {
            SummarizeError::RankingFailed {
                algorithm: Algorithm::Lsa,
                reason,
            }
        })?;

        Ok(self.ranks(&svd))
    }
}

/// Thin singular value decomposition of an `m × n` matrix.
///
/// Singular values are sorted in descending order and truncated to
/// `min(m, n)`; `v_rows[j]` holds row `j` of `V` (column `j` of `Vᵀ`).
#[derive(Debug, Clone)]
pub struct Svd {
    pub sigma: Vec<f64>,
    pub v_rows: Vec<Vec<f64>>,
}

const MAX_SWEEPS: usize = 60;
const TOLERANCE: f64 = 1e-12;

impl Svd {
    /// One-sided Jacobi (Hestenes) decomposition of a column-major matrix
    pub fn decompose(mut columns: Vec<Vec<f64>>, rows: usize) -> Result<Self, String> {
        let n = columns.len();
        let mut v: Vec<Vec<f64>> = (0..n)
            .map(|j| (0..n).map(|i| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        // rotations preserve the Frobenius norm; columns below this are numerically zero
        let negligible = f64::EPSILON * columns.iter().map(|c| dot(c, c)).sum::<f64>();

        let mut converged = n < 2;
        for _ in 0..MAX_SWEEPS {
            let mut rotated = false;

            for p in 0..n.saturating_sub(1) {
                for q in p + 1..n {
                    let alpha = dot(&columns[p], &columns[p]);
                    let beta = dot(&columns[q], &columns[q]);
                    let gamma = dot(&columns[p], &columns[q]);

                    if gamma == 0.0
                        || alpha.min(beta) <= negligible
                        || gamma.abs() <= TOLERANCE * (alpha * beta).sqrt()
                    {
                        continue;
                    }
                    rotated = true;

                    let zeta = (beta - alpha) / (2.0 * gamma);
                    let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = c * t;

                    rotate(&mut columns, p, q, c, s);
                    rotate(&mut v, p, q, c, s);
                }
            }

            if !rotated {
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(format!(
                "singular value decomposition did not converge after {} sweeps",
                MAX_SWEEPS
            ));
        }

        // column norms of A·V are the singular values
        let mut order: Vec<(f64, usize)> = columns
            .iter()
            .enumerate()
            .map(|(k, column)| (dot(column, column).sqrt(), k))
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0));
        order.truncate(rows.min(n));

        let sigma = order.iter().map(|&(s, _)| s).collect();
        let v_rows = (0..n)
            .map(|j| order.iter().map(|&(_, k)| v[k][j]).collect())
            .collect();

        Ok(Svd { sigma, v_rows })
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Apply a Jacobi rotation to columns `p < q`
fn rotate(columns: &mut [Vec<f64>], p: usize, q: usize, c: f64, s: f64) {
    let (left, right) = columns.split_at_mut(q);
    let (col_p, col_q) = (&mut left[p], &mut right[0]);
    for (x, y) in col_p.iter_mut().zip(col_q.iter_mut()) {
        let (xp, xq) = (*x, *y);
        *x = c * xp - s * xq;
        *y = s * xp + c * xq;
    }
}
