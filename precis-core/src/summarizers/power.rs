//! Power iteration over a sentence transition matrix
//!
//! Starts from the uniform vector and repeatedly applies `Mᵀ` until the L2
//! distance between two successive vectors drops to `epsilon`, or the
//! iteration cap is reached.

use tracing::warn;

/// Power iteration settings
#[derive(Debug, Clone)]
pub struct PowerIteration {
    /// Convergence threshold (L2 norm of the update)
    pub epsilon: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            max_iterations: 100,
        }
    }
}

/// Result of a power iteration
#[derive(Debug, Clone)]
pub struct PowerResult {
    /// Score per sentence
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final update norm
    pub delta: f64,
    pub converged: bool,
}

impl PowerIteration {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run on a square row-major matrix
    pub fn run(&self, matrix: &[Vec<f64>]) -> PowerResult {
        let n = matrix.len();
        if n == 0 {
            return PowerResult {
                scores: Vec::new(),
                iterations: 0,
                delta: 0.0,
                converged: true,
            };
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while delta > self.epsilon && iterations < self.max_iterations {
            iterations += 1;

            // next = Mᵀ · scores
            next.fill(0.0);
            for (row, &weight) in matrix.iter().zip(scores.iter()) {
                for (target, &value) in next.iter_mut().zip(row.iter()) {
                    *target += value * weight;
                }
            }

            delta = scores
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).powi(2))
                .sum::<f64>()
                .sqrt();

            std::mem::swap(&mut scores, &mut next);
        }

        let converged = delta <= self.epsilon;
        if !converged {
            warn!(
                "Power iteration stopped after {} iterations without converging (delta {:.2e})",
                iterations, delta
            );
        }

        PowerResult {
            scores,
            iterations,
            delta,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix() {
        let result = PowerIteration::default().run(&[]);
        assert!(result.scores.is_empty());
        assert!(result.converged);
    }

    #[test]
    fn test_stochastic_matrix_converges_to_stationary_distribution() {
        // stationary distribution of this chain is (1/3, 2/3)
        let matrix = vec![vec![0.5, 0.5], vec![0.25, 0.75]];
        let result = PowerIteration::new(1e-10).run(&matrix);

        assert!(result.converged);
        assert!((result.scores[0] - 1.0 / 3.0).abs() < 1e-8);
        assert!((result.scores[1] - 2.0 / 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_iteration_cap() {
        // a growing matrix never settles
        let matrix = vec![vec![2.0, 0.0], vec![0.0, 1.0]];
        let result = PowerIteration::new(1e-6)
            .with_max_iterations(7)
            .run(&matrix);

        assert_eq!(result.iterations, 7);
        assert!(!result.converged);
        assert_eq!(result.scores, vec![64.0, 0.5]);
    }

    #[test]
    fn test_uniform_fixed_point_stops_after_one_step() {
        let matrix = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let result = PowerIteration::new(1e-6).run(&matrix);
        assert_eq!(result.iterations, 1);
        assert!(result.converged);
        assert_eq!(result.scores, vec![0.5, 0.5]);
    }
}
