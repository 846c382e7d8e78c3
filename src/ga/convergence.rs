//! Per-generation statistics and stagnation detection.

/// Records the fitness distribution of every evaluated generation.
///
/// Histories grow by exactly one entry per [`record`](Self::record) call
/// and are never rewritten.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceTracker {
    stagnation_window: usize,
    min_generations: usize,
    best_fitness: Vec<f64>,
    avg_fitness: Vec<f64>,
    best_distance: Vec<f64>,
}

impl ConvergenceTracker {
    /// Creates a tracker.
    ///
    /// `stagnation_window == 0` disables stagnation detection. Stagnation
    /// never fires before `min_generations` generations have been recorded.
    pub fn new(stagnation_window: usize, min_generations: usize) -> Self {
        Self {
            stagnation_window,
            min_generations,
            ..Self::default()
        }
    }

    /// Appends one generation: its best and average fitness, and the
    /// best-ever tour distance after that generation.
    pub fn record(&mut self, best_fitness: f64, avg_fitness: f64, best_ever_distance: f64) {
        self.best_fitness.push(best_fitness);
        self.avg_fitness.push(avg_fitness);
        self.best_distance.push(best_ever_distance);
    }

    /// Number of generations recorded so far.
    pub fn generations(&self) -> usize {
        self.best_fitness.len()
    }

    /// Returns `true` once the best-of-generation fitness has been exactly
    /// equal for the last `stagnation_window` generations.
    pub fn is_stagnant(&self) -> bool {
        let w = self.stagnation_window;
        let g = self.generations();
        if w == 0 || g < w || g < self.min_generations {
            return false;
        }
        let recent = &self.best_fitness[g - w..];
        recent.iter().all(|&f| f == recent[0])
    }

    pub fn best_fitness_history(&self) -> &[f64] {
        &self.best_fitness
    }

    pub fn avg_fitness_history(&self) -> &[f64] {
        &self.avg_fitness
    }

    /// Best-ever distance after each generation; non-increasing.
    pub fn best_distance_history(&self) -> &[f64] {
        &self.best_distance
    }

    pub(crate) fn into_histories(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.best_fitness, self.avg_fitness, self.best_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(tracker: &mut ConvergenceTracker, values: &[f64]) {
        for &v in values {
            tracker.record(v, v / 2.0, 1.0 / v);
        }
    }

    #[test]
    fn test_histories_grow_in_lockstep() {
        let mut t = ConvergenceTracker::new(0, 0);
        feed(&mut t, &[0.1, 0.2, 0.4]);
        assert_eq!(t.generations(), 3);
        assert_eq!(t.best_fitness_history(), &[0.1, 0.2, 0.4]);
        assert_eq!(t.avg_fitness_history(), &[0.05, 0.1, 0.2]);
        assert_eq!(t.best_distance_history().len(), 3);
    }

    #[test]
    fn test_disabled_window_never_fires() {
        let mut t = ConvergenceTracker::new(0, 0);
        feed(&mut t, &[0.5; 100]);
        assert!(!t.is_stagnant());
    }

    #[test]
    fn test_window_fires_on_identical_run() {
        let mut t = ConvergenceTracker::new(3, 0);
        feed(&mut t, &[0.1, 0.2]);
        assert!(!t.is_stagnant());
        feed(&mut t, &[0.2, 0.2]);
        assert!(t.is_stagnant());
    }

    #[test]
    fn test_any_change_resets_window() {
        let mut t = ConvergenceTracker::new(3, 0);
        feed(&mut t, &[0.2, 0.2, 0.2000001]);
        assert!(!t.is_stagnant());
    }

    #[test]
    fn test_window_needs_enough_history() {
        let mut t = ConvergenceTracker::new(5, 0);
        feed(&mut t, &[0.3; 4]);
        assert!(!t.is_stagnant());
        feed(&mut t, &[0.3]);
        assert!(t.is_stagnant());
    }

    #[test]
    fn test_min_generations_delays_stagnation() {
        let mut t = ConvergenceTracker::new(2, 6);
        feed(&mut t, &[0.3; 5]);
        assert!(!t.is_stagnant());
        feed(&mut t, &[0.3]);
        assert!(t.is_stagnant());
    }
}
