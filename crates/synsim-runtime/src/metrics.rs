//! Run statistics computed from recorded rows.
//!
//! Summaries only: nothing here feeds back into a run.

use serde::Serialize;
use synsim_core::types::ResultRow;

/// Summary of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub steps: usize,
    /// Steps where the pre-synaptic side fired.
    pub pre_spikes: usize,
    /// Steps where the post-synaptic side fired.
    pub post_spikes: usize,
    /// Steps where both sides fired (the only potentiating steps).
    pub coincident_spikes: usize,
    pub initial_weight: f64,
    pub final_weight: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    pub mean_weight: f64,
}

impl RunStats {
    /// Compute statistics for rows recorded from `initial_weight`.
    ///
    /// With no rows the weight never moved, so every weight statistic
    /// equals `initial_weight`.
    pub fn from_rows(initial_weight: f64, rows: &[ResultRow]) -> Self {
        if rows.is_empty() {
            return Self {
                steps: 0,
                pre_spikes: 0,
                post_spikes: 0,
                coincident_spikes: 0,
                initial_weight,
                final_weight: initial_weight,
                min_weight: initial_weight,
                max_weight: initial_weight,
                mean_weight: initial_weight,
            };
        }

        let mut pre_spikes = 0;
        let mut post_spikes = 0;
        let mut coincident_spikes = 0;
        let mut min_weight = f64::MAX;
        let mut max_weight = f64::MIN;
        let mut total = 0.0;

        for row in rows {
            let sample = row.sample();
            pre_spikes += sample.pre as usize;
            post_spikes += sample.post as usize;
            coincident_spikes += sample.is_coincident() as usize;
            min_weight = min_weight.min(row.synaptic_weight);
            max_weight = max_weight.max(row.synaptic_weight);
            total += row.synaptic_weight;
        }

        let final_weight = rows.last().map(|r| r.synaptic_weight).unwrap_or(initial_weight);

        Self {
            steps: rows.len(),
            pre_spikes,
            post_spikes,
            coincident_spikes,
            initial_weight,
            final_weight,
            min_weight,
            max_weight,
            mean_weight: total / rows.len() as f64,
        }
    }

    /// Final minus initial weight.
    pub fn net_change(&self) -> f64 {
        self.final_weight - self.initial_weight
    }

    /// Fraction of steps where the pre side fired.
    pub fn pre_rate(&self) -> f64 {
        rate(self.pre_spikes, self.steps)
    }

    /// Fraction of steps where the post side fired.
    pub fn post_rate(&self) -> f64 {
        rate(self.post_spikes, self.steps)
    }

    /// Fraction of pre spikes that were matched by a post spike.
    pub fn coupling(&self) -> f64 {
        rate(self.coincident_spikes, self.pre_spikes)
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synsim_core::types::ActivitySample;

    #[test]
    fn empty_run_keeps_initial_weight() {
        let stats = RunStats::from_rows(0.4, &[]);
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.final_weight, 0.4);
        assert_eq!(stats.net_change(), 0.0);
        assert_eq!(stats.pre_rate(), 0.0);
        assert_eq!(stats.coupling(), 0.0);
    }

    #[test]
    fn counts_spikes_and_weights() {
        let rows = vec![
            ResultRow::new(0.0, ActivitySample::coincident(), 0.6, ""),
            ResultRow::new(0.1, ActivitySample::new(true, false), 0.5, ""),
            ResultRow::new(0.2, ActivitySample::new(false, true), 0.4, ""),
            ResultRow::new(0.3, ActivitySample::silent(), 0.3, ""),
        ];
        let stats = RunStats::from_rows(0.5, &rows);
        assert_eq!(stats.steps, 4);
        assert_eq!(stats.pre_spikes, 2);
        assert_eq!(stats.post_spikes, 2);
        assert_eq!(stats.coincident_spikes, 1);
        assert_eq!(stats.min_weight, 0.3);
        assert_eq!(stats.max_weight, 0.6);
        assert_eq!(stats.final_weight, 0.3);
        assert!((stats.mean_weight - 0.45).abs() < 1e-12);
        assert!((stats.net_change() + 0.2).abs() < 1e-12);
        assert_eq!(stats.pre_rate(), 0.5);
        assert_eq!(stats.coupling(), 0.5);
    }
}
