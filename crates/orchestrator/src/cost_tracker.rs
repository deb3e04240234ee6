use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

/// Per-job and per-domain spend accumulation, grounded on the original
/// `CostTracker` service. Wired into the job orchestrator so `ScrapeJob.cost_usd`
/// reflects real accumulated spend rather than the zeroed placeholder noted
/// in the original worker code (see Open Question (i)).
#[derive(Default)]
pub struct CostTracker {
    job_costs: DashMap<Uuid, f64>,
    domain_costs: DashMap<String, f64>,
}

impl CostTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cost(&self, job_id: Uuid, domain: &str, cost_usd: f64) {
        *self.job_costs.entry(job_id).or_insert(0.0) += cost_usd;
        *self.domain_costs.entry(domain.to_string()).or_insert(0.0) += cost_usd;
    }

    pub fn get_job_cost(&self, job_id: Uuid) -> f64 {
        self.job_costs.get(&job_id).map(|c| *c).unwrap_or(0.0)
    }

    pub fn get_domain_cost(&self, domain: &str) -> f64 {
        self.domain_costs.get(domain).map(|c| *c).unwrap_or(0.0)
    }

    pub fn check_budget(&self, job_id: Uuid, max_job_cost: f64) -> bool {
        let current = self.get_job_cost(job_id);
        if current >= max_job_cost {
            warn!(job_id = %job_id, current_cost = current, max_cost = max_job_cost, "budget_exceeded");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_accumulates_per_job_and_domain() {
        let tracker = CostTracker::new();
        let job_id = Uuid::new_v4();
        tracker.record_cost(job_id, "example.com", 0.0001);
        tracker.record_cost(job_id, "example.com", 0.002);
        assert!((tracker.get_job_cost(job_id) - 0.0021).abs() < 1e-9);
        assert!((tracker.get_domain_cost("example.com") - 0.0021).abs() < 1e-9);
    }

    #[test]
    fn budget_check_trips_at_threshold() {
        let tracker = CostTracker::new();
        let job_id = Uuid::new_v4();
        tracker.record_cost(job_id, "example.com", 1.0);
        assert!(!tracker.check_budget(job_id, 1.0));
        assert!(tracker.check_budget(job_id, 2.0));
    }
}
