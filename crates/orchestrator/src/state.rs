use lakescraper_core::{EngineError, JobStatus};

/// §4.11 / §9: the status enum and its transitions live in one place with an
/// explicit function that rejects illegal moves. Callers must route every
/// status change through `transition`, never assign `status` directly.
///
/// ```text
/// PENDING --enqueued--> RUNNING --> COMPLETED
///                               \-> FAILED
/// ```
pub fn transition(current: JobStatus, next: JobStatus) -> Result<JobStatus, EngineError> {
    let allowed = matches!(
        (current, next),
        (JobStatus::Pending, JobStatus::Running)
            | (JobStatus::Running, JobStatus::Completed)
            | (JobStatus::Running, JobStatus::Failed)
    );
    if allowed {
        Ok(next)
    } else {
        Err(EngineError::IllegalTransition(format!("{:?} -> {:?}", current, next)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_to_running_is_legal() {
        assert!(transition(JobStatus::Pending, JobStatus::Running).is_ok());
    }

    #[test]
    fn running_to_completed_or_failed_is_legal() {
        assert!(transition(JobStatus::Running, JobStatus::Completed).is_ok());
        assert!(transition(JobStatus::Running, JobStatus::Failed).is_ok());
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        assert!(transition(JobStatus::Completed, JobStatus::Running).is_err());
        assert!(transition(JobStatus::Failed, JobStatus::Running).is_err());
        assert!(transition(JobStatus::Completed, JobStatus::Failed).is_err());
    }

    #[test]
    fn pending_cannot_skip_to_terminal() {
        assert!(transition(JobStatus::Pending, JobStatus::Completed).is_err());
    }
}
