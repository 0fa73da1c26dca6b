//! Deadline policy - Guardia unica per la scadenza di formazione gruppi
//!
//! La scadenza è una configurazione di processo consultata da quattro
//! endpoint diversi (create/invite/respond/confirm): il controllo vive
//! in un solo punto e viene iniettato tramite AppState.

use crate::core::AppError;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlinePolicy {
    deadline: Option<DateTime<Utc>>,
}

impl DeadlinePolicy {
    pub fn new(deadline: Option<DateTime<Utc>>) -> Self {
        Self { deadline }
    }

    /// La scadenza è inclusiva: all'istante esatto del cutoff le operazioni
    /// sono già chiuse
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) => now < deadline,
            None => true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }

    /// Guardia condivisa dagli handler mutanti
    pub fn ensure_open(&self) -> Result<(), AppError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(AppError::deadline_passed(
                "Group formation is disabled: the deadline has passed",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn no_deadline_is_always_open() {
        let policy = DeadlinePolicy::new(None);
        assert!(policy.is_open_at(Utc::now()));
        assert!(policy.ensure_open().is_ok());
    }

    #[test]
    fn before_deadline_is_open() {
        let deadline = Utc::now() + Duration::hours(1);
        let policy = DeadlinePolicy::new(Some(deadline));
        assert!(policy.is_open_at(deadline - Duration::minutes(1)));
    }

    #[test]
    fn at_or_after_deadline_is_closed() {
        let deadline = Utc::now() - Duration::hours(1);
        let policy = DeadlinePolicy::new(Some(deadline));
        assert!(!policy.is_open_at(deadline));
        assert!(!policy.is_open_at(deadline + Duration::seconds(1)));

        let err = policy.ensure_open().unwrap_err();
        assert_eq!(err.code(), "DEADLINE_PASSED");
    }
}
