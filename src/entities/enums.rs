//! Enumerazioni - Stati delle entità con transizioni esplicite
//!
//! Gli stati sono enum Postgres reali, non stringhe libere: ogni endpoint
//! può scrivere solo le transizioni ammesse da `can_transition_to`.

use serde::{Deserialize, Serialize};

// ********************* ENUMERAZIONI UTILI **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "draft_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Open,
    AllAccepted,
    Finalized,
    Cancelled,
}

impl DraftStatus {
    /// Una bozza "attiva" conta ai fini del vincolo "un solo draft per leader"
    pub fn is_active(self) -> bool {
        matches!(self, DraftStatus::Open | DraftStatus::AllAccepted)
    }

    /// Macchina a stati della bozza: Finalized e Cancelled sono terminali.
    /// AllAccepted → Open è ammessa perché un nuovo invito pending
    /// smentisce l'etichetta "tutti hanno accettato".
    pub fn can_transition_to(self, next: DraftStatus) -> bool {
        use DraftStatus::*;
        matches!(
            (self, next),
            (Open, AllAccepted)
                | (Open, Finalized)
                | (Open, Cancelled)
                | (AllAccepted, Open)
                | (AllAccepted, Finalized)
                | (AllAccepted, Cancelled)
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, InvitationStatus::Pending)
    }

    /// Pending può solo diventare Accepted o Rejected, mai il contrario
    pub fn can_transition_to(self, next: InvitationStatus) -> bool {
        use InvitationStatus::*;
        matches!((self, next), (Pending, Accepted) | (Pending, Rejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_status_allows_forward_transitions() {
        assert!(DraftStatus::Open.can_transition_to(DraftStatus::AllAccepted));
        assert!(DraftStatus::Open.can_transition_to(DraftStatus::Finalized));
        assert!(DraftStatus::Open.can_transition_to(DraftStatus::Cancelled));
        assert!(DraftStatus::AllAccepted.can_transition_to(DraftStatus::Finalized));
        assert!(DraftStatus::AllAccepted.can_transition_to(DraftStatus::Cancelled));
    }

    #[test]
    fn all_accepted_can_reopen() {
        assert!(DraftStatus::AllAccepted.can_transition_to(DraftStatus::Open));
    }

    #[test]
    fn draft_status_rejects_backward_transitions() {
        assert!(!DraftStatus::Finalized.can_transition_to(DraftStatus::Open));
        assert!(!DraftStatus::Finalized.can_transition_to(DraftStatus::AllAccepted));
        assert!(!DraftStatus::Cancelled.can_transition_to(DraftStatus::Open));
        assert!(!DraftStatus::Open.can_transition_to(DraftStatus::Open));
    }

    #[test]
    fn finalized_and_cancelled_are_terminal() {
        for next in [
            DraftStatus::Open,
            DraftStatus::AllAccepted,
            DraftStatus::Finalized,
            DraftStatus::Cancelled,
        ] {
            assert!(!DraftStatus::Finalized.can_transition_to(next));
            assert!(!DraftStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn invitation_status_only_leaves_pending() {
        assert!(InvitationStatus::Pending.can_transition_to(InvitationStatus::Accepted));
        assert!(InvitationStatus::Pending.can_transition_to(InvitationStatus::Rejected));
        assert!(!InvitationStatus::Accepted.can_transition_to(InvitationStatus::Rejected));
        assert!(!InvitationStatus::Rejected.can_transition_to(InvitationStatus::Accepted));
        assert!(!InvitationStatus::Accepted.can_transition_to(InvitationStatus::Pending));
    }

    #[test]
    fn only_open_and_all_accepted_are_active() {
        assert!(DraftStatus::Open.is_active());
        assert!(DraftStatus::AllAccepted.is_active());
        assert!(!DraftStatus::Finalized.is_active());
        assert!(!DraftStatus::Cancelled.is_active());
    }
}
