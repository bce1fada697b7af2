//! Visit state machine.
//!
//! ```text
//! Scheduled ──check-in──▶ CheckedIn ──complete──▶ Completed
//!     │  │                    │
//!     │  └─cancel─▶ Cancelled ◀─cancel
//!     └─missed──▶ NoShow
//! ```

use crate::models::AppointmentStatus;

impl AppointmentStatus {
    /// Statuses reachable in one step.
    pub fn allowed_transitions(self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Scheduled => &[CheckedIn, Cancelled, NoShow],
            CheckedIn => &[Completed, Cancelled],
            Completed | Cancelled | NoShow => &[],
        }
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Whether the visit still occupies its slot (used for double-booking notices).
    pub fn is_active(self) -> bool {
        matches!(self, AppointmentStatus::Scheduled | AppointmentStatus::CheckedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;
    use super::*;

    const ALL: [AppointmentStatus; 5] = [Scheduled, CheckedIn, Completed, Cancelled, NoShow];

    #[test]
    fn test_forward_edges() {
        assert!(Scheduled.can_transition_to(CheckedIn));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Scheduled.can_transition_to(NoShow));
        assert!(CheckedIn.can_transition_to(Completed));
        assert!(CheckedIn.can_transition_to(Cancelled));
    }

    #[test]
    fn test_disallowed_edges() {
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!CheckedIn.can_transition_to(Scheduled));
        assert!(!CheckedIn.can_transition_to(NoShow));
        for status in ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn test_terminal_states() {
        for status in [Completed, Cancelled, NoShow] {
            assert!(status.is_terminal());
            assert!(ALL.iter().all(|&next| !status.can_transition_to(next)));
        }
        assert!(!Scheduled.is_terminal());
        assert!(!CheckedIn.is_terminal());
    }
}
