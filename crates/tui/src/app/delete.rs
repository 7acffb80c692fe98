/// Two-step confirmation gate in front of the delete operation.
///
/// An expense is first staged (`Pending`); only an explicit confirmation
/// moves it to `Deleting`, and both completion and cancellation land back
/// on `Idle`. There is no optimistic removal: the row only disappears when
/// the list is refetched after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    Pending {
        id: String,
    },
    Deleting {
        id: String,
    },
}

impl DeleteFlow {
    /// Stages `id` for deletion. Only possible from `Idle`; returns whether
    /// the transition happened.
    pub fn stage(&mut self, id: String) -> bool {
        if *self != Self::Idle {
            return false;
        }
        *self = Self::Pending { id };
        true
    }

    /// Abandons a staged deletion, returning to `Idle`.
    pub fn cancel(&mut self) {
        if matches!(self, Self::Pending { .. }) {
            *self = Self::Idle;
        }
    }

    /// Confirms a staged deletion, yielding the id to delete.
    ///
    /// Moves `Pending` to `Deleting`; in any other state nothing happens
    /// and `None` is returned.
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Pending { id } => {
                *self = Self::Deleting { id: id.clone() };
                Some(id)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Ends an in-flight deletion, regardless of outcome.
    pub fn finish(&mut self) {
        if matches!(self, Self::Deleting { .. }) {
            *self = Self::Idle;
        }
    }

    pub fn pending_id(&self) -> Option<&str> {
        match self {
            Self::Pending { id } => Some(id),
            _ => None,
        }
    }
}
