/// Attempts a login-triggered sequence may make before settling to none.
pub const LOGIN_RETRY_BUDGET: u8 = 5;

/// A deferred resolution attempt waiting in the host's UI queue.
///
/// The two variants are separate retry lifetimes and never share a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveTask {
    /// Login sequence: the client may still be loading
    Sequence { attempts_remaining: u8 },
    /// Post-change check: the inventory may still be settling.
    /// `retry` allows one more deferred attempt after a failure.
    Debounced { retry: bool },
}

impl ResolveTask {
    /// Start of a login sequence with a full budget
    pub fn sequence() -> Self {
        Self::Sequence {
            attempts_remaining: LOGIN_RETRY_BUDGET,
        }
    }

    /// Start of a debounced check
    pub fn debounced() -> Self {
        Self::Debounced { retry: true }
    }

    /// Whether this task still has an attempt to make
    pub fn has_attempt(self) -> bool {
        match self {
            Self::Sequence { attempts_remaining } => attempts_remaining > 0,
            Self::Debounced { .. } => true,
        }
    }

    /// The task to queue after this one's attempt failed, if any
    pub fn after_failure(self) -> Option<Self> {
        match self {
            Self::Sequence { attempts_remaining } => attempts_remaining
                .checked_sub(1)
                .filter(|left| *left > 0)
                .map(|attempts_remaining| Self::Sequence { attempts_remaining }),
            Self::Debounced { retry: true } => Some(Self::Debounced { retry: false }),
            Self::Debounced { retry: false } => None,
        }
    }
}
