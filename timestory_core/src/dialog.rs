use crate::error::{TimestoryError, TimestoryResult};

/// How the user answered a confirmation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState<R> {
    Idle,
    /// Waiting for the user to accept or cancel `request`.
    Pending { request: R, prompt: String },
    /// The last request was answered. Behaves like `Idle` for new requests.
    Resolved(Decision),
}

/// A modal yes/no question about some request `R`, e.g. which event to
/// delete. Only one question can be pending at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<R> {
    state: DialogState<R>,
}

impl<R> Default for ConfirmDialog<R> {
    fn default() -> Self {
        ConfirmDialog { state: DialogState::Idle }
    }
}

impl<R> ConfirmDialog<R> {
    pub fn new() -> Self {
        ConfirmDialog::default()
    }

    pub fn state(&self) -> &DialogState<R> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DialogState::Pending { .. })
    }

    /// The question currently shown to the user.
    pub fn prompt(&self) -> Option<&str> {
        match &self.state {
            DialogState::Pending { prompt, .. } => Some(prompt),
            _ => None,
        }
    }

    /// Asks the user to confirm `request`. Fails if another question is
    /// still pending.
    pub fn ask(&mut self, request: R, prompt: impl Into<String>) -> TimestoryResult<()> {
        if self.is_pending() {
            return Err(TimestoryError::DialogBusy);
        }
        self.state = DialogState::Pending { request, prompt: prompt.into() };
        Ok(())
    }

    /// Records the user's answer. Returns the request if it was accepted.
    /// Does nothing if no question is pending.
    pub fn resolve(&mut self, accept: bool) -> Option<R> {
        if !self.is_pending() {
            return None;
        }
        let decision = if accept { Decision::Accepted } else { Decision::Cancelled };
        match std::mem::replace(&mut self.state, DialogState::Resolved(decision)) {
            DialogState::Pending { request, .. } if accept => Some(request),
            _ => None,
        }
    }
}
