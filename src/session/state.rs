use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitStatus {
    pub fn is_in_flight(self) -> bool {
        matches!(self, SubmitStatus::Validating | SubmitStatus::Submitting)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DeleteStatus {
    #[default]
    Idle,
    Confirming,
    Deleting,
    Deleted,
    Failed,
}

impl DeleteStatus {
    pub fn is_in_flight(self) -> bool {
        matches!(self, DeleteStatus::Confirming | DeleteStatus::Deleting)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BackStatus {
    #[default]
    Idle,
    Checking,
    /// Nothing unsaved; left without asking.
    NavigateDirect,
    /// Discard prompt is open.
    ConfirmDiscard,
    /// Left after the user agreed to discard.
    Discarded,
}

impl BackStatus {
    pub fn is_in_flight(self) -> bool {
        matches!(self, BackStatus::Checking | BackStatus::ConfirmDiscard)
    }
}

/// Status of the three transition machines of one editing session.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransitionState {
    pub submit: SubmitStatus,
    pub delete: DeleteStatus,
    pub back: BackStatus,
}

impl TransitionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves submit to `Validating` unless a submit is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.submit.is_in_flight() {
            return false;
        }
        self.submit = SubmitStatus::Validating;
        true
    }

    pub fn begin_delete(&mut self) -> bool {
        if self.delete.is_in_flight() {
            return false;
        }
        self.delete = DeleteStatus::Confirming;
        true
    }

    pub fn begin_back(&mut self) -> bool {
        if self.back.is_in_flight() {
            return false;
        }
        self.back = BackStatus::Checking;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved and navigated away; `created` tells add from edit.
    Submitted { created: bool },
    Invalid(crate::error::ValidationError),
    Failed { reason: String },
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed { reason: String },
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    NavigatedDirect,
    Discarded,
    Stayed,
    Busy,
}
