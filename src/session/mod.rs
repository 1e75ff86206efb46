pub mod controller;
pub mod state;

pub use controller::{SessionController, DELETE_CONFIRMATION, DISCARD_CONFIRMATION};
pub use state::{
    BackOutcome, BackStatus, DeleteOutcome, DeleteStatus, SubmitOutcome, SubmitStatus,
    TransitionState,
};
