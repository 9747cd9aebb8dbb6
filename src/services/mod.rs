pub mod listings;
pub mod submission;

pub use submission::{Draft, Persisted, Rejection, RejectionCause, SubmissionState, Validated};
