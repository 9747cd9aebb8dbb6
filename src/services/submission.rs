//! Form submission lifecycle
//!
//! `Draft -> Validated -> Persisted`, or `Draft -> Rejected`. Validation
//! happens before storage is ever touched, and a rejected submission always
//! carries the input it was given so the form can be shown again.

use std::fmt;
use std::future::Future;

use tracing::{debug, error, info};

use crate::error::AppError;
use crate::forms::{FormData, FormErrors, SubmissionForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Draft,
    Validated,
    Persisted,
    Rejected,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::Validated => "validated",
            Self::Persisted => "persisted",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionCause {
    /// One or more fields failed validation.
    Invalid,
    /// The write failed and was rolled back.
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct Rejection {
    pub data: FormData,
    pub errors: FormErrors,
    pub cause: RejectionCause,
}

impl Rejection {
    pub fn state(&self) -> SubmissionState {
        SubmissionState::Rejected
    }

    pub fn is_storage_failure(&self) -> bool {
        matches!(self.cause, RejectionCause::Storage(_))
    }
}

/// Raw field values, not yet checked.
#[derive(Debug, Clone)]
pub struct Draft {
    data: FormData,
}

impl Draft {
    pub fn new(data: FormData) -> Self {
        Self { data }
    }

    pub fn state(&self) -> SubmissionState {
        SubmissionState::Draft
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn validate<F: SubmissionForm>(self, ctx: &F::Context) -> Result<Validated<F>, Rejection> {
        match F::from_form(&self.data, ctx) {
            Ok(input) => {
                debug!("Submission {} -> {}", SubmissionState::Draft, SubmissionState::Validated);
                Ok(Validated {
                    data: self.data,
                    input,
                })
            }
            Err(errors) => {
                info!(
                    invalid_fields = errors.len(),
                    "Submission {} -> {}",
                    SubmissionState::Draft,
                    SubmissionState::Rejected
                );
                Err(Rejection {
                    data: self.data,
                    errors,
                    cause: RejectionCause::Invalid,
                })
            }
        }
    }
}

/// A submission whose fields all passed validation.
#[derive(Debug, Clone)]
pub struct Validated<F> {
    data: FormData,
    input: F,
}

impl<F> Validated<F> {
    pub fn state(&self) -> SubmissionState {
        SubmissionState::Validated
    }

    pub fn input(&self) -> &F {
        &self.input
    }

    /// Hand the typed input to `write` exactly once. The write is expected to
    /// be transactional; on failure the original draft comes back in the
    /// rejection.
    pub async fn persist<M, W, Fut>(self, write: W) -> Result<Persisted<M>, Rejection>
    where
        W: FnOnce(F) -> Fut,
        Fut: Future<Output = Result<M, AppError>>,
    {
        match write(self.input).await {
            Ok(record) => {
                debug!("Submission {} -> {}", SubmissionState::Validated, SubmissionState::Persisted);
                Ok(Persisted { record })
            }
            Err(e) => {
                error!(
                    "Submission {} -> {}: {}",
                    SubmissionState::Validated,
                    SubmissionState::Rejected,
                    e
                );
                Err(Rejection {
                    data: self.data,
                    errors: FormErrors::new(),
                    cause: RejectionCause::Storage(e.to_string()),
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Persisted<M> {
    pub record: M,
}

impl<M> Persisted<M> {
    pub fn state(&self) -> SubmissionState {
        SubmissionState::Persisted
    }

    pub fn into_record(self) -> M {
        self.record
    }
}
