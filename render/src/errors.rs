// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Render and request errors

use crate::dialect::{ArtifactKind, Dialect};
use derive_builder::UninitializedFieldError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Missing request field: {0}")]
    MissingField(&'static str),
    #[error("aswidth must be at least 1")]
    InvalidWidth,
    #[error("The format dialect requires a template")]
    MissingTemplate,
    #[error("Invalid template: {0}")]
    Template(String),
}

impl From<UninitializedFieldError> for RequestError {
    fn from(e: UninitializedFieldError) -> Self {
        RequestError::MissingField(e.field_name())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{kind} is not supported for {dialect}: {hint}")]
    Unsupported {
        kind: ArtifactKind,
        dialect: Dialect,
        hint: &'static str,
    },
    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),
    #[error("Unreachable combination: {kind} for {dialect}")]
    Unreachable { kind: ArtifactKind, dialect: Dialect },
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Tell if the error is about a (kind, dialect) pair that cannot be
    /// rendered, as opposed to a failure while rendering
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            RenderError::Unsupported { .. } | RenderError::Unreachable { .. }
        )
    }
}

pub type RenderResult = Result<(), RenderError>;
