// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine error taxonomy.
//!
//! Errors here are boundary values: each public controller operation catches
//! them, logs, and degrades (frozen position, missing overlay) instead of
//! letting a panic or error escape into the host's event dispatch. The
//! dispatch layer converts them into `success: false` responses.

use crate::host::HostError;

/// An error from an overlay engine operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// No video in the document matched the target descriptor (the document
    /// has no videos at all). Fails initialization; non-fatal to the page.
    #[error("no matching video element found")]
    TargetNotFound,
    /// The platform substrate failed mid-operation, e.g. a geometry read on
    /// a detached element.
    #[error("host operation failed: {0}")]
    Host(#[from] HostError),
}
