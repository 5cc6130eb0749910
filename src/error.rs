// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised by the reporting core.
///
/// Zero denominators are not an error: every ratio in the core yields `0`
/// when its denominator is zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Category parent chain forms a cycle at '{id}'")]
    CycleDetected { id: String },
}

pub type ReportResult<T> = Result<T, ReportError>;
