// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

/// Errors produced when parsing format strings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The string is not a valid number format specifier.
    #[error("invalid number format specifier {0:?}")]
    InvalidSpecifier(String),
    /// The string is not a valid date pattern.
    #[error("invalid date pattern {0:?}")]
    InvalidPattern(String),
}
