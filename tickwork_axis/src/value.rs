// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

/// A domain value: what a scale maps and what a tick labels.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A number.
    Number(f64),
    /// An instant, in milliseconds since the Unix epoch.
    Date(i64),
    /// A category.
    Text(String),
}

impl Value {
    /// The value on a continuous axis: numbers as-is, dates as epoch milliseconds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Date(ms) => Some(*ms as f64),
            Self::Text(_) => None,
        }
    }

    /// Returns the number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the epoch milliseconds, if this is a date.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Self::Date(ms) => Some(*ms),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
