// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use crate::value::{print_indented, Json};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a decoder can fail on a JSON value.
#[derive(Debug, PartialEq, Clone)]
pub enum DecodeReason {
    /// A primitive decoder met a value of the wrong kind.
    BadPrimitive(String, Json),
    /// A structural decoder met a value of the wrong kind.
    BadType(String, Json),
    /// A primitive decoder met a value of the right kind that was still
    /// unusable, with a detail message saying why.
    BadPrimitiveExtra(String, Json, String),
    /// A required object field was absent.
    BadField(String, Json),
    /// Descent through a field path met a null or an absent field. The final
    /// component names the offending field.
    BadPath(String, Json, String),
    /// An array was shorter than the index a decoder required.
    TooSmallArray(String, Json),
    /// A failure injected with [`crate::decode::fail`].
    FailMessage(String),
    /// Every alternative of a [`crate::decode::one_of`] failed. Each entry is
    /// a fully rendered sub-error, path included.
    BadOneOf(Vec<String>),
}

/// A decode failure: the path at which decoding failed and the reason.
#[derive(Debug, PartialEq, Clone)]
pub struct DecodeError {
    pub path: String,
    pub reason: DecodeReason,
}

impl DecodeError {
    pub fn new(path: impl Into<String>, reason: DecodeReason) -> Self {
        DecodeError {
            path: path.into(),
            reason,
        }
    }
}

/// The shared "expecting X but instead got: Y" form, printing the offending
/// value indented by four spaces. When `newline` is set the value starts on
/// its own line.
fn generic_msg(expected: &str, value: &Json, newline: bool) -> String {
    let sep = if newline { "\n" } else { " " };
    format!(
        "Expecting {} but instead got:{}{}",
        expected,
        sep,
        print_indented(4, value)
    )
}

impl Display for DecodeReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeReason::BadPrimitive(expected, value) => {
                f.write_str(&generic_msg(expected, value, false))
            }
            DecodeReason::BadType(expected, value) => {
                f.write_str(&generic_msg(expected, value, true))
            }
            DecodeReason::BadPrimitiveExtra(expected, value, detail) => {
                write!(f, "{}\nReason: {}", generic_msg(expected, value, false), detail)
            }
            DecodeReason::BadField(expected, value) => {
                f.write_str(&generic_msg(expected, value, true))
            }
            DecodeReason::BadPath(expected, value, field) => {
                write!(
                    f,
                    "{}\nNode `{}` is unknown.",
                    generic_msg(expected, value, true),
                    field
                )
            }
            DecodeReason::TooSmallArray(expected, value) => {
                write!(f, "Expecting {}.\n{}", expected, print_indented(4, value))
            }
            DecodeReason::FailMessage(message) => {
                write!(
                    f,
                    "The following `failure` occurred with the decoder: {}",
                    message
                )
            }
            DecodeReason::BadOneOf(errors) => {
                write!(
                    f,
                    "The following errors were found:\n\n{}",
                    errors.join("\n\n")
                )
            }
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            // The aggregated sub-errors already carry their own paths.
            reason @ DecodeReason::BadOneOf(_) => write!(f, "{}", reason),
            reason => write!(f, "Error at: `{}`\n{}", self.path, reason),
        }
    }
}

impl Error for DecodeError {}
