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

use super::{at, field, optional, optional_at, Decoder};
use crate::error::{DecodeError, DecodeReason};
use crate::value::Json;

/// The getter façade handed to an [`object`] builder.
///
/// Every getter either yields its value or records an error and yields a
/// placeholder, so the builder always runs to completion and the final error
/// can report every bad field at once. The error list is the only mutation in
/// the crate and lives for a single decode call.
pub struct Getters<'a> {
    path: &'a str,
    value: &'a Json,
    errors: Vec<DecodeError>,
}

impl<'a> Getters<'a> {
    fn new(path: &'a str, value: &'a Json) -> Self {
        Getters {
            path,
            value,
            errors: Vec::new(),
        }
    }

    fn unwrap_or_default<T: Default>(&mut self, result: Result<T, DecodeError>) -> T {
        match result {
            Ok(output) => output,
            Err(error) => {
                self.errors.push(error);
                T::default()
            }
        }
    }

    fn unwrap_optional<T>(&mut self, result: Result<Option<T>, DecodeError>) -> Option<T> {
        match result {
            Ok(output) => output,
            Err(error) => {
                self.errors.push(error);
                None
            }
        }
    }

    /// Decode a required field, recording an error and yielding
    /// `T::default()` if it is absent or malformed.
    pub fn required_field<T>(&mut self, name: &str, dec: Decoder<T>) -> T
    where
        T: Default + 'static,
    {
        let result = field(name, dec).run(self.path, self.value);
        self.unwrap_or_default(result)
    }

    /// Decode a required value nested under a path of field names.
    pub fn required_at<T>(&mut self, names: &[&str], dec: Decoder<T>) -> T
    where
        T: Default + 'static,
    {
        let result = at(names, dec).run(self.path, self.value);
        self.unwrap_or_default(result)
    }

    /// Run a decoder against the whole object.
    pub fn required_raw<T>(&mut self, dec: Decoder<T>) -> T
    where
        T: Default + 'static,
    {
        let result = dec.run(self.path, self.value);
        self.unwrap_or_default(result)
    }

    /// Decode a field that may be absent or null.
    pub fn optional_field<T: 'static>(&mut self, name: &str, dec: Decoder<T>) -> Option<T> {
        let result = optional(name, dec).run(self.path, self.value);
        self.unwrap_optional(result)
    }

    /// Decode an optional value nested under a path of field names.
    pub fn optional_at<T: 'static>(&mut self, names: &[&str], dec: Decoder<T>) -> Option<T> {
        let result = optional_at(names, dec).run(self.path, self.value);
        self.unwrap_optional(result)
    }

    /// Run a decoder against the whole object, treating "absent" failures as
    /// `None`: a missing field or path, or a kind mismatch against a null
    /// value. Any other failure is recorded.
    pub fn optional_raw<T: 'static>(&mut self, dec: Decoder<T>) -> Option<T> {
        match dec.run(self.path, self.value) {
            Ok(output) => Some(output),
            Err(error) => {
                let downgrade = match &error.reason {
                    DecodeReason::BadField(_, _) | DecodeReason::BadPath(_, _, _) => true,
                    DecodeReason::BadPrimitive(_, value)
                    | DecodeReason::BadPrimitiveExtra(_, value, _)
                    | DecodeReason::BadType(_, value) => value.is_null(),
                    _ => false,
                };
                if !downgrade {
                    self.errors.push(error);
                }
                None
            }
        }
    }
}

/// Decode an object by running `build` once against a [`Getters`] context.
///
/// With no recorded errors the built value is returned; a single error is
/// forwarded as-is; two or more aggregate into one error listing every
/// rendered failure.
pub fn object<T, F>(build: F) -> Decoder<T>
where
    T: 'static,
    F: Fn(&mut Getters<'_>) -> T + Send + Sync + 'static,
{
    Decoder::new(move |path, value| {
        if !value.is_object() {
            return Err(DecodeError::new(
                path,
                DecodeReason::BadType("an object".to_string(), value.clone()),
            ));
        }
        let mut getters = Getters::new(path, value);
        let output = build(&mut getters);
        let Getters { mut errors, .. } = getters;
        match errors.len() {
            0 => Ok(output),
            1 => Err(errors.remove(0)),
            _ => Err(DecodeError::new(
                path,
                DecodeReason::BadOneOf(errors.iter().map(|error| error.to_string()).collect()),
            )),
        }
    })
}
