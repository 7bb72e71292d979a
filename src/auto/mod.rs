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

//! Automatic coders derived from runtime type descriptors.
//!
//! The generator walks a type's [`TypeInfo`](crate::reflect::TypeInfo) and
//! produces an encoder or decoder for it: records become objects with one
//! field per record field (keys chosen by the [`CaseStrategy`]), tagged
//! unions become `"Case"` or `["Case", field0, ...]`, maps with string or
//! UUID keys become objects and other maps arrays of pairs. User overrides
//! from an [`ExtraCoders`] registry win over generation at every step, and
//! the `_cached` entry points memoize generated coders process wide.
//!
//! ```
//! use json_codec::{auto, reflect_record, AutoOptions};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! reflect_record! {
//!     Point { x: f64, y: f64 }
//! }
//!
//! let options = AutoOptions::default();
//! let json = auto::to_string(0, &Point { x: 1.5, y: -2.0 }, &options);
//! let back: Point = auto::force_from_str(&json, &options);
//! assert_eq!(back, Point { x: 1.5, y: -2.0 });
//! ```

mod cache;
mod casing;
mod decode;
mod encode;
mod extras;

pub use casing::CaseStrategy;
pub use extras::ExtraCoders;

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::DecodeError;
use crate::reflect::{unbox, Reflect};
use crate::value::Json;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// A type erased encoder, the form coders take inside the generator and in
/// [`ExtraCoders`] registries.
pub type BoxedEncoder = Arc<dyn Fn(&dyn Any) -> Json + Send + Sync>;

/// A type erased decoder, dual to [`BoxedEncoder`].
pub type BoxedDecoder =
    Arc<dyn Fn(&str, &Json) -> Result<Box<dyn Any>, DecodeError> + Send + Sync>;

/// Configuration for the automatic coder generator.
#[derive(Clone)]
pub struct AutoOptions {
    /// How record field names map to JSON keys.
    pub case: CaseStrategy,
    /// User overrides consulted before generation.
    pub extras: Option<ExtraCoders>,
    /// Omit record fields holding `None` when encoding (decoding still reads
    /// a missing key back as `None`). Encoder-only.
    pub skip_null_field: bool,
}

impl Default for AutoOptions {
    fn default() -> Self {
        AutoOptions {
            case: CaseStrategy::PascalCase,
            extras: None,
            skip_null_field: true,
        }
    }
}

impl AutoOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_case(mut self, case: CaseStrategy) -> Self {
        self.case = case;
        self
    }

    pub fn with_extras(mut self, extras: ExtraCoders) -> Self {
        self.extras = Some(extras);
        self
    }

    pub fn keep_null_fields(mut self) -> Self {
        self.skip_null_field = false;
        self
    }
}

fn typed_decoder<T: Reflect>(boxed: BoxedDecoder) -> Decoder<T> {
    Decoder::new(move |path, value| boxed(path, value).map(|output| *unbox::<T>(output)))
}

fn typed_encoder<T: Reflect>(boxed: BoxedEncoder) -> Encoder<T> {
    Encoder::new(move |value: &T| boxed(value))
}

/// Generate a decoder for `T`.
pub fn decoder<T: Reflect>(options: &AutoOptions) -> Decoder<T> {
    let info = T::type_info();
    debug!(type_name = info.name(), "Generating a decoder.");
    let boxed = decode::decoder_for(&info, &mut decode::DecodeCtx::new(options, false));
    typed_decoder(boxed)
}

/// Generate a decoder for `T`, memoized process wide under the combination
/// of case strategy, type name and extras fingerprint.
pub fn decoder_cached<T: Reflect>(options: &AutoOptions) -> Decoder<T> {
    let info = T::type_info();
    let boxed = decode::decoder_for(&info, &mut decode::DecodeCtx::new(options, true));
    typed_decoder(boxed)
}

/// Generate an encoder for `T`.
pub fn encoder<T: Reflect>(options: &AutoOptions) -> Encoder<T> {
    let info = T::type_info();
    debug!(type_name = info.name(), "Generating an encoder.");
    let boxed = encode::encoder_for(&info, &mut encode::EncodeCtx::new(options, false));
    typed_encoder(boxed)
}

/// As [`encoder`], memoized process wide.
pub fn encoder_cached<T: Reflect>(options: &AutoOptions) -> Encoder<T> {
    let info = T::type_info();
    let boxed = encode::encoder_for(&info, &mut encode::EncodeCtx::new(options, true));
    typed_encoder(boxed)
}

/// Encode a value and serialize it: compact when `space` is zero, otherwise
/// indented by that many spaces.
pub fn to_string<T: Reflect>(space: usize, value: &T, options: &AutoOptions) -> String {
    let encoded = encoder_cached::<T>(options).encode(value);
    crate::encode::to_string(space, &encoded)
}

/// Parse JSON text and decode it as a `T`.
pub fn from_str<T: Reflect>(text: &str, options: &AutoOptions) -> Result<T, String> {
    crate::decode::from_str(&decoder_cached::<T>(options), text)
}

/// As [`from_str`], panicking on failure.
pub fn force_from_str<T: Reflect>(text: &str, options: &AutoOptions) -> T {
    match from_str(text, options) {
        Ok(output) => output,
        Err(message) => panic!("{}", message),
    }
}
