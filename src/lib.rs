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

//! Structural JSON codec library.
//!
//! Decoding is expressed as composable, typed [`Decoder`]s (functions from a
//! path and a JSON value to a `Result`), and encoding as total functions from
//! a value to JSON. On top of the hand-written combinators in [`decode`] and
//! [`encode`], the [`auto`] module derives encoders and decoders from runtime
//! type descriptors ([`reflect`]) of user-defined records, tagged unions and
//! enumerations.
//!
//! ```
//! use json_codec::decode;
//!
//! let dec = decode::field("name", decode::string());
//! let name = decode::from_str(&dec, r#"{"name": "ripple"}"#);
//! assert_eq!(name, Ok("ripple".to_string()));
//! ```

pub mod auto;
pub mod decode;
pub mod encode;
pub mod error;
pub mod reflect;
mod time;
pub mod value;

pub use auto::{AutoOptions, CaseStrategy, ExtraCoders};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{DecodeError, DecodeReason};
pub use reflect::Reflect;
pub use value::{Json, JsonKind};
