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

//! The process wide coder cache.
//!
//! Keys combine the case strategy, the type name and the extras fingerprint,
//! so coders generated under different configurations never alias. The lock
//! is never held across generation: under a race the same coder may be built
//! twice, and the first one stored wins.

use super::{AutoOptions, BoxedDecoder, BoxedEncoder};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::trace;

static DECODERS: OnceLock<Mutex<HashMap<String, BoxedDecoder>>> = OnceLock::new();
static ENCODERS: OnceLock<Mutex<HashMap<String, BoxedEncoder>>> = OnceLock::new();

pub(super) fn cache_key(options: &AutoOptions, type_name: &str) -> String {
    let extras_hash = options
        .extras
        .as_ref()
        .map(|extras| extras.hash())
        .unwrap_or("");
    format!("{:?}:{}:{}", options.case, type_name, extras_hash)
}

pub(super) fn find_decoder(key: &str) -> Option<BoxedDecoder> {
    let map = DECODERS.get_or_init(Default::default);
    let guard = map.lock().unwrap_or_else(PoisonError::into_inner);
    let found = guard.get(key).cloned();
    if found.is_some() {
        trace!(key = %key, "Decoder cache hit.");
    }
    found
}

pub(super) fn store_decoder(key: String, decoder: BoxedDecoder) -> BoxedDecoder {
    let map = DECODERS.get_or_init(Default::default);
    let mut guard = map.lock().unwrap_or_else(PoisonError::into_inner);
    guard.entry(key).or_insert(decoder).clone()
}

pub(super) fn find_encoder(key: &str) -> Option<BoxedEncoder> {
    let map = ENCODERS.get_or_init(Default::default);
    let guard = map.lock().unwrap_or_else(PoisonError::into_inner);
    let found = guard.get(key).cloned();
    if found.is_some() {
        trace!(key = %key, "Encoder cache hit.");
    }
    found
}

pub(super) fn store_encoder(key: String, encoder: BoxedEncoder) -> BoxedEncoder {
    let map = ENCODERS.get_or_init(Default::default);
    let mut guard = map.lock().unwrap_or_else(PoisonError::into_inner);
    guard.entry(key).or_insert(encoder).clone()
}
