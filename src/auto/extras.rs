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

use super::{BoxedDecoder, BoxedEncoder};
use crate::decode::Decoder;
use crate::reflect::concrete;
use crate::value::Json;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// User supplied coder overrides, keyed by type name and consulted before
/// structural generation at every recursive step.
///
/// The `hash` is a caller chosen stable fingerprint of the registry contents;
/// it is folded into cache keys so that coders generated under distinct
/// registries never alias. Distinct registries must carry distinct hashes.
#[derive(Clone, Default)]
pub struct ExtraCoders {
    hash: String,
    coders: HashMap<String, (BoxedEncoder, BoxedDecoder)>,
}

impl ExtraCoders {
    pub fn new(hash: impl Into<String>) -> Self {
        ExtraCoders {
            hash: hash.into(),
            coders: HashMap::new(),
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Register an encoder/decoder pair for `T`, overriding whatever the
    /// generator would otherwise produce for it.
    pub fn with_coder<T, E>(mut self, encoder: E, decoder: Decoder<T>) -> Self
    where
        T: Any,
        E: Fn(&T) -> Json + Send + Sync + 'static,
    {
        let boxed_encoder: BoxedEncoder = Arc::new(move |value| encoder(concrete::<T>(value)));
        let boxed_decoder: BoxedDecoder = Arc::new(move |path, value| {
            decoder
                .run(path, value)
                .map(|output| Box::new(output) as Box<dyn Any>)
        });
        self.coders.insert(
            std::any::type_name::<T>().to_string(),
            (boxed_encoder, boxed_decoder),
        );
        self
    }

    pub(crate) fn lookup(&self, type_name: &str) -> Option<&(BoxedEncoder, BoxedDecoder)> {
        self.coders.get(type_name)
    }
}
