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

//! Encoder combinators.
//!
//! Encoding is total: every function here maps a value to JSON without the
//! possibility of failure. Numbers above 53 bits of precision (`i64`, `u64`,
//! big integers and decimals) encode as strings, since JSON has no lossless
//! representation for them; non-finite floats encode as null.

#[cfg(test)]
mod tests;

use crate::time::format_timespan;
use crate::value::{self, Json};
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

type EncodeFn<T> = dyn Fn(&T) -> Json + Send + Sync;

/// A reusable encoder for values of type `T`, produced by the automatic coder
/// generator. Hand-written encoding normally uses the free functions in this
/// module directly.
pub struct Encoder<T> {
    run: Arc<EncodeFn<T>>,
}

impl<T> Clone for Encoder<T> {
    fn clone(&self) -> Self {
        Encoder {
            run: self.run.clone(),
        }
    }
}

impl<T: 'static> Encoder<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> Json + Send + Sync + 'static,
    {
        Encoder { run: Arc::new(f) }
    }

    pub fn encode(&self, value: &T) -> Json {
        (self.run)(value)
    }
}

pub fn string(value: &str) -> Json {
    Json::String(value.to_string())
}

pub fn char(value: char) -> Json {
    Json::String(value.to_string())
}

pub fn bool(value: bool) -> Json {
    Json::Bool(value)
}

pub fn uuid(value: &Uuid) -> Json {
    Json::String(value.to_string())
}

/// The JSON null value.
pub fn nil() -> Json {
    Json::Null
}

pub fn unit() -> Json {
    Json::Null
}

pub fn i8(value: i8) -> Json {
    Json::from(value)
}

pub fn u8(value: u8) -> Json {
    Json::from(value)
}

pub fn i16(value: i16) -> Json {
    Json::from(value)
}

pub fn u16(value: u16) -> Json {
    Json::from(value)
}

pub fn i32(value: i32) -> Json {
    Json::from(value)
}

pub fn u32(value: u32) -> Json {
    Json::from(value)
}

/// Encoded as a string: a JSON number cannot hold every `i64` exactly.
pub fn i64(value: i64) -> Json {
    Json::String(value.to_string())
}

/// Encoded as a string, as for [`i64`].
pub fn u64(value: u64) -> Json {
    Json::String(value.to_string())
}

pub fn bigint(value: &BigInt) -> Json {
    Json::String(value.to_string())
}

pub fn decimal(value: &Decimal) -> Json {
    Json::String(value.to_string())
}

/// Encode a float. `NaN` and the infinities have no JSON number form and
/// encode as null.
pub fn f64(value: f64) -> Json {
    if value.is_finite() {
        Json::from(value)
    } else {
        Json::Null
    }
}

pub fn f32(value: f32) -> Json {
    if value.is_finite() {
        Json::from(f64::from(value))
    } else {
        Json::Null
    }
}

/// Encode a UTC date in ISO-8601 round-trip form.
pub fn datetime(value: &DateTime<Utc>) -> Json {
    Json::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn datetime_offset(value: &DateTime<FixedOffset>) -> Json {
    Json::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

/// Encode a date without an offset, as written.
pub fn datetime_local(value: &NaiveDateTime) -> Json {
    Json::String(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

pub fn timespan(value: &TimeDelta) -> Json {
    Json::String(format_timespan(value))
}

/// Encode an object from key/value pairs, preserving the given order.
pub fn object<I>(pairs: I) -> Json
where
    I: IntoIterator<Item = (String, Json)>,
{
    Json::Object(pairs.into_iter().collect())
}

pub fn array(items: Vec<Json>) -> Json {
    Json::Array(items)
}

pub fn list(items: Vec<Json>) -> Json {
    Json::Array(items)
}

pub fn seq<I>(items: I) -> Json
where
    I: IntoIterator<Item = Json>,
{
    Json::Array(items.into_iter().collect())
}

/// Encode a string-keyed map as an object.
pub fn dict<I>(entries: I) -> Json
where
    I: IntoIterator<Item = (String, Json)>,
{
    object(entries)
}

/// Encode `Some` with the inner encoder and `None` as null.
pub fn option<T, F>(enc: F, value: &Option<T>) -> Json
where
    F: Fn(&T) -> Json,
{
    match value {
        Some(inner) => enc(inner),
        None => Json::Null,
    }
}

/// Encode a map with an arbitrary key type as an array of `[key, value]`
/// pairs.
pub fn map<'a, K, V, I, FK, FV>(key_enc: FK, value_enc: FV, entries: I) -> Json
where
    K: 'a,
    V: 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    FK: Fn(&K) -> Json,
    FV: Fn(&V) -> Json,
{
    Json::Array(
        entries
            .into_iter()
            .map(|(key, value)| Json::Array(vec![key_enc(key), value_enc(value)]))
            .collect(),
    )
}

macro_rules! tuple_encoder {
    ($(#[$attr:meta])* $name:ident, $($enc:ident: $f:ident: $ty:ident => $idx:tt),+) => {
        $(#[$attr])*
        pub fn $name<$($ty,)+ $($f),+>($($enc: $f,)+ value: &($($ty,)+)) -> Json
        where
            $($f: Fn(&$ty) -> Json),+
        {
            Json::Array(vec![$($enc(&value.$idx)),+])
        }
    };
}

tuple_encoder!(
    /// Encode a pair as a two element array.
    tuple2, e1: F1: T1 => 0, e2: F2: T2 => 1
);
tuple_encoder!(tuple3, e1: F1: T1 => 0, e2: F2: T2 => 1, e3: F3: T3 => 2);
tuple_encoder!(tuple4, e1: F1: T1 => 0, e2: F2: T2 => 1, e3: F3: T3 => 2, e4: F4: T4 => 3);
tuple_encoder!(tuple5, e1: F1: T1 => 0, e2: F2: T2 => 1, e3: F3: T3 => 2, e4: F4: T4 => 3, e5: F5: T5 => 4);
tuple_encoder!(tuple6, e1: F1: T1 => 0, e2: F2: T2 => 1, e3: F3: T3 => 2, e4: F4: T4 => 3, e5: F5: T5 => 4, e6: F6: T6 => 5);
tuple_encoder!(tuple7, e1: F1: T1 => 0, e2: F2: T2 => 1, e3: F3: T3 => 2, e4: F4: T4 => 3, e5: F5: T5 => 4, e6: F6: T6 => 5, e7: F7: T7 => 6);
tuple_encoder!(tuple8, e1: F1: T1 => 0, e2: F2: T2 => 1, e3: F3: T3 => 2, e4: F4: T4 => 3, e5: F5: T5 => 4, e6: F6: T6 => 5, e7: F7: T7 => 6, e8: F8: T8 => 7);

/// Encoders for reflected enumerations, one per underlying integer width,
/// reading the declared integer value of the variant.
pub mod enums {
    use super::Json;
    use crate::reflect::{Reflect, Shape};

    fn underlying<T: Reflect>(value: &T) -> i64 {
        match T::type_info().shape() {
            Shape::Enum(shape) => (shape.to_int)(value),
            _ => panic!(
                "`{}` is not a reflected enumeration",
                std::any::type_name::<T>()
            ),
        }
    }

    macro_rules! enum_encoder {
        ($name:ident, $ty:ty) => {
            pub fn $name<T: Reflect>(value: &T) -> Json {
                Json::from(underlying(value) as $ty)
            }
        };
    }

    enum_encoder!(i8, i8);
    enum_encoder!(u8, u8);
    enum_encoder!(i16, i16);
    enum_encoder!(u16, u16);
    enum_encoder!(i32, i32);
    enum_encoder!(u32, u32);
}

/// Serialize a JSON value: compact when `space` is zero, otherwise indented
/// by that many spaces with `\n` line endings.
pub fn to_string(space: usize, json: &Json) -> String {
    if space == 0 {
        value::print(json)
    } else {
        value::print_indented(space, json)
    }
}
