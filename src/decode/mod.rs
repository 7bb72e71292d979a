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

//! Decoder combinators.
//!
//! A [`Decoder`] is a pure function from a path and a JSON value to a
//! `Result`. Primitive decoders read leaf values; structural combinators
//! navigate objects and arrays, extending the path as they descend so that
//! every failure reports exactly where in the document it occurred.

mod object;
#[cfg(test)]
mod tests;

pub use object::{object, Getters};

use crate::error::{DecodeError, DecodeReason};
use crate::time::parse_timespan;
use crate::value::{self, Json};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

type DecodeFn<T> = dyn Fn(&str, &Json) -> Result<T, DecodeError> + Send + Sync;

/// A composable decoder from JSON to values of type `T`.
///
/// Decoders are cheap to clone; cloning shares the underlying function.
pub struct Decoder<T> {
    run: Arc<DecodeFn<T>>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Decoder {
            run: self.run.clone(),
        }
    }
}

impl<T: 'static> Decoder<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &Json) -> Result<T, DecodeError> + Send + Sync + 'static,
    {
        Decoder { run: Arc::new(f) }
    }

    /// Run the decoder against a value, reporting failures at `path`.
    pub fn run(&self, path: &str, value: &Json) -> Result<T, DecodeError> {
        (self.run)(path, value)
    }

    /// Transform the output of the decoder.
    pub fn map<U, F>(self, f: F) -> Decoder<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Decoder::new(move |path, value| self.run(path, value).map(&f))
    }

    /// Choose a follow-up decoder from the output of this one, running it
    /// against the same value.
    pub fn and_then<U, F>(self, f: F) -> Decoder<U>
    where
        U: 'static,
        F: Fn(T) -> Decoder<U> + Send + Sync + 'static,
    {
        Decoder::new(move |path, value| {
            let first = self.run(path, value)?;
            f(first).run(path, value)
        })
    }
}

pub(crate) fn bad_primitive(path: &str, expected: &str, value: &Json) -> DecodeError {
    DecodeError::new(
        path,
        DecodeReason::BadPrimitive(expected.to_string(), value.clone()),
    )
}

pub(crate) fn bad_type(path: &str, expected: &str, value: &Json) -> DecodeError {
    DecodeError::new(
        path,
        DecodeReason::BadType(expected.to_string(), value.clone()),
    )
}

/// Decode a JSON string.
pub fn string() -> Decoder<String> {
    Decoder::new(|path, value| match value.as_str() {
        Some(text) => Ok(text.to_string()),
        None => Err(bad_primitive(path, "a string", value)),
    })
}

/// Decode a JSON string holding exactly one character.
pub fn char() -> Decoder<char> {
    Decoder::new(|path, value| {
        match value.as_str() {
            Some(text) => {
                let mut chars = text.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    return Ok(c);
                }
            }
            None => {}
        }
        Err(bad_primitive(path, "a single character string", value))
    })
}

/// Decode a JSON boolean.
pub fn bool() -> Decoder<bool> {
    Decoder::new(|path, value| match value.as_bool() {
        Some(b) => Ok(b),
        None => Err(bad_primitive(path, "a boolean", value)),
    })
}

/// Decode a JSON string holding a UUID.
pub fn uuid() -> Decoder<Uuid> {
    Decoder::new(|path, value| {
        value
            .as_str()
            .and_then(|text| Uuid::parse_str(text).ok())
            .ok_or_else(|| bad_primitive(path, "a guid", value))
    })
}

/// Decode JSON null as the unit value.
pub fn unit() -> Decoder<()> {
    Decoder::new(|path, value| {
        if value.is_null() {
            Ok(())
        } else {
            Err(bad_primitive(path, "null", value))
        }
    })
}

pub(crate) fn read_integer<T>(path: &str, value: &Json, expected: &str) -> Result<T, DecodeError>
where
    T: TryFrom<i64> + TryFrom<u64> + std::str::FromStr,
{
    if value::is_number(value) {
        match value::try_integer::<T>(value) {
            Some(n) => Ok(n),
            None => {
                let detail = if value.as_i64().is_some() || value.as_u64().is_some() {
                    format!("Value was either too large or too small for {}", expected)
                } else {
                    "Value is not an integral value".to_string()
                };
                Err(DecodeError::new(
                    path,
                    DecodeReason::BadPrimitiveExtra(expected.to_string(), value.clone(), detail),
                ))
            }
        }
    } else if let Some(text) = value.as_str() {
        text.parse::<T>()
            .map_err(|_| bad_primitive(path, expected, value))
    } else {
        Err(bad_primitive(path, expected, value))
    }
}

macro_rules! integer_decoder {
    ($(#[$attr:meta])* $name:ident, $ty:ty, $expected:literal) => {
        $(#[$attr])*
        pub fn $name() -> Decoder<$ty> {
            Decoder::new(|path, value| read_integer::<$ty>(path, value, $expected))
        }
    };
}

integer_decoder!(
    /// Decode a JSON integer (or numeric string) within the range of `i8`.
    i8, i8, "an int8"
);
integer_decoder!(u8, u8, "a uint8");
integer_decoder!(i16, i16, "an int16");
integer_decoder!(u16, u16, "a uint16");
integer_decoder!(
    /// Decode a JSON integer (or numeric string) within the range of `i32`.
    /// Floating point tokens are rejected even when integral.
    i32, i32, "an int"
);
integer_decoder!(u32, u32, "a uint32");
integer_decoder!(i64, i64, "an int64");
integer_decoder!(u64, u64, "a uint64");

/// Decode a JSON number.
pub fn f64() -> Decoder<f64> {
    Decoder::new(|path, value| match value.as_f64() {
        Some(n) => Ok(n),
        None => Err(bad_primitive(path, "a float", value)),
    })
}

/// Decode a JSON number as a single precision float.
pub fn f32() -> Decoder<f32> {
    Decoder::new(|path, value| match value.as_f64() {
        Some(n) => Ok(n as f32),
        None => Err(bad_primitive(path, "a float32", value)),
    })
}

/// Decode a JSON number or numeric string as a decimal, preserving the
/// written precision.
pub fn decimal() -> Decoder<Decimal> {
    Decoder::new(|path, value| {
        let text = if let Some(text) = value.as_str() {
            text.to_string()
        } else if value::is_number(value) {
            value::print(value)
        } else {
            return Err(bad_primitive(path, "a decimal", value));
        };
        text.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| bad_primitive(path, "a decimal", value))
    })
}

/// Decode a JSON number or numeric string as an arbitrary precision integer.
pub fn bigint() -> Decoder<BigInt> {
    Decoder::new(|path, value| {
        if let Some(n) = value.as_i64() {
            Ok(BigInt::from(n))
        } else if let Some(n) = value.as_u64() {
            Ok(BigInt::from(n))
        } else if let Some(f) = value.as_f64() {
            if f.fract() == 0.0 {
                BigInt::from_f64(f).ok_or_else(|| bad_primitive(path, "a bigint", value))
            } else {
                Err(DecodeError::new(
                    path,
                    DecodeReason::BadPrimitiveExtra(
                        "a bigint".to_string(),
                        value.clone(),
                        "Value is not an integral value".to_string(),
                    ),
                ))
            }
        } else if let Some(text) = value.as_str() {
            text.parse::<BigInt>()
                .map_err(|_| bad_primitive(path, "a bigint", value))
        } else {
            Err(bad_primitive(path, "a bigint", value))
        }
    })
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Decode a JSON string holding a date, converting to UTC. Strings without an
/// offset are taken to already be in UTC.
pub fn datetime_utc() -> Decoder<DateTime<Utc>> {
    Decoder::new(|path, value| {
        value
            .as_str()
            .and_then(|text| {
                DateTime::parse_from_rfc3339(text)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
                    .or_else(|| parse_naive(text).map(|naive| Utc.from_utc_datetime(&naive)))
            })
            .ok_or_else(|| bad_primitive(path, "a datetime", value))
    })
}

/// Decode a JSON string holding a date, preserving it as written with any
/// offset dropped.
pub fn datetime_local() -> Decoder<NaiveDateTime> {
    Decoder::new(|path, value| {
        value
            .as_str()
            .and_then(|text| {
                DateTime::parse_from_rfc3339(text)
                    .map(|dt| dt.naive_local())
                    .ok()
                    .or_else(|| parse_naive(text))
            })
            .ok_or_else(|| bad_primitive(path, "a datetime", value))
    })
}

/// Decode a JSON string holding a date with an explicit offset.
pub fn datetime_offset() -> Decoder<DateTime<FixedOffset>> {
    Decoder::new(|path, value| {
        value
            .as_str()
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
            .ok_or_else(|| bad_primitive(path, "a datetimeoffset", value))
    })
}

/// Decode a JSON string holding a `[-][d.]hh:mm:ss[.fffffff]` duration.
pub fn timespan() -> Decoder<TimeDelta> {
    Decoder::new(|path, value| {
        value
            .as_str()
            .and_then(parse_timespan)
            .ok_or_else(|| bad_primitive(path, "a timespan", value))
    })
}

/// Decode a required object field. The field being present but null is not a
/// failure of `field` itself; the inner decoder sees the null.
pub fn field<T: 'static>(name: &str, dec: Decoder<T>) -> Decoder<T> {
    let name = name.to_string();
    Decoder::new(move |path, value| {
        if value.is_object() {
            match value::field_of(value, &name) {
                Some(inner) => dec.run(&format!("{}.{}", path, name), inner),
                None => Err(DecodeError::new(
                    path,
                    DecodeReason::BadField(
                        format!("an object with a field named `{}`", name),
                        value.clone(),
                    ),
                )),
            }
        } else {
            Err(bad_type(path, "an object", value))
        }
    })
}

/// Decode a value nested under a path of field names. Nulls and absent fields
/// part way down the path fail with the path walked so far.
pub fn at<T: 'static>(field_names: &[&str], dec: Decoder<T>) -> Decoder<T> {
    let names: Vec<String> = field_names.iter().map(|name| name.to_string()).collect();
    Decoder::new(move |first_path, first_value| {
        let full = names.join(".");
        let mut path = first_path.to_string();
        let mut current = first_value;
        for name in &names {
            if current.is_null() {
                return Err(DecodeError::new(
                    path,
                    DecodeReason::BadPath(
                        format!("an object with path `{}`", full),
                        first_value.clone(),
                        name.clone(),
                    ),
                ));
            }
            if !current.is_object() {
                return Err(bad_type(&path, "an object", current));
            }
            match value::field_of(current, name) {
                Some(next) => {
                    path = format!("{}.{}", path, name);
                    current = next;
                }
                None => {
                    return Err(DecodeError::new(
                        path,
                        DecodeReason::BadPath(
                            format!("an object with path `{}`", full),
                            first_value.clone(),
                            name.clone(),
                        ),
                    ));
                }
            }
        }
        dec.run(&path, current)
    })
}

/// Decode an object field that may be absent or null. The null check happens
/// before the inner decoder runs, so a decoder that assumes a non-null value
/// is safe here.
pub fn optional<T: 'static>(name: &str, dec: Decoder<T>) -> Decoder<Option<T>> {
    let name = name.to_string();
    Decoder::new(move |path, value| {
        if value.is_object() {
            match value::field_of(value, &name) {
                None => Ok(None),
                Some(Json::Null) => Ok(None),
                Some(inner) => dec.run(&format!("{}.{}", path, name), inner).map(Some),
            }
        } else {
            Err(bad_type(path, "an object", value))
        }
    })
}

/// Decode a value nested under a path of field names, yielding `None` when
/// any step of the path is absent or null.
pub fn optional_at<T: 'static>(field_names: &[&str], dec: Decoder<T>) -> Decoder<Option<T>> {
    let names: Vec<String> = field_names.iter().map(|name| name.to_string()).collect();
    Decoder::new(move |first_path, first_value| {
        let mut path = first_path.to_string();
        let mut current = first_value;
        for name in &names {
            if current.is_null() {
                return Ok(None);
            }
            if !current.is_object() {
                return Err(bad_type(&path, "an object", current));
            }
            match value::field_of(current, name) {
                Some(next) => {
                    path = format!("{}.{}", path, name);
                    current = next;
                }
                None => return Ok(None),
            }
        }
        if current.is_null() {
            Ok(None)
        } else {
            dec.run(&path, current).map(Some)
        }
    })
}

fn element<T: 'static>(
    dec: &Decoder<T>,
    path: &str,
    value: &Json,
    index: usize,
) -> Result<T, DecodeError> {
    match value::items(value) {
        Some(elements) => match elements.get(index) {
            Some(item) => dec.run(&format!("{}[{}]", path, index), item),
            None => Err(DecodeError::new(
                path,
                DecodeReason::TooSmallArray(
                    format!(
                        "a longer array. Need index `{}` but there are only `{}` entries",
                        index,
                        elements.len()
                    ),
                    value.clone(),
                ),
            )),
        },
        None => Err(bad_primitive(path, "an array", value)),
    }
}

/// Decode the element at `index` of a JSON array.
pub fn index<T: 'static>(index: usize, dec: Decoder<T>) -> Decoder<T> {
    Decoder::new(move |path, value| element(&dec, path, value, index))
}

/// Decode null as `None` and anything else with the inner decoder.
pub fn option<T: 'static>(dec: Decoder<T>) -> Decoder<Option<T>> {
    Decoder::new(move |path, value| {
        if value.is_null() {
            Ok(None)
        } else {
            dec.run(path, value).map(Some)
        }
    })
}

fn collection<T: 'static>(dec: Decoder<T>, expected: &'static str) -> Decoder<Vec<T>> {
    Decoder::new(move |path, value| match value::items(value) {
        Some(elements) => {
            let mut out = Vec::with_capacity(elements.len());
            for (i, item) in elements.iter().enumerate() {
                out.push(dec.run(&format!("{}[{}]", path, i), item)?);
            }
            Ok(out)
        }
        None => Err(bad_primitive(path, expected, value)),
    })
}

/// Decode a JSON array element-wise, stopping at the first failure.
pub fn list<T: 'static>(dec: Decoder<T>) -> Decoder<Vec<T>> {
    collection(dec, "a list")
}

/// As [`list`], reporting "an array" on mismatch.
pub fn array<T: 'static>(dec: Decoder<T>) -> Decoder<Vec<T>> {
    collection(dec, "an array")
}

/// Decode the key names of an object, in insertion order.
pub fn keys() -> Decoder<Vec<String>> {
    Decoder::new(|path, value| match value::entries(value) {
        Some(entries) => Ok(entries.map(|(key, _)| key.to_string()).collect()),
        None => Err(bad_primitive(path, "an object", value)),
    })
}

/// Decode an object into its key/value pairs, decoding every value. Failures
/// report the path extended with the offending key.
pub fn key_value_pairs<T: 'static>(dec: Decoder<T>) -> Decoder<Vec<(String, T)>> {
    Decoder::new(move |path, value| match value::entries(value) {
        Some(entries) => {
            let mut out = Vec::new();
            for (key, item) in entries {
                let decoded = dec.run(&format!("{}.{}", path, key), item)?;
                out.push((key.to_string(), decoded));
            }
            Ok(out)
        }
        None => Err(bad_primitive(path, "an object", value)),
    })
}

/// Decode an object into a map keyed by its field names.
pub fn dict<T: 'static>(dec: Decoder<T>) -> Decoder<BTreeMap<String, T>> {
    key_value_pairs(dec).map(|pairs| pairs.into_iter().collect())
}

/// Decode an array of two-element arrays into a map with an arbitrary key
/// type.
pub fn map_pairs<K, V>(key_dec: Decoder<K>, value_dec: Decoder<V>) -> Decoder<BTreeMap<K, V>>
where
    K: Ord + 'static,
    V: 'static,
{
    list(tuple2(key_dec, value_dec)).map(|pairs| pairs.into_iter().collect())
}

macro_rules! tuple_decoder {
    ($(#[$attr:meta])* $name:ident, $($dec:ident: $ty:ident => $idx:tt),+) => {
        $(#[$attr])*
        pub fn $name<$($ty: 'static),+>($($dec: Decoder<$ty>),+) -> Decoder<($($ty,)+)> {
            Decoder::new(move |path, value| Ok(($(element(&$dec, path, value, $idx)?,)+)))
        }
    };
}

tuple_decoder!(
    /// Decode a two element JSON array as a pair. Longer arrays are accepted;
    /// shorter ones fail with the missing index.
    tuple2, d1: T1 => 0, d2: T2 => 1
);
tuple_decoder!(tuple3, d1: T1 => 0, d2: T2 => 1, d3: T3 => 2);
tuple_decoder!(tuple4, d1: T1 => 0, d2: T2 => 1, d3: T3 => 2, d4: T4 => 3);
tuple_decoder!(tuple5, d1: T1 => 0, d2: T2 => 1, d3: T3 => 2, d4: T4 => 3, d5: T5 => 4);
tuple_decoder!(tuple6, d1: T1 => 0, d2: T2 => 1, d3: T3 => 2, d4: T4 => 3, d5: T5 => 4, d6: T6 => 5);
tuple_decoder!(tuple7, d1: T1 => 0, d2: T2 => 1, d3: T3 => 2, d4: T4 => 3, d5: T5 => 4, d6: T6 => 5, d7: T7 => 6);
tuple_decoder!(tuple8, d1: T1 => 0, d2: T2 => 1, d3: T3 => 2, d4: T4 => 3, d5: T5 => 4, d6: T6 => 5, d7: T7 => 6, d8: T8 => 7);

/// A decoder that always succeeds with the given value.
pub fn succeed<T>(output: T) -> Decoder<T>
where
    T: Clone + Send + Sync + 'static,
{
    Decoder::new(move |_, _| Ok(output.clone()))
}

/// A decoder that always fails with the given message.
pub fn fail<T: 'static>(message: &str) -> Decoder<T> {
    let message = message.to_string();
    Decoder::new(move |path, _| {
        Err(DecodeError::new(
            path,
            DecodeReason::FailMessage(message.clone()),
        ))
    })
}

/// Decode the raw JSON value.
pub fn value() -> Decoder<Json> {
    Decoder::new(|_, value| Ok(value.clone()))
}

/// Decode null as the given value.
pub fn nil<T>(output: T) -> Decoder<T>
where
    T: Clone + Send + Sync + 'static,
{
    Decoder::new(move |path, value| {
        if value.is_null() {
            Ok(output.clone())
        } else {
            Err(bad_primitive(path, "null", value))
        }
    })
}

macro_rules! map_decoder {
    ($(#[$attr:meta])* $name:ident, $($dec:ident: $ty:ident),+) => {
        $(#[$attr])*
        pub fn $name<$($ty: 'static,)+ T, F>(f: F, $($dec: Decoder<$ty>),+) -> Decoder<T>
        where
            T: 'static,
            F: Fn($($ty),+) -> T + Send + Sync + 'static,
        {
            Decoder::new(move |path, value| Ok(f($($dec.run(path, value)?),+)))
        }
    };
}

map_decoder!(map1, d1: T1);
map_decoder!(
    /// Run both decoders against the same value and combine the results,
    /// short-circuiting on the first failure in parameter order.
    map2, d1: T1, d2: T2
);
map_decoder!(map3, d1: T1, d2: T2, d3: T3);
map_decoder!(map4, d1: T1, d2: T2, d3: T3, d4: T4);
map_decoder!(map5, d1: T1, d2: T2, d3: T3, d4: T4, d5: T5);
map_decoder!(map6, d1: T1, d2: T2, d3: T3, d4: T4, d5: T5, d6: T6);
map_decoder!(map7, d1: T1, d2: T2, d3: T3, d4: T4, d5: T5, d6: T6, d7: T7);
map_decoder!(map8, d1: T1, d2: T2, d3: T3, d4: T4, d5: T5, d6: T6, d7: T7, d8: T8);

/// Run every decoder against the same value, collecting all outputs. The
/// first failure aborts.
pub fn all<T: 'static>(decoders: Vec<Decoder<T>>) -> Decoder<Vec<T>> {
    Decoder::new(move |path, value| decoders.iter().map(|dec| dec.run(path, value)).collect())
}

/// Try each decoder in order, returning the first success. When all fail the
/// error aggregates every rendered failure.
pub fn one_of<T: 'static>(decoders: Vec<Decoder<T>>) -> Decoder<T> {
    Decoder::new(move |path, value| {
        let mut errors = Vec::with_capacity(decoders.len());
        for dec in &decoders {
            match dec.run(path, value) {
                Ok(output) => return Ok(output),
                Err(error) => errors.push(error.to_string()),
            }
        }
        Err(DecodeError::new(path, DecodeReason::BadOneOf(errors)))
    })
}

/// Flipped application for incremental builders:
/// `succeed(ctor)` applied through a chain of `and_map`s. The value decoder
/// runs before the function decoder.
pub fn and_map<A, B>(
    value_dec: Decoder<A>,
    func_dec: Decoder<Arc<dyn Fn(A) -> B + Send + Sync>>,
) -> Decoder<B>
where
    A: 'static,
    B: 'static,
{
    Decoder::new(move |path, value| {
        let a = value_dec.run(path, value)?;
        let f = func_dec.run(path, value)?;
        Ok(f(a))
    })
}

/// Decoders for reflected enumerations, one per underlying integer width.
/// The decoded integer must be a declared member of the enumeration.
pub mod enums {
    use super::{read_integer, Decoder};
    use crate::error::{DecodeError, DecodeReason};
    use crate::reflect::{unbox, Reflect, Shape};

    fn member<T: Reflect>(path: &str, value: &super::Json, n: i64, expected: &str) -> Result<T, DecodeError> {
        match T::type_info().shape() {
            Shape::Enum(shape) if shape.values.contains(&n) => Ok(*unbox::<T>((shape.from_int)(n))),
            Shape::Enum(_) => Err(DecodeError::new(
                path,
                DecodeReason::BadPrimitiveExtra(
                    expected.to_string(),
                    value.clone(),
                    "Unknown value provided for the enum".to_string(),
                ),
            )),
            _ => panic!(
                "`{}` is not a reflected enumeration",
                std::any::type_name::<T>()
            ),
        }
    }

    macro_rules! enum_decoder {
        ($name:ident, $ty:ty, $expected:literal) => {
            pub fn $name<T: Reflect>() -> Decoder<T> {
                Decoder::new(|path, value| {
                    let n = read_integer::<$ty>(path, value, $expected)?;
                    member::<T>(path, value, n as i64, $expected)
                })
            }
        };
    }

    enum_decoder!(i8, i8, "an int8");
    enum_decoder!(u8, u8, "a uint8");
    enum_decoder!(i16, i16, "an int16");
    enum_decoder!(u16, u16, "a uint16");
    enum_decoder!(i32, i32, "an int");
    enum_decoder!(u32, u32, "a uint32");
}

/// Run a decoder against an already parsed value, rendering any failure to a
/// string.
pub fn from_value<T: 'static>(path: &str, dec: &Decoder<T>, json: &Json) -> Result<T, String> {
    dec.run(path, json).map_err(|error| error.to_string())
}

/// Parse JSON text and run a decoder against it from the root path `$`.
pub fn from_str<T: 'static>(dec: &Decoder<T>, text: &str) -> Result<T, String> {
    match value::parse_str(text) {
        Ok(json) => from_value("$", dec, &json),
        Err(error) => Err(format!("Given an invalid JSON: {}", error)),
    }
}

/// As [`from_str`], panicking on failure.
pub fn force_from_str<T: 'static>(dec: &Decoder<T>, text: &str) -> T {
    match from_str(dec, text) {
        Ok(output) => output,
        Err(message) => panic!("{}", message),
    }
}
