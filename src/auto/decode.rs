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

//! Type directed generation of boxed decoders.

use super::{cache, AutoOptions, BoxedDecoder};
use crate::decode::{self, bad_primitive, bad_type, read_integer};
use crate::error::{DecodeError, DecodeReason};
use crate::reflect::{EnumShape, IntWidth, MapShape, RecordShape, Shape, TypeInfo, UnionShape};
use crate::value::{self, Json};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub(super) struct DecodeCtx<'a> {
    options: &'a AutoOptions,
    use_cache: bool,
    in_progress: HashMap<&'static str, Arc<OnceLock<BoxedDecoder>>>,
}

impl<'a> DecodeCtx<'a> {
    pub(super) fn new(options: &'a AutoOptions, use_cache: bool) -> Self {
        DecodeCtx {
            options,
            use_cache,
            in_progress: HashMap::new(),
        }
    }
}

fn from_typed<T: 'static>(dec: decode::Decoder<T>) -> BoxedDecoder {
    Arc::new(move |path, value| {
        dec.run(path, value)
            .map(|output| Box::new(output) as Box<dyn Any>)
    })
}

fn deferred(cell: Arc<OnceLock<BoxedDecoder>>) -> BoxedDecoder {
    Arc::new(move |path, value| {
        let dec = cell
            .get()
            .expect("recursive decoder used before its generation completed");
        dec(path, value)
    })
}

/// Generate a decoder for a named nominal type, consulting the cache and
/// installing the recursion cell before descending into the body.
fn named(
    ctx: &mut DecodeCtx<'_>,
    name: &'static str,
    build: impl FnOnce(&mut DecodeCtx<'_>) -> BoxedDecoder,
) -> BoxedDecoder {
    if ctx.use_cache {
        let key = cache::cache_key(ctx.options, name);
        if let Some(found) = cache::find_decoder(&key) {
            return found;
        }
        let cell = Arc::new(OnceLock::new());
        ctx.in_progress.insert(name, cell.clone());
        let built = build(ctx);
        let _ = cell.set(built.clone());
        cache::store_decoder(key, built)
    } else {
        let cell = Arc::new(OnceLock::new());
        ctx.in_progress.insert(name, cell.clone());
        let built = build(ctx);
        let _ = cell.set(built.clone());
        built
    }
}

pub(super) fn decoder_for(info: &TypeInfo, ctx: &mut DecodeCtx<'_>) -> BoxedDecoder {
    if let Some(extras) = &ctx.options.extras {
        if let Some((_, dec)) = extras.lookup(info.name()) {
            return dec.clone();
        }
    }
    if let Some(cell) = ctx.in_progress.get(info.name()) {
        return deferred(cell.clone());
    }
    match info.shape() {
        Shape::Unit => from_typed(decode::unit()),
        Shape::Bool => from_typed(decode::bool()),
        Shape::Char => from_typed(decode::char()),
        Shape::String => from_typed(decode::string()),
        Shape::Int8 => from_typed(decode::i8()),
        Shape::UInt8 => from_typed(decode::u8()),
        Shape::Int16 => from_typed(decode::i16()),
        Shape::UInt16 => from_typed(decode::u16()),
        Shape::Int32 => from_typed(decode::i32()),
        Shape::UInt32 => from_typed(decode::u32()),
        Shape::Int64 => from_typed(decode::i64()),
        Shape::UInt64 => from_typed(decode::u64()),
        Shape::Float32 => from_typed(decode::f32()),
        Shape::Float64 => from_typed(decode::f64()),
        Shape::BigInt => from_typed(decode::bigint()),
        Shape::Decimal => from_typed(decode::decimal()),
        Shape::Uuid => from_typed(decode::uuid()),
        Shape::DateTime => from_typed(decode::datetime_local()),
        Shape::DateTimeUtc => from_typed(decode::datetime_utc()),
        Shape::DateTimeOffset => from_typed(decode::datetime_offset()),
        Shape::TimeSpan => from_typed(decode::timespan()),
        Shape::Json => from_typed(decode::value()),
        Shape::Opaque => panic!(
            "cannot generate a decoder for `{}`; register it with `ExtraCoders::with_coder`",
            info.name()
        ),
        Shape::Option(shape) => {
            let inner_info = (shape.inner)();
            let some = shape.some;
            let none = shape.none;
            if matches!(inner_info.shape(), Shape::Opaque) && !has_extra(ctx, &inner_info) {
                // Leniency for optional fields of unknown type: only a
                // non-null value is an error, and only at decode time.
                let name = inner_info.name();
                return Arc::new(move |path, value| {
                    if value.is_null() {
                        Ok(none())
                    } else {
                        Err(DecodeError::new(
                            path,
                            DecodeReason::FailMessage(format!(
                                "cannot decode a value of `{}` without an extra coder",
                                name
                            )),
                        ))
                    }
                });
            }
            let inner = decoder_for(&inner_info, ctx);
            Arc::new(move |path, value| {
                if value.is_null() {
                    Ok(none())
                } else {
                    inner(path, value).map(some)
                }
            })
        }
        Shape::Seq(shape) => {
            let item = decoder_for(&(shape.item)(), ctx);
            let collect = shape.collect;
            Arc::new(move |path, value| match value::items(value) {
                Some(elements) => {
                    let mut out = Vec::with_capacity(elements.len());
                    for (i, element) in elements.iter().enumerate() {
                        out.push(item(&format!("{}[{}]", path, i), element)?);
                    }
                    Ok(collect(out))
                }
                None => Err(bad_primitive(path, "an array", value)),
            })
        }
        Shape::Map(shape) => map_decoder(shape, ctx),
        Shape::Tuple(shape) => {
            let items: Vec<BoxedDecoder> = shape
                .items
                .iter()
                .map(|item| decoder_for(&item(), ctx))
                .collect();
            let construct = shape.construct;
            Arc::new(move |path, value| match value::items(value) {
                Some(elements) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (i, item) in items.iter().enumerate() {
                        match elements.get(i) {
                            Some(element) => out.push(item(&format!("{}[{}]", path, i), element)?),
                            None => {
                                return Err(DecodeError::new(
                                    path,
                                    DecodeReason::TooSmallArray(
                                        format!(
                                            "a longer array. Need index `{}` but there are only `{}` entries",
                                            i,
                                            elements.len()
                                        ),
                                        value.clone(),
                                    ),
                                ))
                            }
                        }
                    }
                    Ok(construct(out))
                }
                None => Err(bad_primitive(path, "an array", value)),
            })
        }
        Shape::Wrapper(shape) => {
            let inner = decoder_for(&(shape.inner)(), ctx);
            let wrap = shape.wrap;
            Arc::new(move |path, value| inner(path, value).map(wrap))
        }
        Shape::Record(shape) => named(ctx, info.name(), |ctx| record_decoder(shape, ctx)),
        Shape::Union(shape) => {
            let label = info.name();
            named(ctx, label, |ctx| union_decoder(shape, label, ctx))
        }
        Shape::Enum(shape) => named(ctx, info.name(), |_| enum_decoder(shape)),
    }
}

fn has_extra(ctx: &DecodeCtx<'_>, info: &TypeInfo) -> bool {
    ctx.options
        .extras
        .as_ref()
        .map(|extras| extras.lookup(info.name()).is_some())
        .unwrap_or(false)
}

fn record_decoder(shape: &RecordShape, ctx: &mut DecodeCtx<'_>) -> BoxedDecoder {
    let mut fields = Vec::with_capacity(shape.fields.len());
    for field in &shape.fields {
        let field_info = (field.info)();
        let absent_as_null = matches!(field_info.shape(), Shape::Option(_));
        let key = ctx.options.case.convert(field.name);
        let dec = decoder_for(&field_info, ctx);
        fields.push((key, absent_as_null, dec));
    }
    let construct = shape.construct;
    Arc::new(move |path, value| {
        if !value.is_object() {
            return Err(bad_type(path, "an object", value));
        }
        let mut parts = Vec::with_capacity(fields.len());
        for (key, absent_as_null, dec) in &fields {
            match value::field_of(value, key) {
                Some(item) => parts.push(dec(&format!("{}.{}", path, key), item)?),
                None if *absent_as_null => {
                    parts.push(dec(&format!("{}.{}", path, key), &Json::Null)?)
                }
                None => {
                    return Err(DecodeError::new(
                        path,
                        DecodeReason::BadField(
                            format!("an object with a field named `{}`", key),
                            value.clone(),
                        ),
                    ))
                }
            }
        }
        Ok(construct(parts))
    })
}

struct CaseDecoder {
    name: &'static str,
    fields: Vec<BoxedDecoder>,
    construct: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>,
}

fn union_decoder(shape: &UnionShape, label: &'static str, ctx: &mut DecodeCtx<'_>) -> BoxedDecoder {
    let cases: Vec<CaseDecoder> = shape
        .cases
        .iter()
        .map(|case| CaseDecoder {
            name: case.name,
            fields: case
                .fields
                .iter()
                .map(|field| decoder_for(&field(), ctx))
                .collect(),
            construct: case.construct,
        })
        .collect();
    Arc::new(move |path, value| {
        if let Some(tag) = value.as_str() {
            decode_case(&cases, label, path, value, tag, &[])
        } else if let Some(elements) = value::items(value) {
            match elements.first().and_then(Json::as_str) {
                Some(tag) => decode_case(&cases, label, path, value, tag, &elements[1..]),
                None => Err(bad_primitive(
                    path,
                    "an array whose first element names a case",
                    value,
                )),
            }
        } else {
            Err(bad_primitive(path, "a string or an array", value))
        }
    })
}

fn decode_case(
    cases: &[CaseDecoder],
    label: &'static str,
    path: &str,
    value: &Json,
    tag: &str,
    payload: &[Json],
) -> Result<Box<dyn Any>, DecodeError> {
    let case = match cases.iter().find(|case| case.name == tag) {
        Some(case) => case,
        None => {
            return Err(DecodeError::new(
                path,
                DecodeReason::FailMessage(format!("Cannot find case `{}` in `{}`", tag, label)),
            ))
        }
    };
    // A bare `"Case"` or `["Case"]` (with a stray trailing entry tolerated)
    // for field-free cases; otherwise the payload length must match.
    let arity_ok = if case.fields.is_empty() {
        payload.len() <= 1
    } else {
        payload.len() == case.fields.len()
    };
    if !arity_ok {
        return Err(DecodeError::new(
            path,
            DecodeReason::FailMessage(format!(
                "Case `{}` of `{}` expects {} fields but got {}",
                tag,
                label,
                case.fields.len(),
                payload.len()
            )),
        ));
    }
    let mut parts = Vec::with_capacity(case.fields.len());
    for (i, dec) in case.fields.iter().enumerate() {
        parts.push(dec(&format!("{}[{}]", path, i + 1), &payload[i])?);
    }
    Ok((case.construct)(parts))
}

fn width_label(width: IntWidth) -> &'static str {
    match width {
        IntWidth::I8 => "an int8",
        IntWidth::U8 => "a uint8",
        IntWidth::I16 => "an int16",
        IntWidth::U16 => "a uint16",
        IntWidth::I32 => "an int",
        IntWidth::U32 => "a uint32",
    }
}

fn enum_decoder(shape: &EnumShape) -> BoxedDecoder {
    let width = shape.width;
    let values = shape.values.clone();
    let from_int = shape.from_int;
    let label = width_label(width);
    Arc::new(move |path, value| {
        let n = match width {
            IntWidth::I8 => read_integer::<i8>(path, value, label)? as i64,
            IntWidth::U8 => read_integer::<u8>(path, value, label)? as i64,
            IntWidth::I16 => read_integer::<i16>(path, value, label)? as i64,
            IntWidth::U16 => read_integer::<u16>(path, value, label)? as i64,
            IntWidth::I32 => read_integer::<i32>(path, value, label)? as i64,
            IntWidth::U32 => read_integer::<u32>(path, value, label)? as i64,
        };
        if values.contains(&n) {
            Ok(from_int(n))
        } else {
            Err(DecodeError::new(
                path,
                DecodeReason::BadPrimitiveExtra(
                    label.to_string(),
                    value.clone(),
                    "Unknown value provided for the enum".to_string(),
                ),
            ))
        }
    })
}

fn map_decoder(shape: &MapShape, ctx: &mut DecodeCtx<'_>) -> BoxedDecoder {
    let key_info = (shape.key)();
    let key_from_string: Option<fn(&str) -> Option<Box<dyn Any>>> = match key_info.shape() {
        Shape::String => Some(|key| Some(Box::new(key.to_string()) as Box<dyn Any>)),
        Shape::Uuid => Some(|key| {
            uuid::Uuid::parse_str(key)
                .ok()
                .map(|id| Box::new(id) as Box<dyn Any>)
        }),
        _ => None,
    };
    let key_label: &'static str = match key_info.shape() {
        Shape::Uuid => "a guid",
        _ => "a string",
    };
    let key_dec = decoder_for(&key_info, ctx);
    let value_dec = decoder_for(&(shape.value)(), ctx);
    let collect = shape.collect;

    Arc::new(move |path, value| {
        let mut entries = Vec::new();
        match (&key_from_string, value::entries(value)) {
            // Stringifiable keys read from an object form.
            (Some(parse_key), Some(object_entries)) => {
                for (key, item) in object_entries {
                    let entry_path = format!("{}.{}", path, key);
                    let decoded_key = parse_key(key).ok_or_else(|| {
                        bad_primitive(&entry_path, key_label, &Json::String(key.to_string()))
                    })?;
                    let decoded_value = value_dec(&entry_path, item)?;
                    entries.push((decoded_key, decoded_value));
                }
            }
            _ => match value::items(value) {
                // Either form decodes from an array of pairs.
                Some(elements) => {
                    for (i, element) in elements.iter().enumerate() {
                        let pair = value::items(element).ok_or_else(|| {
                            bad_primitive(&format!("{}[{}]", path, i), "an array", element)
                        })?;
                        if pair.len() < 2 {
                            return Err(DecodeError::new(
                                format!("{}[{}]", path, i),
                                DecodeReason::TooSmallArray(
                                    format!(
                                        "a longer array. Need index `1` but there are only `{}` entries",
                                        pair.len()
                                    ),
                                    element.clone(),
                                ),
                            ));
                        }
                        let decoded_key = key_dec(&format!("{}[{}][0]", path, i), &pair[0])?;
                        let decoded_value = value_dec(&format!("{}[{}][1]", path, i), &pair[1])?;
                        entries.push((decoded_key, decoded_value));
                    }
                }
                None => {
                    let expected = if key_from_string.is_some() {
                        "an object or an array of key/value pairs"
                    } else {
                        "an array of key/value pairs"
                    };
                    return Err(bad_primitive(path, expected, value));
                }
            },
        }
        Ok(collect(entries))
    })
}
