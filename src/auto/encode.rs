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

//! Type directed generation of boxed encoders.

use super::{cache, AutoOptions, BoxedEncoder};
use crate::encode;
use crate::reflect::{concrete, EnumShape, IntWidth, MapShape, RecordShape, Shape, TypeInfo, UnionShape};
use crate::value::Json;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub(super) struct EncodeCtx<'a> {
    options: &'a AutoOptions,
    use_cache: bool,
    in_progress: HashMap<&'static str, Arc<OnceLock<BoxedEncoder>>>,
}

impl<'a> EncodeCtx<'a> {
    pub(super) fn new(options: &'a AutoOptions, use_cache: bool) -> Self {
        EncodeCtx {
            options,
            use_cache,
            in_progress: HashMap::new(),
        }
    }
}

fn from_typed<T: 'static>(enc: impl Fn(&T) -> Json + Send + Sync + 'static) -> BoxedEncoder {
    Arc::new(move |value| enc(concrete::<T>(value)))
}

fn deferred(cell: Arc<OnceLock<BoxedEncoder>>) -> BoxedEncoder {
    Arc::new(move |value| {
        let enc = cell
            .get()
            .expect("recursive encoder used before its generation completed");
        enc(value)
    })
}

fn named(
    ctx: &mut EncodeCtx<'_>,
    name: &'static str,
    build: impl FnOnce(&mut EncodeCtx<'_>) -> BoxedEncoder,
) -> BoxedEncoder {
    if ctx.use_cache {
        let key = cache::cache_key(ctx.options, name);
        if let Some(found) = cache::find_encoder(&key) {
            return found;
        }
        let cell = Arc::new(OnceLock::new());
        ctx.in_progress.insert(name, cell.clone());
        let built = build(ctx);
        let _ = cell.set(built.clone());
        cache::store_encoder(key, built)
    } else {
        let cell = Arc::new(OnceLock::new());
        ctx.in_progress.insert(name, cell.clone());
        let built = build(ctx);
        let _ = cell.set(built.clone());
        built
    }
}

pub(super) fn encoder_for(info: &TypeInfo, ctx: &mut EncodeCtx<'_>) -> BoxedEncoder {
    if let Some(extras) = &ctx.options.extras {
        if let Some((enc, _)) = extras.lookup(info.name()) {
            return enc.clone();
        }
    }
    if let Some(cell) = ctx.in_progress.get(info.name()) {
        return deferred(cell.clone());
    }
    match info.shape() {
        Shape::Unit => from_typed::<()>(|_| encode::unit()),
        Shape::Bool => from_typed::<bool>(|value| encode::bool(*value)),
        Shape::Char => from_typed::<char>(|value| encode::char(*value)),
        Shape::String => from_typed::<String>(|value| encode::string(value)),
        Shape::Int8 => from_typed::<i8>(|value| encode::i8(*value)),
        Shape::UInt8 => from_typed::<u8>(|value| encode::u8(*value)),
        Shape::Int16 => from_typed::<i16>(|value| encode::i16(*value)),
        Shape::UInt16 => from_typed::<u16>(|value| encode::u16(*value)),
        Shape::Int32 => from_typed::<i32>(|value| encode::i32(*value)),
        Shape::UInt32 => from_typed::<u32>(|value| encode::u32(*value)),
        Shape::Int64 => from_typed::<i64>(|value| encode::i64(*value)),
        Shape::UInt64 => from_typed::<u64>(|value| encode::u64(*value)),
        Shape::Float32 => from_typed::<f32>(|value| encode::f32(*value)),
        Shape::Float64 => from_typed::<f64>(|value| encode::f64(*value)),
        Shape::BigInt => from_typed::<num_bigint::BigInt>(encode::bigint),
        Shape::Decimal => from_typed::<rust_decimal::Decimal>(encode::decimal),
        Shape::Uuid => from_typed::<uuid::Uuid>(encode::uuid),
        Shape::DateTime => from_typed::<chrono::NaiveDateTime>(encode::datetime_local),
        Shape::DateTimeUtc => from_typed::<chrono::DateTime<chrono::Utc>>(encode::datetime),
        Shape::DateTimeOffset => {
            from_typed::<chrono::DateTime<chrono::FixedOffset>>(encode::datetime_offset)
        }
        Shape::TimeSpan => from_typed::<chrono::TimeDelta>(encode::timespan),
        Shape::Json => from_typed::<Json>(Clone::clone),
        Shape::Opaque => panic!(
            "cannot generate an encoder for `{}`; register it with `ExtraCoders::with_coder`",
            info.name()
        ),
        Shape::Option(shape) => {
            let inner_info = (shape.inner)();
            let split = shape.split;
            if matches!(inner_info.shape(), Shape::Opaque) && !has_extra(ctx, &inner_info) {
                let name = inner_info.name();
                return Arc::new(move |value| match split(value) {
                    None => Json::Null,
                    Some(_) => panic!(
                        "cannot encode a value of `{}` without an extra coder",
                        name
                    ),
                });
            }
            let inner = encoder_for(&inner_info, ctx);
            Arc::new(move |value| match split(value) {
                Some(present) => inner(present),
                None => Json::Null,
            })
        }
        Shape::Seq(shape) => {
            let item = encoder_for(&(shape.item)(), ctx);
            let iter = shape.iter;
            Arc::new(move |value| encode::seq(iter(value).map(|element| item(element))))
        }
        Shape::Map(shape) => map_encoder(shape, ctx),
        Shape::Tuple(shape) => {
            let items: Vec<BoxedEncoder> = shape
                .items
                .iter()
                .map(|item| encoder_for(&item(), ctx))
                .collect();
            let get = shape.get;
            Arc::new(move |value| {
                encode::array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| item(get(value, i)))
                        .collect(),
                )
            })
        }
        Shape::Wrapper(shape) => {
            let inner = encoder_for(&(shape.inner)(), ctx);
            let peel = shape.peel;
            Arc::new(move |value| inner(peel(value)))
        }
        Shape::Record(shape) => named(ctx, info.name(), |ctx| record_encoder(shape, ctx)),
        Shape::Union(shape) => named(ctx, info.name(), |ctx| union_encoder(shape, ctx)),
        Shape::Enum(shape) => named(ctx, info.name(), |_| enum_encoder(shape)),
    }
}

fn has_extra(ctx: &EncodeCtx<'_>, info: &TypeInfo) -> bool {
    ctx.options
        .extras
        .as_ref()
        .map(|extras| extras.lookup(info.name()).is_some())
        .unwrap_or(false)
}

fn record_encoder(shape: &RecordShape, ctx: &mut EncodeCtx<'_>) -> BoxedEncoder {
    let mut fields = Vec::with_capacity(shape.fields.len());
    for field in &shape.fields {
        let field_info = (field.info)();
        let optional = matches!(field_info.shape(), Shape::Option(_));
        let key = ctx.options.case.convert(field.name);
        let enc = encoder_for(&field_info, ctx);
        fields.push((key, optional, field.get, enc));
    }
    let skip_null = ctx.options.skip_null_field;
    Arc::new(move |value| {
        let mut pairs = Vec::with_capacity(fields.len());
        for (key, optional, get, enc) in &fields {
            let encoded = enc(get(value));
            if skip_null && *optional && encoded.is_null() {
                continue;
            }
            pairs.push((key.clone(), encoded));
        }
        encode::object(pairs)
    })
}

fn union_encoder(shape: &UnionShape, ctx: &mut EncodeCtx<'_>) -> BoxedEncoder {
    #[allow(clippy::type_complexity)]
    let cases: Vec<(
        &'static str,
        Vec<BoxedEncoder>,
        for<'a> fn(&'a dyn Any) -> Option<Vec<&'a dyn Any>>,
    )> = shape
        .cases
        .iter()
        .map(|case| {
            (
                case.name,
                case.fields
                    .iter()
                    .map(|field| encoder_for(&field(), ctx))
                    .collect(),
                case.project,
            )
        })
        .collect();
    Arc::new(move |value| {
        for (name, field_encoders, project) in &cases {
            if let Some(fields) = project(value) {
                if field_encoders.is_empty() {
                    return encode::string(name);
                }
                let mut items = Vec::with_capacity(fields.len() + 1);
                items.push(encode::string(name));
                for (enc, field) in field_encoders.iter().zip(fields) {
                    items.push(enc(field));
                }
                return encode::array(items);
            }
        }
        panic!("value matched no case of its union descriptor");
    })
}

fn enum_encoder(shape: &EnumShape) -> BoxedEncoder {
    let width = shape.width;
    let to_int = shape.to_int;
    Arc::new(move |value| {
        let n = to_int(value);
        match width {
            IntWidth::I8 => encode::i8(n as i8),
            IntWidth::U8 => encode::u8(n as u8),
            IntWidth::I16 => encode::i16(n as i16),
            IntWidth::U16 => encode::u16(n as u16),
            IntWidth::I32 => encode::i32(n as i32),
            IntWidth::U32 => encode::u32(n as u32),
        }
    })
}

fn map_encoder(shape: &MapShape, ctx: &mut EncodeCtx<'_>) -> BoxedEncoder {
    let key_info = (shape.key)();
    let stringify: Option<fn(&dyn Any) -> String> = match key_info.shape() {
        Shape::String => Some(|key| concrete::<String>(key).clone()),
        Shape::Uuid => Some(|key| concrete::<uuid::Uuid>(key).to_string()),
        _ => None,
    };
    let key_enc = encoder_for(&key_info, ctx);
    let value_enc = encoder_for(&(shape.value)(), ctx);
    let iter = shape.iter;

    Arc::new(move |value| match &stringify {
        // Stringifiable keys become object fields, in map iteration order.
        Some(stringify) => encode::object(
            iter(value).map(|(key, item)| (stringify(key), value_enc(item))),
        ),
        // Everything else becomes an array of two element arrays.
        None => encode::seq(
            iter(value)
                .map(|(key, item)| encode::array(vec![key_enc(key), value_enc(item)])),
        ),
    })
}
