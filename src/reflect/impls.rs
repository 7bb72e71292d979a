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

//! [`Reflect`] implementations for leaf types and standard containers.

use super::{
    concrete, unbox, MapShape, OptionShape, Reflect, SeqShape, Shape, TupleShape, TypeInfo,
    WrapperShape,
};
use crate::value::Json;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use std::any::{type_name, Any};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

macro_rules! leaf_reflect {
    ($ty:ty, $shape:expr) => {
        impl Reflect for $ty {
            fn type_info() -> TypeInfo {
                TypeInfo::new(type_name::<$ty>(), $shape)
            }
        }
    };
}

leaf_reflect!((), Shape::Unit);
leaf_reflect!(bool, Shape::Bool);
leaf_reflect!(char, Shape::Char);
leaf_reflect!(String, Shape::String);
leaf_reflect!(i8, Shape::Int8);
leaf_reflect!(u8, Shape::UInt8);
leaf_reflect!(i16, Shape::Int16);
leaf_reflect!(u16, Shape::UInt16);
leaf_reflect!(i32, Shape::Int32);
leaf_reflect!(u32, Shape::UInt32);
leaf_reflect!(i64, Shape::Int64);
leaf_reflect!(u64, Shape::UInt64);
leaf_reflect!(f32, Shape::Float32);
leaf_reflect!(f64, Shape::Float64);
leaf_reflect!(BigInt, Shape::BigInt);
leaf_reflect!(Decimal, Shape::Decimal);
leaf_reflect!(uuid::Uuid, Shape::Uuid);
leaf_reflect!(NaiveDateTime, Shape::DateTime);
leaf_reflect!(DateTime<Utc>, Shape::DateTimeUtc);
leaf_reflect!(DateTime<FixedOffset>, Shape::DateTimeOffset);
leaf_reflect!(TimeDelta, Shape::TimeSpan);
leaf_reflect!(Json, Shape::Json);

fn option_split<'a, T: Reflect>(value: &'a dyn Any) -> Option<&'a dyn Any> {
    concrete::<Option<T>>(value)
        .as_ref()
        .map(|inner| inner as &dyn Any)
}

fn option_some<T: Reflect>(inner: Box<dyn Any>) -> Box<dyn Any> {
    Box::new(Some(*unbox::<T>(inner)))
}

fn option_none<T: Reflect>() -> Box<dyn Any> {
    Box::new(None::<T>)
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            type_name::<Self>(),
            Shape::Option(OptionShape {
                inner: TypeInfo::of::<T>,
                split: option_split::<T>,
                some: option_some::<T>,
                none: option_none::<T>,
            }),
        )
    }
}

fn vec_iter<'a, T: Reflect>(value: &'a dyn Any) -> Box<dyn Iterator<Item = &'a dyn Any> + 'a> {
    Box::new(concrete::<Vec<T>>(value).iter().map(|item| item as &dyn Any))
}

fn vec_collect<T: Reflect>(items: Vec<Box<dyn Any>>) -> Box<dyn Any> {
    Box::new(
        items
            .into_iter()
            .map(|item| *unbox::<T>(item))
            .collect::<Vec<T>>(),
    )
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            type_name::<Self>(),
            Shape::Seq(SeqShape {
                item: TypeInfo::of::<T>,
                iter: vec_iter::<T>,
                collect: vec_collect::<T>,
            }),
        )
    }
}

fn btree_set_iter<'a, T: Reflect + Ord>(
    value: &'a dyn Any,
) -> Box<dyn Iterator<Item = &'a dyn Any> + 'a> {
    Box::new(
        concrete::<BTreeSet<T>>(value)
            .iter()
            .map(|item| item as &dyn Any),
    )
}

fn btree_set_collect<T: Reflect + Ord>(items: Vec<Box<dyn Any>>) -> Box<dyn Any> {
    Box::new(
        items
            .into_iter()
            .map(|item| *unbox::<T>(item))
            .collect::<BTreeSet<T>>(),
    )
}

impl<T: Reflect + Ord> Reflect for BTreeSet<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            type_name::<Self>(),
            Shape::Seq(SeqShape {
                item: TypeInfo::of::<T>,
                iter: btree_set_iter::<T>,
                collect: btree_set_collect::<T>,
            }),
        )
    }
}

fn hash_set_iter<'a, T: Reflect + Eq + Hash>(
    value: &'a dyn Any,
) -> Box<dyn Iterator<Item = &'a dyn Any> + 'a> {
    Box::new(
        concrete::<HashSet<T>>(value)
            .iter()
            .map(|item| item as &dyn Any),
    )
}

fn hash_set_collect<T: Reflect + Eq + Hash>(items: Vec<Box<dyn Any>>) -> Box<dyn Any> {
    Box::new(
        items
            .into_iter()
            .map(|item| *unbox::<T>(item))
            .collect::<HashSet<T>>(),
    )
}

impl<T: Reflect + Eq + Hash> Reflect for HashSet<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            type_name::<Self>(),
            Shape::Seq(SeqShape {
                item: TypeInfo::of::<T>,
                iter: hash_set_iter::<T>,
                collect: hash_set_collect::<T>,
            }),
        )
    }
}

#[allow(clippy::type_complexity)]
fn btree_map_iter<'a, K: Reflect + Ord, V: Reflect>(
    value: &'a dyn Any,
) -> Box<dyn Iterator<Item = (&'a dyn Any, &'a dyn Any)> + 'a> {
    Box::new(
        concrete::<BTreeMap<K, V>>(value)
            .iter()
            .map(|(key, value)| (key as &dyn Any, value as &dyn Any)),
    )
}

fn btree_map_collect<K: Reflect + Ord, V: Reflect>(
    entries: Vec<(Box<dyn Any>, Box<dyn Any>)>,
) -> Box<dyn Any> {
    Box::new(
        entries
            .into_iter()
            .map(|(key, value)| (*unbox::<K>(key), *unbox::<V>(value)))
            .collect::<BTreeMap<K, V>>(),
    )
}

impl<K: Reflect + Ord, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            type_name::<Self>(),
            Shape::Map(MapShape {
                key: TypeInfo::of::<K>,
                value: TypeInfo::of::<V>,
                iter: btree_map_iter::<K, V>,
                collect: btree_map_collect::<K, V>,
            }),
        )
    }
}

#[allow(clippy::type_complexity)]
fn hash_map_iter<'a, K: Reflect + Eq + Hash, V: Reflect>(
    value: &'a dyn Any,
) -> Box<dyn Iterator<Item = (&'a dyn Any, &'a dyn Any)> + 'a> {
    Box::new(
        concrete::<HashMap<K, V>>(value)
            .iter()
            .map(|(key, value)| (key as &dyn Any, value as &dyn Any)),
    )
}

fn hash_map_collect<K: Reflect + Eq + Hash, V: Reflect>(
    entries: Vec<(Box<dyn Any>, Box<dyn Any>)>,
) -> Box<dyn Any> {
    Box::new(
        entries
            .into_iter()
            .map(|(key, value)| (*unbox::<K>(key), *unbox::<V>(value)))
            .collect::<HashMap<K, V>>(),
    )
}

impl<K: Reflect + Eq + Hash, V: Reflect> Reflect for HashMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new(
            type_name::<Self>(),
            Shape::Map(MapShape {
                key: TypeInfo::of::<K>,
                value: TypeInfo::of::<V>,
                iter: hash_map_iter::<K, V>,
                collect: hash_map_collect::<K, V>,
            }),
        )
    }
}

macro_rules! wrapper_reflect {
    ($outer:ident, $peel:ident, $wrap:ident) => {
        fn $peel<'a, T: Reflect>(value: &'a dyn Any) -> &'a dyn Any {
            concrete::<$outer<T>>(value).as_ref() as &dyn Any
        }

        fn $wrap<T: Reflect>(inner: Box<dyn Any>) -> Box<dyn Any> {
            Box::new($outer::new(*unbox::<T>(inner)))
        }

        impl<T: Reflect> Reflect for $outer<T> {
            fn type_info() -> TypeInfo {
                TypeInfo::new(
                    type_name::<Self>(),
                    Shape::Wrapper(WrapperShape {
                        inner: TypeInfo::of::<T>,
                        peel: $peel::<T>,
                        wrap: $wrap::<T>,
                    }),
                )
            }
        }
    };
}

wrapper_reflect!(Box, box_peel, box_wrap);
wrapper_reflect!(Arc, arc_peel, arc_wrap);
wrapper_reflect!(Rc, rc_peel, rc_wrap);

macro_rules! tuple_get {
    ($value:expr, $index:expr, $( $ty:ident => $idx:tt ),+) => {{
        let tuple = concrete::<($($ty,)+)>($value);
        match $index {
            $($idx => &tuple.$idx as &dyn Any,)+
            out => panic!("tuple index {} out of range", out),
        }
    }};
}

macro_rules! tuple_reflect {
    ($get:ident, $construct:ident, $( $ty:ident => $idx:tt ),+) => {
        fn $get<'a, $($ty: Reflect),+>(value: &'a dyn Any, index: usize) -> &'a dyn Any {
            tuple_get!(value, index, $($ty => $idx),+)
        }

        fn $construct<$($ty: Reflect),+>(items: Vec<Box<dyn Any>>) -> Box<dyn Any> {
            let mut items = items.into_iter();
            Box::new((
                $( *unbox::<$ty>(items.next().expect("tuple arity mismatch")), )+
            ))
        }

        impl<$($ty: Reflect),+> Reflect for ($($ty,)+) {
            fn type_info() -> TypeInfo {
                TypeInfo::new(
                    type_name::<Self>(),
                    Shape::Tuple(TupleShape {
                        items: vec![$(TypeInfo::of::<$ty>),+],
                        get: $get::<$($ty),+>,
                        construct: $construct::<$($ty),+>,
                    }),
                )
            }
        }
    };
}

tuple_reflect!(tuple2_get, tuple2_construct, T1 => 0, T2 => 1);
tuple_reflect!(tuple3_get, tuple3_construct, T1 => 0, T2 => 1, T3 => 2);
tuple_reflect!(tuple4_get, tuple4_construct, T1 => 0, T2 => 1, T3 => 2, T4 => 3);
tuple_reflect!(tuple5_get, tuple5_construct, T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4);
tuple_reflect!(tuple6_get, tuple6_construct, T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5);
tuple_reflect!(tuple7_get, tuple7_construct, T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5, T7 => 6);
tuple_reflect!(tuple8_get, tuple8_construct, T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5, T7 => 6, T8 => 7);
