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

//! Runtime type descriptors for the automatic coder generator.
//!
//! A [`Reflect`] type describes its own structure as a [`TypeInfo`]: a stable
//! name plus a [`Shape`] covering every structural kind the generator
//! dispatches on. Shapes for containers and user types carry function
//! pointers that project a type erased value into its parts and rebuild it
//! from them, standing in for the reflection surface a managed runtime would
//! provide. Implementations for records, tagged unions and enumerations are
//! written with the [`reflect_record!`](crate::reflect_record),
//! [`reflect_union!`](crate::reflect_union) and
//! [`reflect_enum!`](crate::reflect_enum) macros.

mod impls;
mod macros;

use std::any::Any;

/// A type that carries a runtime descriptor of its own structure.
pub trait Reflect: Any + Sized {
    fn type_info() -> TypeInfo;
}

/// The descriptor of a type: a process-stable name and a structural shape.
pub struct TypeInfo {
    name: &'static str,
    shape: Shape,
}

impl TypeInfo {
    pub fn new(name: &'static str, shape: Shape) -> Self {
        TypeInfo { name, shape }
    }

    /// The descriptor of `T`.
    pub fn of<T: Reflect>() -> TypeInfo {
        T::type_info()
    }

    /// The name keying caches and override tables for this type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// The structural kind of a type, with the glue needed to take values of the
/// type apart and put them back together behind `dyn Any`.
pub enum Shape {
    Unit,
    Bool,
    Char,
    String,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    BigInt,
    Decimal,
    Uuid,
    /// A date without an offset (`chrono::NaiveDateTime`).
    DateTime,
    /// A UTC date (`chrono::DateTime<Utc>`).
    DateTimeUtc,
    /// A date with an explicit offset (`chrono::DateTime<FixedOffset>`).
    DateTimeOffset,
    /// A duration (`chrono::TimeDelta`).
    TimeSpan,
    /// An untyped JSON value, passed through verbatim.
    Json,
    /// A type the generator cannot take apart. Coders for it must come from
    /// an extra coder registry; generation fails otherwise, except under
    /// [`Shape::Option`] where the failure is deferred to decode time.
    Opaque,
    Option(OptionShape),
    /// A homogeneous sequence: `Vec`, `BTreeSet` or `HashSet`.
    Seq(SeqShape),
    Map(MapShape),
    Tuple(TupleShape),
    /// A transparent wrapper: `Box`, `Arc` or `Rc`. Recursive types go
    /// through one of these.
    Wrapper(WrapperShape),
    Record(RecordShape),
    Union(UnionShape),
    Enum(EnumShape),
}

/// Recover the concrete type behind a reflected value. A mismatch means a
/// hand-written [`Reflect`] implementation disagrees with its own shape,
/// which is a programmer error.
#[doc(hidden)]
pub fn concrete<T: Any>(value: &dyn Any) -> &T {
    match value.downcast_ref::<T>() {
        Some(typed) => typed,
        None => panic!(
            "reflected value is not a `{}`; its descriptor is inconsistent",
            std::any::type_name::<T>()
        ),
    }
}

/// As [`concrete`], for owned values.
#[doc(hidden)]
pub fn unbox<T: Any>(value: Box<dyn Any>) -> Box<T> {
    match value.downcast::<T>() {
        Ok(typed) => typed,
        Err(_) => panic!(
            "reflected value is not a `{}`; its descriptor is inconsistent",
            std::any::type_name::<T>()
        ),
    }
}

pub struct OptionShape {
    pub(crate) inner: fn() -> TypeInfo,
    pub(crate) split: for<'a> fn(&'a dyn Any) -> Option<&'a dyn Any>,
    pub(crate) some: fn(Box<dyn Any>) -> Box<dyn Any>,
    pub(crate) none: fn() -> Box<dyn Any>,
}

pub struct SeqShape {
    pub(crate) item: fn() -> TypeInfo,
    pub(crate) iter: for<'a> fn(&'a dyn Any) -> Box<dyn Iterator<Item = &'a dyn Any> + 'a>,
    pub(crate) collect: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>,
}

pub struct MapShape {
    pub(crate) key: fn() -> TypeInfo,
    pub(crate) value: fn() -> TypeInfo,
    #[allow(clippy::type_complexity)]
    pub(crate) iter:
        for<'a> fn(&'a dyn Any) -> Box<dyn Iterator<Item = (&'a dyn Any, &'a dyn Any)> + 'a>,
    #[allow(clippy::type_complexity)]
    pub(crate) collect: fn(Vec<(Box<dyn Any>, Box<dyn Any>)>) -> Box<dyn Any>,
}

pub struct TupleShape {
    pub(crate) items: Vec<fn() -> TypeInfo>,
    pub(crate) get: for<'a> fn(&'a dyn Any, usize) -> &'a dyn Any,
    pub(crate) construct: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>,
}

pub struct WrapperShape {
    pub(crate) inner: fn() -> TypeInfo,
    pub(crate) peel: for<'a> fn(&'a dyn Any) -> &'a dyn Any,
    pub(crate) wrap: fn(Box<dyn Any>) -> Box<dyn Any>,
}

/// One field of a reflected record, in declaration order.
pub struct FieldInfo {
    pub(crate) name: &'static str,
    pub(crate) info: fn() -> TypeInfo,
    pub(crate) get: for<'a> fn(&'a dyn Any) -> &'a dyn Any,
}

impl FieldInfo {
    pub fn new(
        name: &'static str,
        info: fn() -> TypeInfo,
        get: for<'a> fn(&'a dyn Any) -> &'a dyn Any,
    ) -> Self {
        FieldInfo { name, info, get }
    }
}

pub struct RecordShape {
    pub(crate) fields: Vec<FieldInfo>,
    pub(crate) construct: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>,
}

impl RecordShape {
    pub fn new(fields: Vec<FieldInfo>, construct: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>) -> Self {
        RecordShape { fields, construct }
    }
}

/// One case of a reflected tagged union.
pub struct CaseInfo {
    pub(crate) name: &'static str,
    pub(crate) fields: Vec<fn() -> TypeInfo>,
    pub(crate) construct: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>,
    /// The payload fields of the value when it is this case, `None` when it
    /// is another case.
    #[allow(clippy::type_complexity)]
    pub(crate) project: for<'a> fn(&'a dyn Any) -> Option<Vec<&'a dyn Any>>,
}

impl CaseInfo {
    pub fn new(
        name: &'static str,
        fields: Vec<fn() -> TypeInfo>,
        construct: fn(Vec<Box<dyn Any>>) -> Box<dyn Any>,
        project: for<'a> fn(&'a dyn Any) -> Option<Vec<&'a dyn Any>>,
    ) -> Self {
        CaseInfo {
            name,
            fields,
            construct,
            project,
        }
    }
}

pub struct UnionShape {
    pub(crate) cases: Vec<CaseInfo>,
}

impl UnionShape {
    pub fn new(cases: Vec<CaseInfo>) -> Self {
        UnionShape { cases }
    }
}

/// The integer widths a reflected enumeration can be represented by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
}

/// Maps an underlying representation type to its [`IntWidth`]; used by the
/// [`reflect_enum!`](crate::reflect_enum) macro.
pub trait EnumRepr {
    const WIDTH: IntWidth;
}

macro_rules! enum_repr {
    ($ty:ty, $width:expr) => {
        impl EnumRepr for $ty {
            const WIDTH: IntWidth = $width;
        }
    };
}

enum_repr!(i8, IntWidth::I8);
enum_repr!(u8, IntWidth::U8);
enum_repr!(i16, IntWidth::I16);
enum_repr!(u16, IntWidth::U16);
enum_repr!(i32, IntWidth::I32);
enum_repr!(u32, IntWidth::U32);

pub struct EnumShape {
    pub(crate) width: IntWidth,
    pub(crate) values: Vec<i64>,
    pub(crate) to_int: fn(&dyn Any) -> i64,
    /// Only called with a member of `values`.
    pub(crate) from_int: fn(i64) -> Box<dyn Any>,
}

impl EnumShape {
    pub fn new(
        width: IntWidth,
        values: Vec<i64>,
        to_int: fn(&dyn Any) -> i64,
        from_int: fn(i64) -> Box<dyn Any>,
    ) -> Self {
        EnumShape {
            width,
            values,
            to_int,
            from_int,
        }
    }
}
