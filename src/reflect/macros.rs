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

/// Implements [`Reflect`](crate::reflect::Reflect) for a struct with named
/// fields, listing the fields in declaration order.
///
/// ```
/// use json_codec::reflect_record;
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// reflect_record! {
///     Point { x: f64, y: f64 }
/// }
///
/// let options = json_codec::AutoOptions::default();
/// let json = json_codec::auto::to_string(0, &Point { x: 1.5, y: -2.0 }, &options);
/// assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ident { $( $field:ident : $fty:ty ),* $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                fn construct(
                    fields: ::std::vec::Vec<::std::boxed::Box<dyn ::std::any::Any>>,
                ) -> ::std::boxed::Box<dyn ::std::any::Any> {
                    #[allow(unused_mut, unused_variables)]
                    let mut fields = fields.into_iter();
                    ::std::boxed::Box::new($ty {
                        $(
                            $field: *$crate::reflect::unbox::<$fty>(
                                fields.next().expect("record arity mismatch"),
                            )
                        ),*
                    })
                }
                $crate::reflect::TypeInfo::new(
                    ::std::any::type_name::<$ty>(),
                    $crate::reflect::Shape::Record($crate::reflect::RecordShape::new(
                        ::std::vec![
                            $(
                                {
                                    fn get(
                                        value: &dyn ::std::any::Any,
                                    ) -> &dyn ::std::any::Any {
                                        &$crate::reflect::concrete::<$ty>(value).$field
                                    }
                                    $crate::reflect::FieldInfo::new(
                                        stringify!($field),
                                        $crate::reflect::TypeInfo::of::<$fty>,
                                        get,
                                    )
                                }
                            ),*
                        ],
                        construct,
                    )),
                )
            }
        }
    };
}

/// Implements [`Reflect`](crate::reflect::Reflect) for a tagged union (an
/// enum with unit and tuple variants). Payload fields are given binding
/// names so the descriptor can take a value apart.
///
/// ```
/// use json_codec::reflect_union;
///
/// #[derive(Debug, PartialEq)]
/// enum Tree {
///     Leaf,
///     Node(Box<Tree>, Box<Tree>),
/// }
///
/// reflect_union! {
///     Tree {
///         Leaf,
///         Node(left: Box<Tree>, right: Box<Tree>),
///     }
/// }
/// ```
#[macro_export]
macro_rules! reflect_union {
    ($ty:ident { $( $variant:ident $( ( $( $fname:ident : $fty:ty ),+ $(,)? ) )? ),+ $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                $crate::reflect::TypeInfo::new(
                    ::std::any::type_name::<$ty>(),
                    $crate::reflect::Shape::Union($crate::reflect::UnionShape::new(::std::vec![
                        $(
                            {
                                fn construct(
                                    args: ::std::vec::Vec<::std::boxed::Box<dyn ::std::any::Any>>,
                                ) -> ::std::boxed::Box<dyn ::std::any::Any> {
                                    #[allow(unused_mut, unused_variables)]
                                    let mut args = args.into_iter();
                                    ::std::boxed::Box::new(
                                        $ty::$variant $( ( $(
                                            *$crate::reflect::unbox::<$fty>(
                                                args.next().expect("union case arity mismatch"),
                                            )
                                        ),+ ) )?
                                    )
                                }
                                fn project(
                                    value: &dyn ::std::any::Any,
                                ) -> ::std::option::Option<::std::vec::Vec<&dyn ::std::any::Any>>
                                {
                                    match $crate::reflect::concrete::<$ty>(value) {
                                        $ty::$variant $( ( $( $fname ),+ ) )? => {
                                            ::std::option::Option::Some(::std::vec![
                                                $( $( $fname as &dyn ::std::any::Any ),+ )?
                                            ])
                                        }
                                        #[allow(unreachable_patterns)]
                                        _ => ::std::option::Option::None,
                                    }
                                }
                                $crate::reflect::CaseInfo::new(
                                    stringify!($variant),
                                    ::std::vec![ $( $( $crate::reflect::TypeInfo::of::<$fty> ),+ )? ],
                                    construct,
                                    project,
                                )
                            }
                        ),+
                    ])),
                )
            }
        }
    };
}

/// Implements [`Reflect`](crate::reflect::Reflect) for a type the generator
/// cannot take apart. An automatic coder touching the type only generates
/// when an extra coder registry supplies its encoder and decoder.
#[macro_export]
macro_rules! reflect_opaque {
    ($ty:ident) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                $crate::reflect::TypeInfo::new(
                    ::std::any::type_name::<$ty>(),
                    $crate::reflect::Shape::Opaque,
                )
            }
        }
    };
}

/// Implements [`Reflect`](crate::reflect::Reflect) for a C-like enumeration
/// with the given underlying integer width. The enum must be `Copy`.
///
/// ```
/// use json_codec::reflect_enum;
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Language {
///     English = 0,
///     Mandarin = 1,
///     Spanish = 2,
/// }
///
/// reflect_enum! {
///     Language as i32 { English, Mandarin, Spanish }
/// }
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ident as $repr:ty { $( $variant:ident ),+ $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                fn to_int(value: &dyn ::std::any::Any) -> i64 {
                    (*$crate::reflect::concrete::<$ty>(value)) as i64
                }
                fn from_int(n: i64) -> ::std::boxed::Box<dyn ::std::any::Any> {
                    match n {
                        $( x if x == ($ty::$variant) as i64 => {
                            ::std::boxed::Box::new($ty::$variant)
                        } )+
                        _ => ::std::panic!(
                            "value is not a declared member of the enumeration"
                        ),
                    }
                }
                $crate::reflect::TypeInfo::new(
                    ::std::any::type_name::<$ty>(),
                    $crate::reflect::Shape::Enum($crate::reflect::EnumShape::new(
                        <$repr as $crate::reflect::EnumRepr>::WIDTH,
                        ::std::vec![$( ($ty::$variant) as i64 ),+],
                        to_int,
                        from_int,
                    )),
                )
            }
        }
    };
}
