//! Describing Types
//!
//! Rust has no runtime metadata, so a type opts into introspection by
//! implementing [`Describe`]: a `'static` [`TypeDescriptor`] built once on
//! first use. [`Reflect`] is the object-safe view of the same table, so a
//! `&dyn Reflect` reports the descriptor of its dynamic type.
//!
//! ## Usage
//!
//! ```ignore
//! struct Counter { count: u32 }
//!
//! describe!(Counter, |b| b
//!     .field(FieldDefinition::new("count", "u32"))
//!     .field(FieldDefinition::new("VERSION", "&str").public().as_static())
//!     .implements("core::fmt::Debug"));
//!
//! let counter = Counter { count: 0 };
//! let obj: &dyn Reflect = &counter;
//! assert_eq!(obj.type_descriptor()?.name(), "Counter");
//! ```
//!
//! The macro names the type after its Rust path and records the invoking
//! crate's name and version as the defining unit. Statics cannot be generic,
//! so generic types are described per instantiation (`describe!(Stack<i32>)`).

use std::any::Any;
use std::sync::LazyLock;

use crate::builder::{
    ConstructorDefinition, FieldDefinition, MethodDefinition, ParameterDefinition, TypeBuilder,
};
use crate::descriptor::TypeDescriptor;
use crate::error::IntrospectResult;

/// Static access to a type's descriptor table
pub trait Describe {
    /// The descriptor for `Self`
    ///
    /// Fails with `InvalidState` on every call if the table is inconsistent.
    fn describe() -> IntrospectResult<&'static TypeDescriptor>;
}

/// Object-safe access to the descriptor of a value's dynamic type
pub trait Reflect: Any {
    /// The descriptor for the concrete type behind `self`
    fn type_descriptor(&self) -> IntrospectResult<&'static TypeDescriptor>;
}

impl<T: Describe + Any> Reflect for T {
    fn type_descriptor(&self) -> IntrospectResult<&'static TypeDescriptor> {
        T::describe()
    }
}

/// Finish a static descriptor table.
///
/// An inconsistent table (duplicate members, occupied slots) is kept as its
/// error, so every later lookup of the type reports the same `InvalidState`.
#[doc(hidden)]
pub fn finish_table(builder: TypeBuilder, label: &str) -> IntrospectResult<TypeDescriptor> {
    let table = builder.build();
    match &table {
        Ok(_) => tracing::debug!(type_name = label, "built descriptor table"),
        Err(e) => tracing::warn!(type_name = label, error = %e, "invalid descriptor table"),
    }
    table
}

/// Borrow a finished static table.
#[doc(hidden)]
pub fn shared(
    table: &'static IntrospectResult<TypeDescriptor>,
) -> IntrospectResult<&'static TypeDescriptor> {
    table.as_ref().map_err(Clone::clone)
}

/// Implement [`Describe`] for a concrete type.
///
/// `describe!(Type)` declares identity only; `describe!(Type, |b| ...)`
/// receives a [`TypeBuilder`] pre-seeded with the type's names and returns
/// the finished builder.
#[macro_export]
macro_rules! describe {
    ($ty:ty) => {
        $crate::describe!($ty, |b| b);
    };
    ($ty:ty, |$b:ident| $body:expr) => {
        impl $crate::Describe for $ty {
            fn describe() -> $crate::IntrospectResult<&'static $crate::TypeDescriptor> {
                static DESCRIPTOR: ::std::sync::LazyLock<
                    $crate::IntrospectResult<$crate::TypeDescriptor>,
                > = ::std::sync::LazyLock::new(|| {
                    let $b = $crate::TypeBuilder::of::<$ty>()
                        .unit(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                    $crate::reflect::finish_table($body, stringify!($ty))
                });
                $crate::reflect::shared(&DESCRIPTOR)
            }
        }
    };
}

// ============================================================================
// Built-in descriptors
// ============================================================================

type Table = LazyLock<IntrospectResult<TypeDescriptor>>;

const VALUE_TRAITS: &[&str] = &[
    "core::clone::Clone",
    "core::marker::Copy",
    "core::fmt::Debug",
    "core::fmt::Display",
    "core::default::Default",
    "core::hash::Hash",
    "core::cmp::Eq",
    "core::cmp::Ord",
];

const FLOAT_TRAITS: &[&str] = &[
    "core::clone::Clone",
    "core::marker::Copy",
    "core::fmt::Debug",
    "core::fmt::Display",
    "core::default::Default",
    "core::cmp::PartialEq",
    "core::cmp::PartialOrd",
];

const STRING_TRAITS: &[&str] = &[
    "core::clone::Clone",
    "core::fmt::Debug",
    "core::fmt::Display",
    "core::default::Default",
    "core::hash::Hash",
    "core::cmp::Eq",
    "core::cmp::Ord",
];

fn primitive(name: &str, traits: &[&str]) -> TypeBuilder {
    traits.iter().fold(
        TypeBuilder::new(name)
            .full_name(format!("core::primitive::{}", name))
            .unit("core", ""),
        |b, t| b.implements(*t),
    )
}

fn constant(name: &str, type_name: &str) -> FieldDefinition {
    FieldDefinition::new(name, type_name)
        .public()
        .as_static()
}

fn number_table(name: &str, traits: &[&str]) -> TypeBuilder {
    primitive(name, traits)
        .field(constant("MIN", name))
        .field(constant("MAX", name))
        .method(MethodDefinition::new("to_string").public().returns("String"))
        .method(
            MethodDefinition::new("from_str_radix")
                .public()
                .as_static()
                .with_param(ParameterDefinition::new("src", "&str"))
                .with_param(ParameterDefinition::new("radix", "u32"))
                .returns(format!("Result<{}, ParseIntError>", name)),
        )
}

macro_rules! describe_integers {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> IntrospectResult<&'static TypeDescriptor> {
                    static DESCRIPTOR: Table = LazyLock::new(|| {
                        let table = number_table(stringify!($ty), VALUE_TRAITS)
                            .field(constant("BITS", "u32"));
                        finish_table(table, stringify!($ty))
                    });
                    shared(&DESCRIPTOR)
                }
            }
        )*
    };
}

macro_rules! describe_floats {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> IntrospectResult<&'static TypeDescriptor> {
                    static DESCRIPTOR: Table = LazyLock::new(|| {
                        let table = primitive(stringify!($ty), FLOAT_TRAITS)
                            .field(constant("MIN", stringify!($ty)))
                            .field(constant("MAX", stringify!($ty)))
                            .field(constant("EPSILON", stringify!($ty)))
                            .field(constant("NAN", stringify!($ty)))
                            .method(MethodDefinition::new("is_nan").public().returns("bool"))
                            .method(MethodDefinition::new("abs").public().returns(stringify!($ty)));
                        finish_table(table, stringify!($ty))
                    });
                    shared(&DESCRIPTOR)
                }
            }
        )*
    };
}

describe_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_floats!(f32, f64);

impl Describe for bool {
    fn describe() -> IntrospectResult<&'static TypeDescriptor> {
        static DESCRIPTOR: Table = LazyLock::new(|| {
            let table = primitive("bool", VALUE_TRAITS).method(
                MethodDefinition::new("then_some")
                    .public()
                    .with_param(ParameterDefinition::new("t", "T"))
                    .returns("Option<T>"),
            );
            finish_table(table, "bool")
        });
        shared(&DESCRIPTOR)
    }
}

impl Describe for char {
    fn describe() -> IntrospectResult<&'static TypeDescriptor> {
        static DESCRIPTOR: Table = LazyLock::new(|| {
            let table = primitive("char", VALUE_TRAITS)
                .field(constant("MAX", "char"))
                .field(constant("REPLACEMENT_CHARACTER", "char"))
                .method(MethodDefinition::new("is_alphabetic").public().returns("bool"))
                .method(MethodDefinition::new("len_utf8").public().returns("usize"));
            finish_table(table, "char")
        });
        shared(&DESCRIPTOR)
    }
}

impl Describe for String {
    fn describe() -> IntrospectResult<&'static TypeDescriptor> {
        static DESCRIPTOR: Table = LazyLock::new(|| {
            let table = STRING_TRAITS
                .iter()
                .fold(TypeBuilder::of::<String>().unit("alloc", ""), |b, t| {
                    b.implements(*t)
                })
                .field(FieldDefinition::new("vec", "Vec<u8>"))
                .constructor(ConstructorDefinition::new())
                .constructor(
                    ConstructorDefinition::named("with_capacity")
                        .with_param(ParameterDefinition::new("capacity", "usize")),
                )
                .method(MethodDefinition::new("len").public().returns("usize"))
                .method(MethodDefinition::new("is_empty").public().returns("bool"))
                .method(MethodDefinition::new("as_str").public().returns("&str"))
                .method(
                    MethodDefinition::new("push_str")
                        .public()
                        .with_param(ParameterDefinition::new("string", "&str")),
                );
            finish_table(table, "String")
        });
        shared(&DESCRIPTOR)
    }
}
