//! Raya Type Introspection
//!
//! Reports the shape of a type as plain strings: its names, fields,
//! constructors, methods, properties, members and implemented traits.
//!
//! Types opt in by implementing [`Describe`], usually through
//! [`describe!`]. Queries then run against any `&dyn Reflect`:
//!
//! ```ignore
//! use raya_introspect::{describe, get_public_static_fields, FieldDefinition};
//!
//! struct Counter { count: u32 }
//!
//! describe!(Counter, |b| b
//!     .field(FieldDefinition::new("count", "u32"))
//!     .field(FieldDefinition::new("VERSION", "&str").public().as_static()));
//!
//! let counter = Counter { count: 0 };
//! assert_eq!(get_public_static_fields(Some(&counter))?, vec!["VERSION"]);
//! ```
//!
//! Queries are pure and hold no state; [`TypeIntrospector`] only carries
//! the [`IntrospectConfig`] selecting the filter profile and vacant-slot
//! rendering. The free functions use the canonical configuration.

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod introspector;
pub mod reflect;

pub use builder::{
    ConstructorDefinition, FieldDefinition, MethodDefinition, ParameterDefinition,
    PropertyDefinition, TypeBuilder,
};
pub use config::{FilterProfile, IntrospectConfig, NullEntryPolicy};
pub use descriptor::{
    ConstructorDescriptor, FieldDescriptor, InterfaceDescriptor, Member, MethodDescriptor,
    ParameterDescriptor, PropertyDescriptor, TypeDescriptor,
};
pub use error::{ConfigError, IntrospectError, IntrospectResult};
pub use filter::{Binding, MemberFilter, Visibility};
pub use introspector::{
    get_assembly_qualified_name, get_constructors_data_details, get_full_type_name,
    get_interface_data_details, get_method_data_details, get_private_instance_fields,
    get_properties_data_details, get_public_static_fields, get_type_members_data_details,
    get_type_name, TypeIntrospector, NULL_ENTRY,
};
pub use reflect::{Describe, Reflect};
