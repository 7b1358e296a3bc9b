//! Type and member descriptors
//!
//! A [`TypeDescriptor`] is the per-type metadata table every query reads. It
//! is built once through [`TypeBuilder`](crate::TypeBuilder) and never
//! mutated afterwards.
//!
//! Fields, methods and properties live in index-addressed slots. A slot can
//! be vacant when an entry was declared at a later index without the ones
//! before it; vacant slots carry no modifiers, so every filtered enumeration
//! of their category yields them as `None`.
//!
//! The `Display` impls here are the canonical signature rendering:
//!
//! | Descriptor  | Rendering                              |
//! |-------------|----------------------------------------|
//! | field       | `count: u32`, `static VERSION: &str`   |
//! | method      | `fn compute(&self, i32) -> i32`        |
//! | constructor | `Counter::new(u32)`                    |
//! | property    | `label: String { get; set; }`          |
//! | interface   | `core::cmp::Ord`                       |

use std::fmt;

use rustc_hash::FxHashMap;

use crate::filter::{Binding, MemberFilter, Visibility};

/// Parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared type name
    pub type_name: String,
}

/// Named storage slot declared on a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Declared visibility
    pub visibility: Visibility,
    /// Instance field or associated static
    pub binding: Binding,
}

/// Callable operation declared on a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Parameters, receiver excluded
    pub parameters: Vec<ParameterDescriptor>,
    /// Return type name, `None` for unit
    pub return_type: Option<String>,
    /// Declared visibility
    pub visibility: Visibility,
    /// Method with receiver or associated function
    pub binding: Binding,
    /// Whether the method is `async`
    pub is_async: bool,
}

/// Initializer declared on a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDescriptor {
    /// Constructor name, `new` unless declared otherwise
    pub name: String,
    /// Simple name of the type being constructed
    pub declaring_type: String,
    /// Parameters
    pub parameters: Vec<ParameterDescriptor>,
    /// Declared visibility
    pub visibility: Visibility,
    /// `Static` for type-level initializers
    pub binding: Binding,
}

/// Named accessor pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Has a getter
    pub has_getter: bool,
    /// Has a setter
    pub has_setter: bool,
    /// Declared visibility
    pub visibility: Visibility,
    /// Instance or static property
    pub binding: Binding,
}

/// Trait implemented by a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    /// Fully-qualified trait path
    pub qualified_name: String,
}

/// Any declared member, borrowed from its [`TypeDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member<'a> {
    /// A method
    Method(&'a MethodDescriptor),
    /// A constructor
    Constructor(&'a ConstructorDescriptor),
    /// A property
    Property(&'a PropertyDescriptor),
    /// A field
    Field(&'a FieldDescriptor),
}

/// Runtime-queryable description of a type
#[derive(Debug, Clone, Default)]
pub struct TypeDescriptor {
    pub(crate) name: String,
    pub(crate) full_name: Option<String>,
    pub(crate) qualified_name: Option<String>,
    pub(crate) fields: Vec<Option<FieldDescriptor>>,
    pub(crate) methods: Vec<Option<MethodDescriptor>>,
    pub(crate) properties: Vec<Option<PropertyDescriptor>>,
    pub(crate) constructors: Vec<ConstructorDescriptor>,
    pub(crate) interfaces: Vec<InterfaceDescriptor>,
    pub(crate) field_indices: FxHashMap<String, usize>,
}

impl TypeDescriptor {
    /// Simple type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module-qualified type name, if the type has one
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Qualified identifier including the defining unit, if the type has one
    pub fn qualified_name(&self) -> Option<&str> {
        self.qualified_name.as_deref()
    }

    /// Fields passing `filter`, in slot order; vacant slots yield `None`
    pub fn fields(
        &self,
        filter: MemberFilter,
    ) -> impl Iterator<Item = Option<&FieldDescriptor>> + '_ {
        self.fields.iter().filter_map(move |slot| match slot {
            None => Some(None),
            Some(f) if filter.matches(f.visibility, f.binding) => Some(Some(f)),
            Some(_) => None,
        })
    }

    /// Methods passing `filter`, in slot order; vacant slots yield `None`
    pub fn methods(
        &self,
        filter: MemberFilter,
    ) -> impl Iterator<Item = Option<&MethodDescriptor>> + '_ {
        self.methods.iter().filter_map(move |slot| match slot {
            None => Some(None),
            Some(m) if filter.matches(m.visibility, m.binding) => Some(Some(m)),
            Some(_) => None,
        })
    }

    /// Properties passing `filter`, in slot order; vacant slots yield `None`
    pub fn properties(
        &self,
        filter: MemberFilter,
    ) -> impl Iterator<Item = Option<&PropertyDescriptor>> + '_ {
        self.properties.iter().filter_map(move |slot| match slot {
            None => Some(None),
            Some(p) if filter.matches(p.visibility, p.binding) => Some(Some(p)),
            Some(_) => None,
        })
    }

    /// Constructors passing `filter`, in declaration order
    pub fn constructors(
        &self,
        filter: MemberFilter,
    ) -> impl Iterator<Item = &ConstructorDescriptor> + '_ {
        self.constructors
            .iter()
            .filter(move |c| filter.matches(c.visibility, c.binding))
    }

    /// Implemented traits, in declaration order
    pub fn interfaces(&self) -> &[InterfaceDescriptor] {
        &self.interfaces
    }

    /// All members passing `filter`: methods, constructors, properties,
    /// then fields
    pub fn members(&self, filter: MemberFilter) -> Vec<Option<Member<'_>>> {
        let mut members = Vec::new();
        members.extend(self.methods(filter).map(|m| m.map(Member::Method)));
        members.extend(self.constructors(filter).map(|c| Some(Member::Constructor(c))));
        members.extend(self.properties(filter).map(|p| p.map(Member::Property)));
        members.extend(self.fields(filter).map(|f| f.map(Member::Field)));
        members
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        let index = *self.field_indices.get(name)?;
        self.fields.get(index)?.as_ref()
    }

    /// Check whether the type declares the given trait
    pub fn implements(&self, qualified_name: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.qualified_name == qualified_name)
    }
}

// ============================================================================
// Canonical rendering
// ============================================================================

fn write_params(f: &mut fmt::Formatter<'_>, params: &[ParameterDescriptor]) -> fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&param.type_name)?;
    }
    Ok(())
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.binding == Binding::Static {
            f.write_str("static ")?;
        }
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_async {
            f.write_str("async ")?;
        }
        write!(f, "fn {}(", self.name)?;
        if self.binding == Binding::Instance {
            f.write_str("&self")?;
            if !self.parameters.is_empty() {
                f.write_str(", ")?;
            }
        }
        write_params(f, &self.parameters)?;
        f.write_str(")")?;
        if let Some(ret) = &self.return_type {
            write!(f, " -> {}", ret)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.binding == Binding::Static {
            f.write_str("static ")?;
        }
        write!(f, "{}::{}(", self.declaring_type, self.name)?;
        write_params(f, &self.parameters)?;
        f.write_str(")")
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.binding == Binding::Static {
            f.write_str("static ")?;
        }
        write!(f, "{}: {} {{", self.name, self.type_name)?;
        if self.has_getter {
            f.write_str(" get;")?;
        }
        if self.has_setter {
            f.write_str(" set;")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

impl fmt::Display for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Method(m) => fmt::Display::fmt(m, f),
            Member::Constructor(c) => fmt::Display::fmt(c, f),
            Member::Property(p) => fmt::Display::fmt(p, f),
            Member::Field(field) => fmt::Display::fmt(field, f),
        }
    }
}
