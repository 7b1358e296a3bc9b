//! Descriptor Builder
//!
//! Assembles a [`TypeDescriptor`] from member definitions. Every
//! [`Describe`](crate::Describe) table is produced here, usually through the
//! [`describe!`](crate::describe) macro.
//!
//! ```ignore
//! let descriptor = TypeBuilder::of::<Counter>()
//!     .unit("my-crate", "0.1.0")
//!     .field(FieldDefinition::new("count", "u32"))
//!     .field(FieldDefinition::new("VERSION", "&str").public().as_static())
//!     .method(
//!         MethodDefinition::new("compute")
//!             .public()
//!             .with_param(ParameterDefinition::new("value", "i32"))
//!             .returns("i32"),
//!     )
//!     .implements("core::fmt::Debug")
//!     .build()?;
//! ```
//!
//! Definitions default to private instance members. Entries placed with the
//! `*_at` variants occupy an explicit slot; skipped slots stay vacant.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::descriptor::{
    ConstructorDescriptor, FieldDescriptor, InterfaceDescriptor, MethodDescriptor,
    ParameterDescriptor, PropertyDescriptor, TypeDescriptor,
};
use crate::error::{IntrospectError, IntrospectResult};
use crate::filter::{Binding, Visibility};

/// Definition for a field
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Whether this is a static field
    pub is_static: bool,
}

impl FieldDefinition {
    /// Create a private instance field
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility: Visibility::Private,
            is_static: false,
        }
    }

    /// Mark as public
    pub fn public(mut self) -> Self {
        self.visibility = Visibility::Public;
        self
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static field
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    fn into_descriptor(self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name,
            type_name: self.type_name,
            visibility: self.visibility,
            binding: binding_of(self.is_static),
        }
    }
}

/// Definition for a method
#[derive(Debug, Clone)]
pub struct MethodDefinition {
    /// Method name
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Whether this is an associated function (no receiver)
    pub is_static: bool,
    /// Whether this is an async method
    pub is_async: bool,
    /// Return type name, `None` for unit
    pub return_type: Option<String>,
    /// Parameters, receiver excluded
    pub parameters: Vec<ParameterDefinition>,
}

impl MethodDefinition {
    /// Create a private instance method returning unit
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Private,
            is_static: false,
            is_async: false,
            return_type: None,
            parameters: Vec::new(),
        }
    }

    /// Mark as public
    pub fn public(mut self) -> Self {
        self.visibility = Visibility::Public;
        self
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static method
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as async method
    pub fn as_async(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Set return type
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Add a parameter
    pub fn with_param(mut self, param: ParameterDefinition) -> Self {
        self.parameters.push(param);
        self
    }

    fn into_descriptor(self) -> MethodDescriptor {
        MethodDescriptor {
            name: self.name,
            parameters: self.parameters.into_iter().map(Into::into).collect(),
            return_type: self.return_type,
            visibility: self.visibility,
            binding: binding_of(self.is_static),
            is_async: self.is_async,
        }
    }
}

/// Parameter definition for method and constructor signatures
#[derive(Debug, Clone)]
pub struct ParameterDefinition {
    /// Parameter name
    pub name: String,
    /// Declared type name
    pub type_name: String,
}

impl ParameterDefinition {
    /// Create a new parameter definition
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

impl From<ParameterDefinition> for ParameterDescriptor {
    fn from(def: ParameterDefinition) -> Self {
        ParameterDescriptor {
            name: def.name,
            type_name: def.type_name,
        }
    }
}

/// Definition for a constructor
#[derive(Debug, Clone)]
pub struct ConstructorDefinition {
    /// Constructor name
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Whether this is a type-level initializer
    pub is_static: bool,
    /// Parameters
    pub parameters: Vec<ParameterDefinition>,
}

impl ConstructorDefinition {
    /// Create a public constructor named `new`
    pub fn new() -> Self {
        Self::named("new")
    }

    /// Create a public constructor with a custom name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            parameters: Vec::new(),
        }
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as type-level initializer
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Add a parameter
    pub fn with_param(mut self, param: ParameterDefinition) -> Self {
        self.parameters.push(param);
        self
    }

    fn into_descriptor(self, declaring_type: &str) -> ConstructorDescriptor {
        ConstructorDescriptor {
            name: self.name,
            declaring_type: declaring_type.to_string(),
            parameters: self.parameters.into_iter().map(Into::into).collect(),
            visibility: self.visibility,
            binding: binding_of(self.is_static),
        }
    }
}

impl Default for ConstructorDefinition {
    fn default() -> Self {
        Self::new()
    }
}

/// Definition for a property
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    /// Property name
    pub name: String,
    /// Declared type name
    pub type_name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Whether this is a static property
    pub is_static: bool,
    /// Has a getter
    pub has_getter: bool,
    /// Has a setter
    pub has_setter: bool,
}

impl PropertyDefinition {
    /// Create a private, get-only instance property
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility: Visibility::Private,
            is_static: false,
            has_getter: true,
            has_setter: false,
        }
    }

    /// Mark as public
    pub fn public(mut self) -> Self {
        self.visibility = Visibility::Public;
        self
    }

    /// Set visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static property
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Add a setter
    pub fn with_setter(mut self) -> Self {
        self.has_setter = true;
        self
    }

    fn into_descriptor(self) -> PropertyDescriptor {
        PropertyDescriptor {
            name: self.name,
            type_name: self.type_name,
            has_getter: self.has_getter,
            has_setter: self.has_setter,
            visibility: self.visibility,
            binding: binding_of(self.is_static),
        }
    }
}

fn binding_of(is_static: bool) -> Binding {
    if is_static {
        Binding::Static
    } else {
        Binding::Instance
    }
}

/// Simple name from a Rust type path: generic arguments stripped, last
/// path segment kept. `alloc::vec::Vec<u8>` becomes `Vec`.
///
/// Structural types (tuples, arrays, slices, references, raw pointers and
/// fn pointers) have no single path, so they are returned whole.
pub fn simple_name(type_path: &str) -> &str {
    if is_structural(type_path) {
        return type_path;
    }
    let base = match type_path.find('<') {
        Some(0) | None => type_path,
        Some(pos) => &type_path[..pos],
    };
    match base.rfind("::") {
        Some(pos) => &base[pos + 2..],
        None => base,
    }
}

fn is_structural(type_path: &str) -> bool {
    const PREFIXES: &[&str] = &["(", "[", "&", "*", "fn(", "unsafe ", "extern "];
    PREFIXES.iter().any(|p| type_path.starts_with(p))
}

/// Highest slot index accepted by the `*_at` placements
pub const MAX_SLOT_INDEX: usize = 4096;

/// Place `item` at `index`, padding with vacant slots
fn place<T>(
    slots: &mut Vec<Option<T>>,
    kind: &str,
    name: &str,
    index: usize,
    item: T,
) -> Result<(), String> {
    if index > MAX_SLOT_INDEX {
        return Err(format!(
            "{} `{}` placed at slot {} beyond limit {}",
            kind, name, index, MAX_SLOT_INDEX
        ));
    }
    if slots.len() <= index {
        slots.resize_with(index + 1, || None);
    }
    if slots[index].is_some() {
        return Err(format!("{} `{}` placed in occupied slot {}", kind, name, index));
    }
    slots[index] = Some(item);
    Ok(())
}

/// Builder for a [`TypeDescriptor`]
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: String,
    full_name: Option<String>,
    unit: Option<(String, String)>,
    fields: Vec<Option<FieldDefinition>>,
    methods: Vec<Option<MethodDefinition>>,
    properties: Vec<Option<PropertyDefinition>>,
    constructors: Vec<ConstructorDefinition>,
    interfaces: Vec<String>,
    conflicts: Vec<String>,
}

impl TypeBuilder {
    /// Start a type with only a simple name. Used for dynamically built
    /// types and generic definitions, which have no full name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: None,
            unit: None,
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
            interfaces: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Start a type named after `T`'s Rust path
    pub fn of<T: ?Sized>() -> Self {
        let path = std::any::type_name::<T>();
        Self::new(simple_name(path)).full_name(path)
    }

    /// Set the module-qualified name
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Set the defining unit (crate name and version). An empty version is
    /// left out of the qualified identifier.
    pub fn unit(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.unit = Some((name.into(), version.into()));
        self
    }

    /// Append a field
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(Some(field));
        self
    }

    /// Place a field at an explicit slot
    pub fn field_at(mut self, index: usize, field: FieldDefinition) -> Self {
        let name = field.name.clone();
        if let Err(conflict) = place(&mut self.fields, "field", &name, index, field) {
            self.conflicts.push(conflict);
        }
        self
    }

    /// Append a method
    pub fn method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(Some(method));
        self
    }

    /// Place a method at an explicit slot
    pub fn method_at(mut self, index: usize, method: MethodDefinition) -> Self {
        let name = method.name.clone();
        if let Err(conflict) = place(&mut self.methods, "method", &name, index, method) {
            self.conflicts.push(conflict);
        }
        self
    }

    /// Append a property
    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(Some(property));
        self
    }

    /// Place a property at an explicit slot
    pub fn property_at(mut self, index: usize, property: PropertyDefinition) -> Self {
        let name = property.name.clone();
        if let Err(conflict) = place(&mut self.properties, "property", &name, index, property) {
            self.conflicts.push(conflict);
        }
        self
    }

    /// Add a constructor
    pub fn constructor(mut self, constructor: ConstructorDefinition) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Declare an implemented trait by its qualified path
    pub fn implements(mut self, qualified_name: impl Into<String>) -> Self {
        self.interfaces.push(qualified_name.into());
        self
    }

    /// Validate and produce the descriptor
    pub fn build(self) -> IntrospectResult<TypeDescriptor> {
        if self.name.is_empty() {
            return Err(IntrospectError::invalid_state("type name cannot be empty"));
        }
        if let Some(conflict) = self.conflicts.first() {
            return Err(IntrospectError::invalid_state(format!(
                "{} on `{}`",
                conflict, self.name
            )));
        }

        let field_indices = index_names(&self.name, "field", &self.fields, |f| &f.name)?;
        index_names(&self.name, "method", &self.methods, |m| &m.name)?;
        index_names(&self.name, "property", &self.properties, |p| &p.name)?;

        let mut ctor_names = FxHashSet::default();
        for ctor in &self.constructors {
            if !ctor_names.insert(ctor.name.as_str()) {
                return Err(IntrospectError::invalid_state(format!(
                    "duplicate constructor `{}` on `{}`",
                    ctor.name, self.name
                )));
            }
        }

        let qualified_name = match (&self.full_name, &self.unit) {
            (Some(full), Some((unit, _))) if full.is_empty() || unit.is_empty() => None,
            (Some(full), Some((unit, version))) if version.is_empty() => {
                Some(format!("{}, {}", full, unit))
            }
            (Some(full), Some((unit, version))) => Some(format!("{}, {} {}", full, unit, version)),
            _ => None,
        };

        let name = self.name;
        let constructors = self
            .constructors
            .into_iter()
            .map(|c| c.into_descriptor(&name))
            .collect();

        Ok(TypeDescriptor {
            full_name: self.full_name,
            qualified_name,
            fields: self
                .fields
                .into_iter()
                .map(|slot| slot.map(FieldDefinition::into_descriptor))
                .collect(),
            methods: self
                .methods
                .into_iter()
                .map(|slot| slot.map(MethodDefinition::into_descriptor))
                .collect(),
            properties: self
                .properties
                .into_iter()
                .map(|slot| slot.map(PropertyDefinition::into_descriptor))
                .collect(),
            constructors,
            interfaces: self
                .interfaces
                .into_iter()
                .map(|qualified_name| InterfaceDescriptor { qualified_name })
                .collect(),
            field_indices,
            name,
        })
    }
}

/// Map member names to slot indices, rejecting duplicates
fn index_names<T>(
    type_name: &str,
    kind: &str,
    slots: &[Option<T>],
    name_of: impl Fn(&T) -> &String,
) -> IntrospectResult<FxHashMap<String, usize>> {
    let mut indices = FxHashMap::default();
    for (index, slot) in slots.iter().enumerate() {
        let Some(item) = slot else { continue };
        let name = name_of(item);
        if indices.insert(name.clone(), index).is_some() {
            return Err(IntrospectError::invalid_state(format!(
                "duplicate {} `{}` on `{}`",
                kind, name, type_name
            )));
        }
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MemberFilter;

    struct Sample;

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("alloc::string::String"), "String");
        assert_eq!(simple_name("alloc::vec::Vec<alloc::string::String>"), "Vec");
        assert_eq!(simple_name("i32"), "i32");
        assert_eq!(simple_name("&str"), "&str");
        assert_eq!(simple_name("<T as Trait>::Output"), "Output");
    }

    #[test]
    fn test_simple_name_keeps_structural_types_whole() {
        assert_eq!(simple_name("(i32, alloc::string::String)"), "(i32, alloc::string::String)");
        assert_eq!(simple_name("fn(alloc::string::String) -> u8"), "fn(alloc::string::String) -> u8");
        assert_eq!(simple_name("[u8; 4]"), "[u8; 4]");
        assert_eq!(simple_name("&[alloc::string::String]"), "&[alloc::string::String]");
        assert_eq!(simple_name("*const u8"), "*const u8");

        let descriptor = TypeBuilder::of::<(i32, String)>().build().unwrap();
        assert_eq!(descriptor.name(), "(i32, alloc::string::String)");
    }

    #[test]
    fn test_of_uses_type_path() {
        let descriptor = TypeBuilder::of::<Sample>().build().unwrap();
        assert_eq!(descriptor.name(), "Sample");
        assert!(descriptor.full_name().unwrap().ends_with("::Sample"));
        // No unit declared, so no qualified identifier
        assert_eq!(descriptor.qualified_name(), None);
    }

    #[test]
    fn test_qualified_name_includes_unit() {
        let descriptor = TypeBuilder::new("Point")
            .full_name("geometry::Point")
            .unit("geometry", "1.2.0")
            .build()
            .unwrap();
        assert_eq!(
            descriptor.qualified_name(),
            Some("geometry::Point, geometry 1.2.0")
        );
    }

    #[test]
    fn test_field_at_pads_vacant_slots() {
        let descriptor = TypeBuilder::new("Sparse")
            .field_at(2, FieldDefinition::new("tail", "u8"))
            .build()
            .unwrap();

        let slots: Vec<_> = descriptor.fields(MemberFilter::ALL).collect();
        assert_eq!(slots.len(), 3);
        assert!(slots[0].is_none());
        assert!(slots[1].is_none());
        assert_eq!(slots[2].map(|f| f.name.as_str()), Some("tail"));
        assert_eq!(descriptor.field("tail").map(|f| f.type_name.as_str()), Some("u8"));
    }

    #[test]
    fn test_occupied_slot_rejected() {
        let result = TypeBuilder::new("Clash")
            .method_at(0, MethodDefinition::new("a"))
            .method_at(0, MethodDefinition::new("b"))
            .build();
        assert!(matches!(result, Err(IntrospectError::InvalidState { .. })));
    }

    #[test]
    fn test_slot_beyond_limit_rejected() {
        let result = TypeBuilder::new("Huge")
            .field_at(usize::MAX, FieldDefinition::new("far", "u8"))
            .build();
        match result {
            Err(IntrospectError::InvalidState { message }) => {
                assert!(message.contains("beyond limit"), "unexpected message: {}", message);
            }
            other => panic!("expected limit error, got {:?}", other),
        }

        let descriptor = TypeBuilder::new("Edge")
            .property_at(MAX_SLOT_INDEX, PropertyDefinition::new("last", "u8"))
            .build()
            .unwrap();
        assert_eq!(descriptor.properties(MemberFilter::ALL).count(), MAX_SLOT_INDEX + 1);
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let result = TypeBuilder::new("Twice")
            .property(PropertyDefinition::new("len", "usize"))
            .property_at(3, PropertyDefinition::new("len", "usize").public())
            .build();
        assert!(matches!(result, Err(IntrospectError::InvalidState { .. })));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = TypeBuilder::new("Twice")
            .field(FieldDefinition::new("x", "f64"))
            .field(FieldDefinition::new("x", "f64").public())
            .build();
        match result {
            Err(IntrospectError::InvalidState { message }) => {
                assert!(message.contains("duplicate field `x`"));
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        match TypeBuilder::new("").full_name("a::b").unit("u", "1").build() {
            Err(IntrospectError::InvalidState { message }) => {
                assert_eq!(message, "type name cannot be empty");
            }
            other => panic!("expected InvalidState, got {:?}", other),
        }
    }

    #[test]
    fn test_constructor_gets_declaring_type() {
        let descriptor = TypeBuilder::new("Counter")
            .constructor(
                ConstructorDefinition::new().with_param(ParameterDefinition::new("start", "u32")),
            )
            .build()
            .unwrap();
        let ctor = descriptor.constructors(MemberFilter::ALL).next().unwrap();
        assert_eq!(ctor.declaring_type, "Counter");
        assert_eq!(ctor.to_string(), "Counter::new(u32)");
    }

    #[test]
    fn test_definition_defaults() {
        let field = FieldDefinition::new("x", "i32");
        assert_eq!(field.visibility, Visibility::Private);
        assert!(!field.is_static);

        let prop = PropertyDefinition::new("len", "usize");
        assert!(prop.has_getter);
        assert!(!prop.has_setter);
        assert!(prop.with_setter().has_setter);

        let ctor = ConstructorDefinition::default();
        assert_eq!(ctor.name, "new");
        assert_eq!(ctor.visibility, Visibility::Public);
    }
}
