//! Type Introspection Queries
//!
//! Each query resolves the descriptor of an instance's dynamic type (or of a
//! type parameter) and renders the requested entries as strings.
//!
//! | Query                            | Entries                  | Canonical filter                  |
//! |----------------------------------|--------------------------|-----------------------------------|
//! | `get_type_name`                  | simple name              |                                   |
//! | `get_full_type_name`             | module-qualified name    |                                   |
//! | `get_assembly_qualified_name`    | qualified identifier     |                                   |
//! | `get_private_instance_fields`    | field names              | non-public, instance              |
//! | `get_public_static_fields`       | field names              | public, static                    |
//! | `get_interface_data_details`     | trait paths              | all                               |
//! | `get_constructors_data_details`  | constructor signatures   | all                               |
//! | `get_type_members_data_details`  | member signatures        | public, instance + static         |
//! | `get_method_data_details`        | method signatures        | public, instance                  |
//! | `get_properties_data_details`    | property signatures      | all                               |
//!
//! The legacy profile ([`FilterProfile::Legacy`](crate::FilterProfile))
//! renders field signatures and widens the member and method queries to
//! every visibility and binding.
//!
//! Instance queries take `Option<&dyn Reflect>` and fail with
//! [`IntrospectError::InvalidArgument`] on `None` before any metadata is
//! read. Vacant slots render as a single space unless the config omits them.
//! Entries keep declaration order; members list methods, constructors,
//! properties, then fields.
//!
//! Queries have no output side effects. Each one emits a single `tracing`
//! event at trace level, which goes nowhere unless the caller installs a
//! subscriber with trace enabled for this crate.

use tracing::trace;

use crate::config::{IntrospectConfig, NullEntryPolicy};
use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::error::{IntrospectError, IntrospectResult};
use crate::filter::MemberFilter;
use crate::reflect::{Describe, Reflect};

/// Rendering of a vacant descriptor slot
pub const NULL_ENTRY: &str = " ";

/// Stateless query surface over descriptor tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeIntrospector {
    config: IntrospectConfig,
}

impl TypeIntrospector {
    /// Introspector with the canonical configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Introspector with a specific configuration
    pub fn with_config(config: IntrospectConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &IntrospectConfig {
        &self.config
    }

    /// Simple name of the instance's dynamic type
    pub fn get_type_name(&self, obj: Option<&dyn Reflect>) -> IntrospectResult<String> {
        let descriptor = descriptor_of(obj)?;
        Ok(descriptor.name().to_string())
    }

    /// Module-qualified name of `T`
    pub fn get_full_type_name<T: Describe + ?Sized>(&self) -> IntrospectResult<String> {
        get_full_type_name::<T>()
    }

    /// Qualified identifier of `T`, including its defining unit
    pub fn get_assembly_qualified_name<T: Describe + ?Sized>(&self) -> IntrospectResult<String> {
        get_assembly_qualified_name::<T>()
    }

    /// Names of non-public instance fields
    pub fn get_private_instance_fields(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let entries = self.render_fields(descriptor, MemberFilter::NON_PUBLIC_INSTANCE);
        Ok(traced("private_instance_fields", descriptor, entries))
    }

    /// Names of public static fields
    pub fn get_public_static_fields(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let entries = self.render_fields(descriptor, MemberFilter::PUBLIC_STATIC);
        Ok(traced("public_static_fields", descriptor, entries))
    }

    /// Qualified paths of every implemented trait
    pub fn get_interface_data_details(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let entries = descriptor
            .interfaces()
            .iter()
            .map(|i| i.qualified_name.clone())
            .collect();
        Ok(traced("interfaces", descriptor, entries))
    }

    /// Signatures of every constructor
    pub fn get_constructors_data_details(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let entries = descriptor
            .constructors(MemberFilter::ALL)
            .map(|c| c.to_string())
            .collect();
        Ok(traced("constructors", descriptor, entries))
    }

    /// Signatures of all members passing the profile's member filter
    pub fn get_type_members_data_details(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let members = descriptor.members(self.config.members_filter());
        let entries = self.render_entries(members, |m| m.to_string());
        Ok(traced("members", descriptor, entries))
    }

    /// Signatures of methods passing the profile's method filter
    pub fn get_method_data_details(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let methods = descriptor.methods(self.config.methods_filter());
        let entries = self.render_entries(methods, |m| m.to_string());
        Ok(traced("methods", descriptor, entries))
    }

    /// Signatures of every property
    pub fn get_properties_data_details(
        &self,
        obj: Option<&dyn Reflect>,
    ) -> IntrospectResult<Vec<String>> {
        let descriptor = descriptor_of(obj)?;
        let properties = descriptor.properties(MemberFilter::ALL);
        let entries = self.render_entries(properties, |p| p.to_string());
        Ok(traced("properties", descriptor, entries))
    }

    fn render_fields(&self, descriptor: &TypeDescriptor, filter: MemberFilter) -> Vec<String> {
        let full = self.config.full_field_signatures();
        self.render_entries(descriptor.fields(filter), |f: &FieldDescriptor| {
            if full {
                f.to_string()
            } else {
                f.name.clone()
            }
        })
    }

    fn render_entries<T>(
        &self,
        entries: impl IntoIterator<Item = Option<T>>,
        render: impl Fn(T) -> String,
    ) -> Vec<String> {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Some(item) => Some(render(item)),
                None => match self.config.null_entries {
                    NullEntryPolicy::Placeholder => Some(NULL_ENTRY.to_string()),
                    NullEntryPolicy::Omit => None,
                },
            })
            .collect()
    }
}

fn descriptor_of(obj: Option<&dyn Reflect>) -> IntrospectResult<&'static TypeDescriptor> {
    match obj {
        Some(obj) => obj.type_descriptor(),
        None => Err(IntrospectError::null_argument("obj")),
    }
}

fn traced(query: &'static str, descriptor: &TypeDescriptor, entries: Vec<String>) -> Vec<String> {
    trace!(
        query = query,
        type_name = descriptor.name(),
        count = entries.len(),
        "introspection query"
    );
    entries
}

// ============================================================================
// Free functions (canonical configuration)
// ============================================================================

/// Simple name of the instance's dynamic type
pub fn get_type_name(obj: Option<&dyn Reflect>) -> IntrospectResult<String> {
    TypeIntrospector::new().get_type_name(obj)
}

/// Module-qualified name of `T`.
///
/// Fails with [`IntrospectError::InvalidState`] when `T` has no full name,
/// as for generic definitions and dynamically built types.
pub fn get_full_type_name<T: Describe + ?Sized>() -> IntrospectResult<String> {
    let descriptor = T::describe()?;
    match descriptor.full_name() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(IntrospectError::invalid_state(format!(
            "type `{}` has no full name",
            descriptor.name()
        ))),
    }
}

/// Qualified identifier of `T`, including its defining unit.
///
/// Fails with [`IntrospectError::InvalidState`] when the identifier is
/// unavailable (no full name or no defining unit).
pub fn get_assembly_qualified_name<T: Describe + ?Sized>() -> IntrospectResult<String> {
    let descriptor = T::describe()?;
    match descriptor.qualified_name() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(IntrospectError::invalid_state(format!(
            "type `{}` has no qualified identifier",
            descriptor.name()
        ))),
    }
}

/// Names of non-public instance fields
pub fn get_private_instance_fields(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_private_instance_fields(obj)
}

/// Names of public static fields
pub fn get_public_static_fields(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_public_static_fields(obj)
}

/// Qualified paths of every implemented trait
pub fn get_interface_data_details(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_interface_data_details(obj)
}

/// Signatures of every constructor
pub fn get_constructors_data_details(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_constructors_data_details(obj)
}

/// Signatures of public members
pub fn get_type_members_data_details(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_type_members_data_details(obj)
}

/// Signatures of public instance methods
pub fn get_method_data_details(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_method_data_details(obj)
}

/// Signatures of every property
pub fn get_properties_data_details(obj: Option<&dyn Reflect>) -> IntrospectResult<Vec<String>> {
    TypeIntrospector::new().get_properties_data_details(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{FieldDefinition, MethodDefinition, PropertyDefinition};
    use crate::config::FilterProfile;

    struct Gauge;

    crate::describe!(Gauge, |b| b
        .field(FieldDefinition::new("level", "f32"))
        .field_at(2, FieldDefinition::new("UNIT", "&str").public().as_static())
        .method(MethodDefinition::new("read").public().returns("f32"))
        .method(MethodDefinition::new("calibrate"))
        .property(PropertyDefinition::new("label", "String").public().with_setter()));

    #[test]
    fn test_null_instance_rejected() {
        let introspector = TypeIntrospector::new();
        let err = introspector.get_method_data_details(None).unwrap_err();
        assert_eq!(err, IntrospectError::null_argument("obj"));
    }

    #[test]
    fn test_placeholder_keeps_alignment() {
        let introspector = TypeIntrospector::new();
        // Slot 1 is vacant, so it appears in both field listings
        assert_eq!(
            introspector.get_private_instance_fields(Some(&Gauge)).unwrap(),
            vec!["level", " "]
        );
        assert_eq!(
            introspector.get_public_static_fields(Some(&Gauge)).unwrap(),
            vec![" ", "UNIT"]
        );
    }

    #[test]
    fn test_omit_policy_drops_vacant_slots() {
        let config = IntrospectConfig::new().with_null_entries(NullEntryPolicy::Omit);
        let introspector = TypeIntrospector::with_config(config);
        assert_eq!(
            introspector.get_public_static_fields(Some(&Gauge)).unwrap(),
            vec!["UNIT"]
        );
    }

    #[test]
    fn test_legacy_profile_widens_methods() {
        let canonical = TypeIntrospector::new();
        assert_eq!(
            canonical.get_method_data_details(Some(&Gauge)).unwrap(),
            vec!["fn read(&self) -> f32"]
        );

        let legacy =
            TypeIntrospector::with_config(IntrospectConfig::new().with_profile(FilterProfile::Legacy));
        assert_eq!(
            legacy.get_method_data_details(Some(&Gauge)).unwrap(),
            vec!["fn read(&self) -> f32", "fn calibrate(&self)"]
        );
        assert_eq!(
            legacy.get_private_instance_fields(Some(&Gauge)).unwrap(),
            vec!["level: f32", " "]
        );
    }

    #[test]
    fn test_members_order() {
        let members = get_type_members_data_details(Some(&Gauge)).unwrap();
        assert_eq!(
            members,
            vec![
                "fn read(&self) -> f32",
                "label: String { get; set; }",
                " ",
                "static UNIT: &str",
            ]
        );
    }
}
