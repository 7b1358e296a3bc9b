//! Visibility and binding filters
//!
//! Every member enumeration on a [`TypeDescriptor`](crate::TypeDescriptor)
//! takes a [`MemberFilter`]. A member passes when both its visibility and its
//! binding are selected.

/// Declared visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `pub`
    Public,
    /// `pub(crate)` / `pub(super)`
    Crate,
    /// Private to the defining module
    Private,
}

impl Visibility {
    /// Whether this is public visibility
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Whether a member belongs to instances or to the type itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Takes `self`
    Instance,
    /// Associated with the type (no receiver)
    Static,
}

/// Visibility x binding selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberFilter {
    /// Select public members
    pub public: bool,
    /// Select crate-visible and private members
    pub non_public: bool,
    /// Select instance members
    pub instance: bool,
    /// Select static members
    pub is_static: bool,
}

impl MemberFilter {
    /// Every member
    pub const ALL: MemberFilter = MemberFilter {
        public: true,
        non_public: true,
        instance: true,
        is_static: true,
    };

    /// Public members, instance and static
    pub const PUBLIC: MemberFilter = MemberFilter {
        public: true,
        non_public: false,
        instance: true,
        is_static: true,
    };

    /// Public instance members
    pub const PUBLIC_INSTANCE: MemberFilter = MemberFilter {
        public: true,
        non_public: false,
        instance: true,
        is_static: false,
    };

    /// Public static members
    pub const PUBLIC_STATIC: MemberFilter = MemberFilter {
        public: true,
        non_public: false,
        instance: false,
        is_static: true,
    };

    /// Non-public instance members
    pub const NON_PUBLIC_INSTANCE: MemberFilter = MemberFilter {
        public: false,
        non_public: true,
        instance: true,
        is_static: false,
    };

    /// Check whether a member with the given modifiers passes
    pub fn matches(&self, visibility: Visibility, binding: Binding) -> bool {
        let vis_ok = if visibility.is_public() {
            self.public
        } else {
            self.non_public
        };
        let binding_ok = match binding {
            Binding::Instance => self.instance,
            Binding::Static => self.is_static,
        };
        vis_ok && binding_ok
    }
}
