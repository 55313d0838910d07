//! Macros for declaring typed IDs.

/// Binds an entity type to a prefix and declares an alias for its ID type.
///
/// With two arguments the prefix is derived from the entity's type name; a
/// third argument sets it explicitly.
///
/// This expands to an `Entity` impl for the entity type and a
/// `TypedId<Entity>` type alias, which gets:
/// - `new()` to generate a fresh ID
/// - `parse()`, `try_parse()` and `FromStr`
/// - `Display`, `Serialize` and `Deserialize`
/// - `Ord`, `Hash`, and other standard traits
///
/// # Example
///
/// ```
/// use typesafe_id::define_id;
///
/// pub struct User;
/// pub struct Order;
///
/// define_id!(pub UserId, User);
/// define_id!(pub OrderId, Order, "ord");
///
/// let user_id = UserId::new();
/// assert!(user_id.to_string().starts_with("user_"));
///
/// let parsed: OrderId = "ord_01h455vb4pex5vsknk084sn02q".parse()?;
/// assert_eq!(OrderId::prefix(), "ord");
/// # let _ = parsed;
/// # Ok::<(), typesafe_id::IdError>(())
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $vis:vis $alias:ident, $entity:ty, $prefix:literal $(,)?) => {
        impl $crate::Entity for $entity {
            const TYPEID: $crate::PrefixConfig = $crate::PrefixConfig::with_prefix($prefix);
        }

        $(#[$meta])*
        $vis type $alias = $crate::TypedId<$entity>;
    };
    ($(#[$meta:meta])* $vis:vis $alias:ident, $entity:ty $(,)?) => {
        impl $crate::Entity for $entity {}

        $(#[$meta])*
        $vis type $alias = $crate::TypedId<$entity>;
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    pub struct Organization;
    pub struct Project;
    pub struct ServicePrincipal;
    pub struct Session;

    define_id!(OrgId, Organization, "org");
    define_id!(ProjectId, Project, "prj");
    define_id!(
        /// Service principal IDs.
        pub ServicePrincipalId,
        ServicePrincipal,
    );
    define_id!(SessionId, Session);

    #[test]
    fn test_explicit_prefixes() {
        assert_eq!(OrgId::prefix(), "org");
        assert_eq!(ProjectId::prefix(), "prj");
    }

    #[test]
    fn test_derived_prefixes() {
        assert_eq!(ServicePrincipalId::prefix(), "service_principal");
        assert_eq!(SessionId::prefix(), "session");
    }

    #[test]
    fn test_alias_roundtrip() {
        let id = OrgId::new();
        let parsed: OrgId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_all_prefixes_unique() {
        let prefixes = [
            OrgId::prefix(),
            ProjectId::prefix(),
            ServicePrincipalId::prefix(),
            SessionId::prefix(),
        ];
        let unique: HashSet<_> = prefixes.iter().collect();
        assert_eq!(prefixes.len(), unique.len(), "Duplicate ID prefixes found!");
    }
}
