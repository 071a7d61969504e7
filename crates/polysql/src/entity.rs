//! Entity metadata: how entity names map to tables and columns.
//!
//! The builder never reflects over types. It asks an [`EntityMetadata`] provider,
//! which the application supplies once at start-up (usually a
//! [`MetadataRegistry`] filled with const [`EntityDef`] records).
//!
//! # Example
//!
//! ```rust
//! use polysql::entity::{EntityDef, EntityResolver, MetadataRegistry};
//! use std::sync::Arc;
//!
//! const USER: EntityDef = EntityDef::new("User", "users")
//!     .with_schema("app")
//!     .with_columns(&[("Id", "id"), ("Name", "user_name")])
//!     .with_soft_delete("is_deleted");
//!
//! let resolver = EntityResolver::new(Arc::new(MetadataRegistry::new().with(USER)));
//! assert_eq!(resolver.table("User"), "app.users");
//! assert_eq!(resolver.column("User", "Name"), "user_name");
//! assert_eq!(resolver.table("Unknown"), "Unknown");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Provider of table/column names for entities.
///
/// Every method returns `None` for unknown entities; callers fall back to using
/// the entity/property name verbatim.
pub trait EntityMetadata: Send + Sync + fmt::Debug {
    /// Table name of `entity`.
    fn table(&self, entity: &str) -> Option<String>;

    /// Schema of `entity`'s table.
    fn schema(&self, _entity: &str) -> Option<String> {
        None
    }

    /// Column name of `property` on `entity`.
    fn column(&self, _entity: &str, _property: &str) -> Option<String> {
        None
    }

    /// All column names of `entity`, in declaration order.
    fn columns(&self, _entity: &str) -> Option<Vec<String>> {
        None
    }

    /// Soft-delete flag column of `entity`, if the entity is soft-deletable.
    fn soft_delete_column(&self, _entity: &str) -> Option<String> {
        None
    }
}

/// Metadata provider that knows nothing: names are used verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl EntityMetadata for NoMetadata {
    fn table(&self, _entity: &str) -> Option<String> {
        None
    }
}

/// Static description of one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    pub schema: Option<&'static str>,
    /// `(property, column)` pairs.
    pub columns: &'static [(&'static str, &'static str)],
    pub soft_delete: Option<&'static str>,
}

impl EntityDef {
    pub const fn new(name: &'static str, table: &'static str) -> Self {
        Self {
            name,
            table,
            schema: None,
            columns: &[],
            soft_delete: None,
        }
    }

    pub const fn with_schema(mut self, schema: &'static str) -> Self {
        self.schema = Some(schema);
        self
    }

    pub const fn with_columns(mut self, columns: &'static [(&'static str, &'static str)]) -> Self {
        self.columns = columns;
        self
    }

    pub const fn with_soft_delete(mut self, column: &'static str) -> Self {
        self.soft_delete = Some(column);
        self
    }
}

/// Types that describe themselves as an entity.
pub trait Entity {
    const DEF: EntityDef;
}

/// In-memory [`EntityMetadata`] built from [`EntityDef`] records.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    entities: HashMap<&'static str, EntityDef>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition (replacing any previous one with the same name).
    pub fn register(&mut self, def: EntityDef) -> &mut Self {
        self.entities.insert(def.name, def);
        self
    }

    /// Register a definition (consuming version).
    pub fn with(mut self, def: EntityDef) -> Self {
        self.register(def);
        self
    }

    /// Register the definition of an [`Entity`] type.
    pub fn with_entity<E: Entity>(self) -> Self {
        self.with(E::DEF)
    }

    pub fn get(&self, entity: &str) -> Option<&EntityDef> {
        self.entities.get(entity)
    }
}

impl EntityMetadata for MetadataRegistry {
    fn table(&self, entity: &str) -> Option<String> {
        self.get(entity).map(|d| d.table.to_string())
    }

    fn schema(&self, entity: &str) -> Option<String> {
        self.get(entity).and_then(|d| d.schema).map(str::to_string)
    }

    fn column(&self, entity: &str, property: &str) -> Option<String> {
        self.get(entity)?
            .columns
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(property))
            .map(|(_, c)| c.to_string())
    }

    fn columns(&self, entity: &str) -> Option<Vec<String>> {
        let def = self.get(entity)?;
        if def.columns.is_empty() {
            return None;
        }
        Some(def.columns.iter().map(|(_, c)| c.to_string()).collect())
    }

    fn soft_delete_column(&self, entity: &str) -> Option<String> {
        self.get(entity).and_then(|d| d.soft_delete).map(str::to_string)
    }
}

/// Resolves entity names through a metadata provider, with verbatim fallback.
#[derive(Debug, Clone)]
pub struct EntityResolver {
    metadata: Arc<dyn EntityMetadata>,
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoMetadata))
    }
}

impl EntityResolver {
    pub fn new(metadata: Arc<dyn EntityMetadata>) -> Self {
        Self { metadata }
    }

    /// The underlying provider.
    pub fn metadata(&self) -> &dyn EntityMetadata {
        self.metadata.as_ref()
    }

    /// Shared handle to the underlying provider.
    pub fn metadata_arc(&self) -> Arc<dyn EntityMetadata> {
        Arc::clone(&self.metadata)
    }

    /// Bare table name (no schema).
    pub fn table_name(&self, entity: &str) -> String {
        self.metadata
            .table(entity)
            .unwrap_or_else(|| entity.to_string())
    }

    /// `schema.table` when a schema is known, otherwise the table name.
    pub fn table(&self, entity: &str) -> String {
        let table = self.table_name(entity);
        match self.metadata.schema(entity) {
            Some(schema) if !schema.is_empty() => format!("{schema}.{table}"),
            _ => table,
        }
    }

    /// Column name of `property`.
    pub fn column(&self, entity: &str, property: &str) -> String {
        self.metadata
            .column(entity, property)
            .unwrap_or_else(|| property.to_string())
    }

    /// All columns of `entity` (empty when unknown).
    pub fn columns(&self, entity: &str) -> Vec<String> {
        self.metadata.columns(entity).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order;

    impl Entity for Order {
        const DEF: EntityDef = EntityDef::new("Order", "orders")
            .with_columns(&[("Id", "id"), ("UserId", "user_id")]);
    }

    #[test]
    fn registry_resolves_entity_trait() {
        let resolver = EntityResolver::new(Arc::new(MetadataRegistry::new().with_entity::<Order>()));
        assert_eq!(resolver.table("Order"), "orders");
        assert_eq!(resolver.column("Order", "userid"), "user_id");
        assert_eq!(resolver.columns("Order"), vec!["id", "user_id"]);
        assert_eq!(resolver.metadata().soft_delete_column("Order"), None);
    }

    #[test]
    fn verbatim_fallback() {
        let resolver = EntityResolver::default();
        assert_eq!(resolver.table("User"), "User");
        assert_eq!(resolver.column("User", "Name"), "Name");
        assert!(resolver.columns("User").is_empty());
    }
}
