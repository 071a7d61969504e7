//! Table alias bookkeeping for multi-table queries.

/// Aliases of the table instances referenced within one builder.
///
/// Each FROM/JOIN target is one entry, so a self-joined entity has one entry
/// per occurrence. Aliases are unique across all entries (case-insensitive).
/// Looking up an entity resolves to its first occurrence. `Clone` copies every
/// mapping into independent storage.
#[derive(Debug, Clone, Default)]
pub struct AliasRegister {
    entries: Vec<(String, String)>,
    next_index: usize,
}

impl AliasRegister {
    /// Create an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one table instance of `entity` under `alias`.
    ///
    /// Returns `false` (and records nothing) when `alias` is already taken.
    pub fn register(&mut self, entity: &str, alias: &str) -> bool {
        if self.is_alias_taken(alias) {
            return false;
        }
        self.entries.push((entity.to_string(), alias.to_string()));
        true
    }

    /// Resolve `entity`, registering a fresh `tN` alias on first sight.
    pub fn assign(&mut self, entity: &str) -> String {
        if let Some(alias) = self.get(entity) {
            return alias.to_string();
        }
        let alias = self.generate();
        self.entries.push((entity.to_string(), alias.clone()));
        alias
    }

    /// Generate an alias that no table instance uses yet (without registering it).
    pub fn generate(&mut self) -> String {
        loop {
            self.next_index += 1;
            let alias = format!("t{}", self.next_index);
            if !self.is_alias_taken(&alias) {
                return alias;
            }
        }
    }

    /// The alias of the first instance of `entity`.
    pub fn get(&self, entity: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(e, _)| e == entity)
            .map(|(_, a)| a.as_str())
    }

    /// Check whether `entity` is registered.
    pub fn contains(&self, entity: &str) -> bool {
        self.get(entity).is_some()
    }

    /// Check whether any table instance already uses `alias` (case-insensitive).
    pub fn is_alias_taken(&self, alias: &str) -> bool {
        self.entries.iter().any(|(_, a)| a.eq_ignore_ascii_case(alias))
    }

    /// `(entity, alias)` pairs, one per table instance, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(e, a)| (e.as_str(), a.as_str()))
    }

    /// Number of registered table instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
