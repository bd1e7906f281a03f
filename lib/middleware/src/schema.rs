use indexmap::IndexMap;

use crate::resolver::ResolverFn;

/// The declared field resolvers of a schema, keyed by type and field name.
///
/// Only explicitly declared resolvers live here; fields served by the
/// engine's default resolver are never present, so they are never
/// enumerated and never wrapped. Iteration follows declaration order.
#[derive(Default)]
pub struct ResolverMap {
    inner: IndexMap<(String, String), ResolverFn>,
}

impl ResolverMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for `type_name.field_name`, replacing any
    /// previous declaration.
    pub fn declare(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolver: ResolverFn,
    ) {
        self.inner
            .insert((type_name.into(), field_name.into()), resolver);
    }

    pub fn get(&self, type_name: &str, field_name: &str) -> Option<&ResolverFn> {
        self.inner
            .get(&(type_name.to_string(), field_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ResolverFn)> {
        self.inner
            .iter()
            .map(|((type_name, field_name), resolver)| {
                (type_name.as_str(), field_name.as_str(), resolver)
            })
    }

    /// Replace every declared resolver with `replace(type, field, resolver)`.
    /// This is the seam middleware installs through.
    pub fn map_resolvers(
        self,
        mut replace: impl FnMut(&str, &str, ResolverFn) -> ResolverFn,
    ) -> Self {
        let inner = self
            .inner
            .into_iter()
            .map(|((type_name, field_name), resolver)| {
                let replaced = replace(&type_name, &field_name, resolver);
                ((type_name, field_name), replaced)
            })
            .collect();
        ResolverMap { inner }
    }
}
