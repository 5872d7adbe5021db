use crate::model::{CatalogEntry, FieldMap};

/// Failure reported by a catalog for a single call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The catalog refused this one operation (constraint violation, timeout,
    /// bad value). The import records it against the row and moves on.
    #[error("{0}")]
    Rejected(String),

    /// The catalog cannot be reached at all. The import stops.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to a catalog keyed by natural code.
///
/// The catalog owns entry identifiers and persistence. Each `create` or
/// `update` call is expected to be atomic; the engine never issues partial
/// writes and never deletes.
pub trait Catalog {
    /// Look up an entry by its natural code.
    ///
    /// Codes are compared in [`canonical_form`]: case and whitespace runs are
    /// ignored, session suffixes are not. `math101` finds `MATH101`, while
    /// `MATH101-A` does not.
    ///
    /// [`canonical_form`]: crate::parsing::normalize::canonical_form
    fn get_by_key(&mut self, code: &str) -> Result<Option<CatalogEntry>, CatalogError>;

    /// Create an entry with the given code and fields.
    fn create(&mut self, code: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError>;

    /// Overwrite the given fields of an existing entry. Fields not present in
    /// `fields` are left as they are.
    fn update(&mut self, id: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError>;
}

impl<C: Catalog + ?Sized> Catalog for &mut C {
    fn get_by_key(&mut self, code: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        (**self).get_by_key(code)
    }

    fn create(&mut self, code: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        (**self).create(code, fields)
    }

    fn update(&mut self, id: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        (**self).update(id, fields)
    }
}
