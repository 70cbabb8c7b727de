// ── Resource abstraction ──
//
// One trait describes everything the generic CRUD machinery needs to know
// about a collection: its wire shape, its table columns, its form rules and
// its seed data. Products and categories are the two implementors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::CoreError;
use crate::model::ResourceId;
use crate::validation::{FormSchema, FormValues};

/// The two resource collections served by SmartStore.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Product,
    Category,
}

impl ResourceKind {
    /// Lowercase plural, used in file names and URLs (`products`).
    pub fn plural(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Category => "categories",
        }
    }

    /// Capitalized singular (`Product`).
    pub fn title(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Category => "Category",
        }
    }

    /// Capitalized plural (`Products`).
    pub fn title_plural(self) -> &'static str {
        match self {
            Self::Product => "Products",
            Self::Category => "Categories",
        }
    }

    /// Collection path on the backend service.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Product => "/api/products",
            Self::Category => "/api/categories",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::Product => 8081,
            Self::Category => 8082,
        }
    }

    /// `http://localhost:{port}{endpoint}`
    pub fn default_base_url(self) -> String {
        format!(
            "http://localhost:{}{}",
            self.default_port(),
            self.endpoint()
        )
    }

    /// `Products Report`
    pub fn report_title(self) -> String {
        format!("{} Report", self.title_plural())
    }

    /// `products-report.{extension}`
    pub fn report_file_name(self, extension: &str) -> String {
        format!("{}-report.{extension}", self.plural())
    }
}

/// A visible table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Machine key (`name`, `createdAt`), accepted by `--sort`.
    pub key: &'static str,
    /// Header text shown in tables and exports.
    pub header: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, header: &'static str) -> Self {
        Self { key, header }
    }
}

/// A record managed through the generic CRUD stack.
pub trait Resource:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Create/update body: the resource minus its server-owned fields.
    type Draft: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> ResourceId;

    fn name(&self) -> &str;

    /// Materialize a draft as the in-memory backend would store it.
    fn from_draft(id: ResourceId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Overwrite the mutable fields with those of `draft`.
    fn apply_draft(&mut self, draft: Self::Draft);

    /// Copy server-immutable fields (id, creation time) from `previous`.
    fn keep_immutable_fields(&mut self, previous: &Self);

    fn to_draft(&self) -> Self::Draft;

    fn columns() -> &'static [Column];

    /// Display cells, one per column, as used for filtering and CSV.
    fn cells(&self) -> Vec<String>;

    /// Cells as rendered in the PDF report.
    fn report_cells(&self) -> Vec<String> {
        self.cells()
    }

    fn form_schema() -> FormSchema;

    /// Current values, for prefilling an edit or view form.
    fn form_values(&self) -> FormValues;

    /// Convert validated form values into a draft.
    fn draft_from_form(values: &FormValues) -> Result<Self::Draft, CoreError>;

    /// Records the in-memory backend starts with.
    fn seed() -> Vec<Self>;
}

/// Index of the column whose key matches `key`, case-insensitively.
pub fn column_index<R: Resource>(key: &str) -> Option<usize> {
    R::columns()
        .iter()
        .position(|c| c.key.eq_ignore_ascii_case(key) || c.header.eq_ignore_ascii_case(key))
}

/// Fetch a trimmed form value, treating a missing key as empty.
pub(crate) fn form_text<'a>(values: &'a FormValues, field: &str) -> &'a str {
    values.get(field).map_or("", |v| v.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_naming() {
        assert_eq!(ResourceKind::Product.to_string(), "product");
        assert_eq!(ResourceKind::Category.plural(), "categories");
        assert_eq!(ResourceKind::Category.report_title(), "Categories Report");
        assert_eq!(
            ResourceKind::Product.report_file_name("csv"),
            "products-report.csv"
        );
    }

    #[test]
    fn default_urls() {
        assert_eq!(
            ResourceKind::Product.default_base_url(),
            "http://localhost:8081/api/products"
        );
        assert_eq!(
            ResourceKind::Category.default_base_url(),
            "http://localhost:8082/api/categories"
        );
    }
}
