// ── Category ──

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use super::resource::{Column, Resource, ResourceKind, form_text};
use super::ResourceId;
use crate::error::CoreError;
use crate::validation::{FieldSpec, FormSchema, FormValues};

const COLUMNS: &[Column] = &[
    Column::new("id", "ID"),
    Column::new("name", "Name"),
    Column::new("description", "Description"),
    Column::new("createdAt", "Created At"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of a category create/update request. `createdAt` is server-owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Age badge shown next to each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Recency {
    /// Created less than 7 days ago.
    Recent,
    /// Created less than 30 days ago.
    Moderate,
    Old,
}

impl Recency {
    pub fn for_age(age: Duration) -> Self {
        if age < Duration::days(7) {
            Self::Recent
        } else if age < Duration::days(30) {
            Self::Moderate
        } else {
            Self::Old
        }
    }
}

impl Category {
    pub fn recency(&self, now: DateTime<Utc>) -> Recency {
        Recency::for_age(now.signed_duration_since(self.created_at))
    }

    fn seeded(id: i64, name: &str, description: Option<&str>, (y, m, d): (i32, u32, u32)) -> Self {
        Self {
            id: ResourceId::new(id),
            name: name.into(),
            description: description.map(String::from),
            created_at: Utc
                .with_ymd_and_hms(y, m, d, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl Resource for Category {
    type Draft = CategoryDraft;

    const KIND: ResourceKind = ResourceKind::Category;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn from_draft(id: ResourceId, draft: CategoryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at: now,
        }
    }

    fn apply_draft(&mut self, draft: CategoryDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }

    fn keep_immutable_fields(&mut self, previous: &Self) {
        self.id = previous.id;
        self.created_at = previous.created_at;
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft::new(self.name.clone(), self.description.clone())
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            self.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]
    }

    fn report_cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            self.created_at.format("%Y-%m-%d").to_string(),
        ]
    }

    fn form_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::new("name", "Name")
                .required()
                .min_length(3)
                .max_length(50)
                .whitespace(),
            FieldSpec::new("description", "Description")
                .max_length(200)
                .whitespace(),
        ])
    }

    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("name".to_owned(), self.name.clone()),
            (
                "description".to_owned(),
                self.description.clone().unwrap_or_default(),
            ),
        ])
    }

    fn draft_from_form(values: &FormValues) -> Result<CategoryDraft, CoreError> {
        let description = Some(form_text(values, "description").to_owned());
        Ok(CategoryDraft::new(form_text(values, "name"), description))
    }

    fn seed() -> Vec<Self> {
        vec![
            Self::seeded(1, "Electronics", Some("Computers, displays and gadgets"), (2024, 1, 15)),
            Self::seeded(2, "Accessories", Some("Cables, hubs and adapters"), (2024, 2, 3)),
            Self::seeded(3, "Audio", Some("Headphones and speakers"), (2024, 3, 21)),
            Self::seeded(4, "Office", None, (2024, 4, 8)),
            Self::seeded(5, "Gaming", Some("Controllers, consoles and games"), (2024, 5, 30)),
            Self::seeded(6, "Storage", Some("Drives and memory cards"), (2024, 6, 12)),
        ]
    }
}
