// ── Product ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use super::resource::{Column, Resource, ResourceKind, form_text};
use super::ResourceId;
use crate::error::CoreError;
use crate::validation::{FieldSpec, FormSchema, FormValues};

/// Price below which a product is tagged [`PriceTier::Low`].
pub const LOW_PRICE_CEILING: f64 = 100.0;
/// Price below which a product is tagged [`PriceTier::Medium`].
pub const MEDIUM_PRICE_CEILING: f64 = 500.0;

const COLUMNS: &[Column] = &[
    Column::new("id", "ID"),
    Column::new("name", "Name"),
    Column::new("description", "Description"),
    Column::new("price", "Price"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Body of a product create/update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Price badge shown next to each product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PriceTier {
    Low,
    Medium,
    High,
}

impl PriceTier {
    pub fn for_price(price: f64) -> Self {
        if price < LOW_PRICE_CEILING {
            Self::Low
        } else if price < MEDIUM_PRICE_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl Product {
    pub fn price_tier(&self) -> PriceTier {
        PriceTier::for_price(self.price)
    }

    fn seeded(id: i64, name: &str, description: &str, price: f64) -> Self {
        Self {
            id: ResourceId::new(id),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

impl Resource for Product {
    type Draft = ProductDraft;

    const KIND: ResourceKind = ResourceKind::Product;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn from_draft(id: ResourceId, draft: ProductDraft, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
        }
    }

    fn apply_draft(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
    }

    fn keep_immutable_fields(&mut self, previous: &Self) {
        self.id = previous.id;
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft::new(self.name.clone(), self.description.clone(), self.price)
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            format!("{:.2}", self.price),
        ]
    }

    fn report_cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            format!("${:.2}", self.price),
        ]
    }

    fn form_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::new("name", "Name")
                .required()
                .max_length(20)
                .whitespace(),
            FieldSpec::new("description", "Description")
                .required()
                .max_length(30)
                .whitespace(),
            FieldSpec::new("price", "Price")
                .required()
                .min(0.01)
                .currency("$"),
        ])
    }

    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("name".to_owned(), self.name.clone()),
            ("description".to_owned(), self.description.clone()),
            ("price".to_owned(), self.price.to_string()),
        ])
    }

    fn draft_from_form(values: &FormValues) -> Result<ProductDraft, CoreError> {
        let price = form_text(values, "price")
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| CoreError::Validation {
                message: "Price must be a valid number".into(),
            })?;
        Ok(ProductDraft::new(
            form_text(values, "name"),
            form_text(values, "description"),
            price,
        ))
    }

    fn seed() -> Vec<Self> {
        vec![
            Self::seeded(1, "Laptop", "14-inch ultrabook", 1299.99),
            Self::seeded(2, "Wireless Mouse", "Ergonomic 2.4 GHz mouse", 25.50),
            Self::seeded(3, "Keyboard", "Mechanical, brown switches", 79.99),
            Self::seeded(4, "Monitor", "27-inch 4K IPS display", 349.00),
            Self::seeded(5, "Headphones", "Noise cancelling, over-ear", 149.90),
            Self::seeded(6, "USB Hub", "7-port USB 3.0 hub", 19.99),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn price_tiers() {
        assert_eq!(PriceTier::for_price(49.99), PriceTier::Low);
        assert_eq!(PriceTier::for_price(99.99), PriceTier::Low);
        assert_eq!(PriceTier::for_price(100.0), PriceTier::Medium);
        assert_eq!(PriceTier::for_price(499.99), PriceTier::Medium);
        assert_eq!(PriceTier::for_price(500.0), PriceTier::High);
        assert_eq!(PriceTier::High.to_string(), "high");
    }

    #[test]
    fn wire_format_round_trips_camel_case() {
        let json = r#"{"id":3,"name":"Keyboard","description":"Mechanical","price":79.99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ResourceId::new(3));
        assert_eq!(product.price_tier(), PriceTier::Low);

        let draft = serde_json::to_value(product.to_draft()).unwrap();
        assert!(draft.get("id").is_none());
    }

    #[test]
    fn draft_from_form_trims_values() {
        let values = FormValues::from([
            ("name".to_owned(), "  Webcam ".to_owned()),
            ("description".to_owned(), "HD webcam".to_owned()),
            ("price".to_owned(), " 49.99".to_owned()),
        ]);
        let draft = Product::draft_from_form(&values).unwrap();
        assert_eq!(draft, ProductDraft::new("Webcam", "HD webcam", 49.99));
    }

    #[test]
    fn infinite_price_is_rejected() {
        for price in ["inf", "1e999"] {
            let values = FormValues::from([
                ("name".to_owned(), "Webcam".to_owned()),
                ("description".to_owned(), "HD webcam".to_owned()),
                ("price".to_owned(), price.to_owned()),
            ]);
            let fields: Vec<_> = Product::form_schema()
                .validate(&values)
                .iter()
                .map(|e| e.field)
                .collect();
            assert_eq!(fields, vec!["price"], "{price}");
            assert!(Product::draft_from_form(&values).is_err(), "{price}");
        }
    }

    #[test]
    fn report_cells_format_price_as_currency() {
        let product = Product::seed().remove(0);
        assert_eq!(product.report_cells()[3], "$1299.99");
        assert_eq!(product.cells()[3], "1299.99");
    }

    #[test]
    fn seed_fits_form_bounds() {
        let schema = Product::form_schema();
        for product in Product::seed() {
            assert!(schema.validate(&product.form_values()).is_empty(), "{product:?}");
        }
    }
}
