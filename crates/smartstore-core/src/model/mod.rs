// ── Domain model ──
//
// Products and categories share one generic CRUD stack through the
// `Resource` trait.

mod category;
mod product;
mod resource;
mod resource_id;
pub mod timestamp;

pub use category::{Category, CategoryDraft, Recency};
pub use product::{LOW_PRICE_CEILING, MEDIUM_PRICE_CEILING, PriceTier, Product, ProductDraft};
pub use resource::{Column, Resource, ResourceKind, column_index};
pub use resource_id::ResourceId;
