//! Resource stores and headless list controllers for SmartStore.
//!
//! This crate owns the domain model and the CRUD orchestration shared by the
//! products and categories screens:
//!
//! - **[`ResourceStore<R>`]**: the last acknowledged state of one
//!   collection. Loaded eagerly at construction, then mutated only by the
//!   outcome of successful create / update / delete calls. Observers either
//!   register a callback ([`subscribe`](ResourceStore::subscribe)) or await
//!   changes through a [`ResourceStream`].
//!
//! - **[`ResourceBackend<R>`]**: async seam between stores and storage:
//!   [`RemoteBackend`] over `smartstore-api`, or the seeded in-process
//!   [`MemoryBackend`].
//!
//! - **[`ListController<R>`]**: modal state machine (create / edit / view),
//!   confirmed deletion, global filter, column sort and CSV / PDF export.
//!   Outcomes go to an injected [`Notifier`].
//!
//! - **[`validation`]**: declarative field rules with touched / dirty form
//!   state.
//!
//! - **Domain model** ([`model`]): [`Product`] and [`Category`], both
//!   implementing the [`Resource`] trait.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod model;
pub mod notifier;
pub mod session;
pub mod store;
pub mod stream;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{MemoryBackend, RemoteBackend, ResourceBackend};
pub use config::{BackendConfig, BackendMode};
pub use controller::{
    AutoConfirm, Confirm, ConfirmPrompt, DeleteOutcome, ListController, ModalMode, SaveOutcome,
    SortOrder,
};
pub use error::CoreError;
pub use export::{ExportArtifact, ExportFormat};
pub use model::{
    Category, CategoryDraft, Column, PriceTier, Product, ProductDraft, Recency, Resource,
    ResourceId, ResourceKind,
};
pub use notifier::{Notification, Notifier, Severity};
pub use session::{Session, Summary};
pub use store::{ResourceStore, Snapshot, Subscription};
pub use stream::ResourceStream;

pub use smartstore_api::{ErrorKind, RetryPolicy};
