// ── List controller ──
//
// Headless state machine behind one resource screen: bound rows, filter
// and sort, the create/edit/view modal with its form, confirmed deletion
// and exports. Every outcome is reported through the injected notifier.

mod confirm;
mod messages;
mod modal;
mod table;

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::model::{Resource, ResourceId};
use crate::notifier::{ERROR_TTL, Notification, Notifier};
use crate::store::{ResourceStore, Snapshot};
use crate::stream::ResourceStream;
use crate::validation::{FieldError, FormState, SubmitError};

pub use confirm::{AutoConfirm, Confirm, ConfirmPrompt};
pub use modal::{ModalMode, ModalState};
pub use table::{SortOrder, SortState, TableView};

/// Result of saving the modal form.
#[derive(Debug)]
pub enum SaveOutcome<R> {
    Created(Arc<R>),
    Updated(Arc<R>),
    /// The backend has no record with the selected id.
    NotFound,
    /// Blocked by form validation; nothing was sent.
    Invalid(Vec<FieldError>),
    Failed(CoreError),
    /// View mode, or edit mode without a selection.
    Ignored,
}

/// Result of a delete request.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    /// The backend had no record with that id.
    NotFound,
    /// The user rejected the confirmation prompt.
    Declined,
    Failed(CoreError),
}

pub struct ListController<R: Resource> {
    store: Arc<ResourceStore<R>>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    rows: ResourceStream<R>,
    modal: ModalState<R>,
    form: FormState,
    table: TableView,
    loading: watch::Sender<bool>,
}

/// Holds the loading flag up while a backend call is in flight.
struct InFlight<'a>(&'a watch::Sender<bool>);

impl<'a> InFlight<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl<R: Resource> ListController<R> {
    /// Bind a controller to `store`. The bound rows follow every store
    /// mutation from then on.
    pub fn new(
        store: Arc<ResourceStore<R>>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            rows: store.observe(),
            store,
            notifier,
            confirm,
            modal: ModalState::default(),
            form: FormState::new(R::form_schema()),
            table: TableView::default(),
            loading: watch::Sender::new(false),
        }
    }

    pub fn store(&self) -> &Arc<ResourceStore<R>> {
        &self.store
    }

    /// True while a create, update or delete awaits the backend.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Receiver for the loading flag, for spinners that run while
    /// `submit` or `delete_resource` is pending.
    pub fn loading_signal(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Every bound row, unfiltered.
    pub fn rows(&self) -> Snapshot<R> {
        self.rows.latest()
    }

    /// Rows after filter and sort, as displayed.
    pub fn visible_rows(&self) -> Vec<Arc<R>> {
        self.table.apply(&self.rows())
    }

    // ── Modal ────────────────────────────────────────────────────────

    pub fn modal(&self) -> &ModalState<R> {
        &self.modal
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn add_resource(&mut self) {
        self.modal.open(ModalMode::Create, None);
        self.form = FormState::new(R::form_schema());
    }

    pub fn edit_resource(&mut self, item: Arc<R>) {
        self.form = FormState::with_values(R::form_schema(), item.form_values());
        self.modal.open(ModalMode::Edit, Some(item));
    }

    pub fn view_resource(&mut self, item: Arc<R>) {
        self.form = FormState::with_values(R::form_schema(), item.form_values()).read_only(true);
        self.modal.open(ModalMode::View, Some(item));
    }

    pub fn on_close(&mut self) {
        self.modal.close();
        self.form = FormState::new(R::form_schema());
    }

    /// Validate the modal form and save it.
    pub async fn submit(&mut self) -> SaveOutcome<R> {
        let values = match self.form.submit() {
            Ok(values) => values,
            Err(SubmitError::ReadOnly) => return SaveOutcome::Ignored,
            Err(SubmitError::Invalid(errors)) => {
                debug!(kind = %R::KIND, invalid = errors.len(), "submission blocked");
                return SaveOutcome::Invalid(errors);
            }
        };
        match R::draft_from_form(&values) {
            Ok(draft) => self.on_save(draft).await,
            Err(e) => {
                self.notifier.notify(Notification::error(e.user_message()));
                SaveOutcome::Failed(e)
            }
        }
    }

    /// Send `draft` according to the modal mode.
    ///
    /// On success the bound rows already hold the change and the modal
    /// closes; on failure the modal stays open.
    pub async fn on_save(&mut self, draft: R::Draft) -> SaveOutcome<R> {
        let kind = R::KIND;
        match self.modal.mode() {
            ModalMode::View => SaveOutcome::Ignored,
            ModalMode::Create => {
                let result = {
                    let _in_flight = InFlight::start(&self.loading);
                    self.store.create(&draft).await
                };
                match result {
                    Ok(created) => {
                        self.on_close();
                        self.notifier.notify(Notification::success(messages::created(kind)));
                        SaveOutcome::Created(created)
                    }
                    Err(e) => {
                        self.report_failure(&e, messages::create_failed(kind));
                        SaveOutcome::Failed(e)
                    }
                }
            }
            ModalMode::Edit => {
                let Some(id) = self.modal.selected().map(|s| s.id()) else {
                    return SaveOutcome::Ignored;
                };
                let result = {
                    let _in_flight = InFlight::start(&self.loading);
                    self.store.update(id, &draft).await
                };
                match result {
                    Ok(Some(updated)) => {
                        self.on_close();
                        self.notifier.notify(Notification::success(messages::updated(kind)));
                        SaveOutcome::Updated(updated)
                    }
                    Ok(None) => {
                        self.notifier.notify(Notification::error(messages::not_found(kind)));
                        SaveOutcome::NotFound
                    }
                    Err(e) => {
                        self.report_failure(&e, messages::update_failed(kind));
                        SaveOutcome::Failed(e)
                    }
                }
            }
        }
    }

    // ── Deletion ─────────────────────────────────────────────────────

    /// Ask for confirmation, then delete `id`.
    pub async fn delete_resource(&mut self, id: ResourceId) -> DeleteOutcome {
        let kind = R::KIND;
        if !self.confirm.confirm(&ConfirmPrompt::delete(kind)) {
            debug!(%kind, %id, "deletion declined");
            return DeleteOutcome::Declined;
        }

        let result = {
            let _in_flight = InFlight::start(&self.loading);
            self.store.delete(id).await
        };
        match result {
            Ok(true) => {
                self.notifier.notify(Notification::success(messages::deleted(kind)));
                DeleteOutcome::Deleted
            }
            Ok(false) => {
                self.notifier
                    .notify(Notification::error(messages::delete_refused(kind)));
                DeleteOutcome::NotFound
            }
            Err(e) => {
                self.report_failure(&e, messages::delete_failed(kind));
                DeleteOutcome::Failed(e)
            }
        }
    }

    // ── Filter & sort ────────────────────────────────────────────────

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn on_global_filter(&mut self, text: impl Into<String>) {
        self.table.set_filter(text);
    }

    pub fn clear_filter(&mut self) {
        self.table.clear();
    }

    pub fn sort_by(&mut self, key: &str, order: SortOrder) -> Result<(), CoreError> {
        self.table.sort_by_key::<R>(key, order)
    }

    // ── Export ───────────────────────────────────────────────────────

    /// CSV of the rows currently displayed (filtered and sorted).
    pub fn export_csv(&self) -> Result<ExportArtifact, CoreError> {
        let result = export::export_csv(&self.visible_rows());
        self.report_export(ExportFormat::Csv, result)
    }

    /// PDF report of the full loaded collection.
    pub fn export_pdf(&self, generated_on: NaiveDate) -> Result<ExportArtifact, CoreError> {
        let result = export::export_pdf(&self.rows(), generated_on);
        self.report_export(ExportFormat::Pdf, result)
    }

    fn report_export(
        &self,
        format: ExportFormat,
        result: Result<ExportArtifact, CoreError>,
    ) -> Result<ExportArtifact, CoreError> {
        let label = format.extension().to_uppercase();
        match &result {
            Ok(_) => self
                .notifier
                .notify(Notification::success(messages::exported(R::KIND, &label))),
            Err(e) => {
                warn!(kind = %R::KIND, %format, error = %e, "export failed");
                self.notifier
                    .notify(Notification::error(messages::export_failed(R::KIND, &label)));
            }
        }
        result
    }

    /// Emit the classified backend error, then the screen's own message.
    fn report_failure(&self, error: &CoreError, message: String) {
        warn!(kind = %R::KIND, error = %error, "operation failed");
        if matches!(error, CoreError::Api { .. }) {
            self.notifier
                .notify(Notification::error(error.user_message()).with_ttl(ERROR_TTL));
        }
        self.notifier.notify(Notification::error(message));
    }
}
