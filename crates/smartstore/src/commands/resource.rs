//! Handlers shared by the products and categories commands.
//!
//! Each handler drives a `ListController` the way the admin screen does:
//! filter and sort the bound rows, open the modal, fill the form, submit,
//! confirm deletions, export.

use std::sync::Arc;

use chrono::{Local, Utc};
use tokio::task::JoinHandle;
use smartstore_core::validation::FormValues;
use smartstore_core::{
    Category, DeleteOutcome, ExportFormat, ListController, PriceTier, Product, Resource,
    ResourceId, ResourceStore, SaveOutcome, SortOrder,
};

use crate::cli::{ExportArgs, GlobalOpts, ListArgs};
use crate::console;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Badges ──────────────────────────────────────────────────────────

/// Extra derived column shown after the resource's own columns.
pub trait Badge: Resource {
    const BADGE: &'static str;

    fn badge(&self) -> String;
}

impl Badge for Product {
    const BADGE: &'static str = "Tier";

    fn badge(&self) -> String {
        PriceTier::for_price(self.price).to_string()
    }
}

impl Badge for Category {
    const BADGE: &'static str = "Age";

    fn badge(&self) -> String {
        self.recency(Utc::now()).to_string()
    }
}

fn headers<R: Badge>() -> Vec<&'static str> {
    R::columns()
        .iter()
        .map(|c| c.header)
        .chain(std::iter::once(R::BADGE))
        .collect()
}

fn row_cells<R: Badge>(item: &Arc<R>) -> Vec<String> {
    let mut cells = item.cells();
    cells.push(item.badge());
    cells
}

fn detail<R: Badge>(item: &Arc<R>, color: bool) -> String {
    let cells = row_cells(item);
    let pairs: Vec<(&str, String)> = headers::<R>().into_iter().zip(cells).collect();
    output::detail_block(&pairs, color)
}

// ── Table state ─────────────────────────────────────────────────────

fn apply_list_args<R: Resource>(
    controller: &mut ListController<R>,
    args: &ListArgs,
) -> Result<(), CliError> {
    if let Some(ref text) = args.filter {
        controller.on_global_filter(text.clone());
    }
    if let Some(ref key) = args.sort {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        controller
            .sort_by(key, order)
            .map_err(|e| CliError::Validation {
                field: "sort".into(),
                reason: e.user_message(),
            })?;
    }
    Ok(())
}

/// Drop the controller, then let its loading spinner clear.
async fn settle<R: Resource>(controller: ListController<R>, spinner: Option<JoinHandle<()>>) {
    drop(controller);
    if let Some(task) = spinner {
        let _ = task.await;
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn list<R: Badge>(
    mut controller: ListController<R>,
    args: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    apply_list_args(&mut controller, args)?;
    let rows = controller.visible_rows();
    let out = output::render_list(
        &global.output,
        &rows,
        &headers::<R>(),
        row_cells::<R>,
        |r| r.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// The loaded record with `id`, falling back to the backend.
async fn find<R: Resource>(store: &ResourceStore<R>, id: ResourceId) -> Result<Arc<R>, CliError> {
    if let Some(item) = store.by_id(id) {
        return Ok(item);
    }
    store
        .get(id)
        .await
        .map(Arc::new)
        .map_err(|e| CliError::from_core(R::KIND, e))
}

pub async fn get<R: Badge>(
    controller: ListController<R>,
    id: i64,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let item = find(controller.store(), ResourceId::new(id)).await?;
    let out = output::render_single(
        &global.output,
        &item,
        |r| detail(r, ctx.color),
        |r| r.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Create (`id == None`) or update a record through the modal form.
pub async fn save<R: Badge>(
    mut controller: ListController<R>,
    id: Option<i64>,
    values: FormValues,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match id {
        None => controller.add_resource(),
        Some(id) => {
            let item = find(controller.store(), ResourceId::new(id)).await?;
            controller.edit_resource(item);
        }
    }
    for (field, value) in values {
        let _ = controller.form_mut().set(&field, value);
    }

    let spinner = console::follow_loading(controller.loading_signal(), "Saving...", global.quiet);
    let outcome = controller.submit().await;
    settle(controller, spinner).await;

    match outcome {
        SaveOutcome::Created(item) | SaveOutcome::Updated(item) => {
            let out = output::render_single(
                &global.output,
                &item,
                |r| detail(r, ctx.color),
                |r| r.id().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        SaveOutcome::NotFound => Err(CliError::not_found(
            R::KIND,
            id.map_or_else(String::new, |id| id.to_string()),
        )),
        SaveOutcome::Invalid(errors) => Err(util::validation_error(&errors)),
        SaveOutcome::Failed(e) => Err(CliError::from_core(R::KIND, e)),
        SaveOutcome::Ignored => Ok(()),
    }
}

pub async fn delete<R: Resource>(
    mut controller: ListController<R>,
    id: i64,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !ctx.confirm.can_prompt() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: format!("{} delete", R::KIND.plural()),
        });
    }
    let spinner = console::follow_loading(controller.loading_signal(), "Deleting...", global.quiet);
    let outcome = controller.delete_resource(ResourceId::new(id)).await;
    settle(controller, spinner).await;

    match outcome {
        DeleteOutcome::Deleted | DeleteOutcome::Declined => Ok(()),
        DeleteOutcome::NotFound => Err(CliError::not_found(R::KIND, id)),
        DeleteOutcome::Failed(e) => Err(CliError::from_core(R::KIND, e)),
    }
}

pub fn export<R: Resource>(
    mut controller: ListController<R>,
    args: &ExportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    apply_list_args(&mut controller, &args.list)?;
    let artifact = match args.format {
        ExportFormat::Csv => controller.export_csv(),
        ExportFormat::Pdf => controller.export_pdf(Local::now().date_naive()),
    }?;

    std::fs::create_dir_all(&args.out)?;
    let path = artifact.write_to_dir(&args.out)?;
    output::print_output(&path.display().to_string(), global.quiet);
    Ok(())
}
