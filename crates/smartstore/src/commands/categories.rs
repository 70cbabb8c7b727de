//! Category command handlers.

use crate::cli::{CategoriesArgs, CategoriesCommand, CategoryFields, GlobalOpts};
use crate::error::CliError;

use super::{Context, resource, util};

fn fields(f: CategoryFields) -> [(&'static str, Option<String>); 2] {
    [("name", f.name), ("description", f.description)]
}

pub async fn handle(
    ctx: &Context,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let controller = ctx.categories();
    match args.command {
        CategoriesCommand::List(list) => resource::list(controller, &list, global),
        CategoriesCommand::Get { id } => resource::get(controller, id, ctx, global).await,
        CategoriesCommand::Create {
            fields: f,
            from_file,
        } => {
            let values = util::merge_fields(from_file.as_deref(), fields(f))?;
            resource::save(controller, None, values, ctx, global).await
        }
        CategoriesCommand::Update {
            id,
            fields: f,
            from_file,
        } => {
            let values = util::merge_fields(from_file.as_deref(), fields(f))?;
            resource::save(controller, Some(id), values, ctx, global).await
        }
        CategoriesCommand::Delete { id } => resource::delete(controller, id, ctx, global).await,
        CategoriesCommand::Export(export) => resource::export(controller, &export, global),
    }
}
