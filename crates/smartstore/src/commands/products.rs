//! Product command handlers.

use crate::cli::{GlobalOpts, ProductFields, ProductsArgs, ProductsCommand};
use crate::error::CliError;

use super::{Context, resource, util};

fn fields(f: ProductFields) -> [(&'static str, Option<String>); 3] {
    [
        ("name", f.name),
        ("description", f.description),
        ("price", f.price),
    ]
}

pub async fn handle(ctx: &Context, args: ProductsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let controller = ctx.products();
    match args.command {
        ProductsCommand::List(list) => resource::list(controller, &list, global),
        ProductsCommand::Get { id } => resource::get(controller, id, ctx, global).await,
        ProductsCommand::Create {
            fields: f,
            from_file,
        } => {
            let values = util::merge_fields(from_file.as_deref(), fields(f))?;
            resource::save(controller, None, values, ctx, global).await
        }
        ProductsCommand::Update {
            id,
            fields: f,
            from_file,
        } => {
            let values = util::merge_fields(from_file.as_deref(), fields(f))?;
            resource::save(controller, Some(id), values, ctx, global).await
        }
        ProductsCommand::Delete { id } => resource::delete(controller, id, ctx, global).await,
        ProductsCommand::Export(export) => resource::export(controller, &export, global),
    }
}
