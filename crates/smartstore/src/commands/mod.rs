//! Command dispatch: bridges CLI args -> list controllers -> output formatting.

pub mod categories;
pub mod config_cmd;
pub mod products;
pub mod resource;
pub mod summary;
pub mod util;

use std::sync::Arc;

use smartstore_core::{Category, ListController, Product, Session};

use crate::cli::{Command, GlobalOpts};
use crate::console::{ConsoleNotifier, PromptConfirm};
use crate::error::CliError;
use crate::output;

/// What every session-bound handler needs besides its arguments.
pub struct Context {
    pub session: Session,
    pub notifier: Arc<ConsoleNotifier>,
    pub confirm: Arc<PromptConfirm>,
    pub color: bool,
}

impl Context {
    pub fn new(session: Session, global: &GlobalOpts) -> Self {
        let color = output::should_color(&global.color);
        Self {
            session,
            notifier: Arc::new(ConsoleNotifier::new(color, global.quiet)),
            confirm: Arc::new(PromptConfirm::new(global.yes)),
            color,
        }
    }

    pub fn products(&self) -> ListController<Product> {
        self.session
            .product_controller(self.notifier.clone(), self.confirm.clone())
    }

    pub fn categories(&self) -> ListController<Category> {
        self.session
            .category_controller(self.notifier.clone(), self.confirm.clone())
    }
}

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(ctx, args, global).await,
        Command::Categories(args) => categories::handle(ctx, args, global).await,
        Command::Summary => summary::handle(ctx, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
