// Modal lifecycle for the create/edit/view form.

use std::sync::Arc;

use strum::{Display, IntoStaticStr};

use crate::model::{Resource, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
    View,
}

impl ModalMode {
    /// `Create Product`, `Edit Category`, ...
    pub fn header(self, kind: ResourceKind) -> String {
        let verb = match self {
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::View => "View",
        };
        format!("{verb} {}", kind.title())
    }
}

#[derive(Debug, Clone)]
pub struct ModalState<R> {
    mode: ModalMode,
    visible: bool,
    selected: Option<Arc<R>>,
}

impl<R> Default for ModalState<R> {
    fn default() -> Self {
        Self {
            mode: ModalMode::Create,
            visible: false,
            selected: None,
        }
    }
}

impl<R: Resource> ModalState<R> {
    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<&Arc<R>> {
        self.selected.as_ref()
    }

    pub fn header(&self) -> String {
        self.mode.header(R::KIND)
    }

    pub(crate) fn open(&mut self, mode: ModalMode, selected: Option<Arc<R>>) {
        self.mode = mode;
        self.selected = selected;
        self.visible = true;
    }

    pub(crate) fn close(&mut self) {
        *self = Self::default();
    }
}
