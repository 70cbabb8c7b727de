// Notification texts shared by both resource screens.

use crate::model::ResourceKind;

pub(crate) fn created(kind: ResourceKind) -> String {
    format!("{} created successfully", kind.title())
}

pub(crate) fn create_failed(kind: ResourceKind) -> String {
    format!("Error creating {kind}. Please try again.")
}

pub(crate) fn updated(kind: ResourceKind) -> String {
    format!("{} updated successfully", kind.title())
}

pub(crate) fn not_found(kind: ResourceKind) -> String {
    format!("{} not found", kind.title())
}

pub(crate) fn update_failed(kind: ResourceKind) -> String {
    format!("Error updating {kind}. Please try again.")
}

pub(crate) fn deleted(kind: ResourceKind) -> String {
    format!("{} deleted successfully", kind.title())
}

pub(crate) fn delete_refused(kind: ResourceKind) -> String {
    format!("Could not delete the {kind}")
}

pub(crate) fn delete_failed(kind: ResourceKind) -> String {
    format!("Error deleting the {kind}. Please try again.")
}

pub(crate) fn exported(kind: ResourceKind, format: &str) -> String {
    format!("{} exported to {format} successfully", kind.title_plural())
}

pub(crate) fn export_failed(kind: ResourceKind, format: &str) -> String {
    format!("Error exporting {} to {format}. Please try again.", kind.plural())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texts() {
        assert_eq!(created(ResourceKind::Product), "Product created successfully");
        assert_eq!(
            create_failed(ResourceKind::Category),
            "Error creating category. Please try again."
        );
        assert_eq!(delete_refused(ResourceKind::Product), "Could not delete the product");
        assert_eq!(
            exported(ResourceKind::Product, "CSV"),
            "Products exported to CSV successfully"
        );
        assert_eq!(
            export_failed(ResourceKind::Category, "PDF"),
            "Error exporting categories to PDF. Please try again."
        );
    }
}
