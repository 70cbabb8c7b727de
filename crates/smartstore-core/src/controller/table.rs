// Global filter and column sort over the bound rows.

use std::cmp::Ordering;
use std::sync::Arc;

use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::{Resource, column_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub order: SortOrder,
}

/// Filter text and sort column of a list table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    filter: String,
    sort: Option<SortState>,
}

impl TableView {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn sort_by(&mut self, column: usize, order: SortOrder) {
        self.sort = Some(SortState { column, order });
    }

    /// Sort by a column key or header (`price`, `Created At`).
    pub fn sort_by_key<R: Resource>(&mut self, key: &str, order: SortOrder) -> Result<(), CoreError> {
        let column = column_index::<R>(key).ok_or_else(|| CoreError::Validation {
            message: format!(
                "unknown column '{key}' (expected one of: {})",
                R::columns()
                    .iter()
                    .map(|c| c.key)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })?;
        self.sort_by(column, order);
        Ok(())
    }

    /// Reset filter and sort to their defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Rows matching the filter, in sort order.
    ///
    /// Matching is a case-insensitive substring test against every visible
    /// cell. Sorting is stable and numeric when both cells parse as numbers.
    pub fn apply<R: Resource>(&self, rows: &[Arc<R>]) -> Vec<Arc<R>> {
        let needle = self.filter.to_lowercase();
        let mut keyed: Vec<(Vec<String>, &Arc<R>)> = rows
            .iter()
            .map(|r| (r.cells(), r))
            .filter(|(cells, _)| {
                needle.is_empty() || cells.iter().any(|c| c.to_lowercase().contains(&needle))
            })
            .collect();

        if let Some(SortState { column, order }) = self.sort {
            keyed.sort_by(|(a, _), (b, _)| {
                let ordering = compare_cells(a.get(column), b.get(column));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        keyed.into_iter().map(|(_, r)| Arc::clone(r)).collect()
    }
}

fn compare_cells(a: Option<&String>, b: Option<&String>) -> Ordering {
    let (a, b) = (a.map_or("", String::as_str), b.map_or("", String::as_str));
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Product;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Arc<Product>> {
        Product::seed().into_iter().map(Arc::new).collect()
    }

    fn names(rows: &[Arc<Product>]) -> Vec<&str> {
        rows.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn filter_is_case_insensitive_across_columns() {
        let mut view = TableView::default();
        view.set_filter("KEYB");
        assert_eq!(names(&view.apply(&rows())), vec!["Keyboard"]);

        view.set_filter("usb");
        assert_eq!(names(&view.apply(&rows())), vec!["USB Hub"]);

        view.set_filter("1299");
        assert_eq!(view.apply(&rows()).len(), 1);
    }

    #[test]
    fn sort_is_numeric_aware() {
        let mut view = TableView::default();
        view.sort_by_key::<Product>("price", SortOrder::Ascending).unwrap();
        let sorted = view.apply(&rows());
        assert_eq!(sorted.first().unwrap().name, "USB Hub");
        assert_eq!(sorted.last().unwrap().name, "Laptop");

        view.sort_by_key::<Product>("Name", SortOrder::Descending).unwrap();
        assert_eq!(view.apply(&rows())[0].name, "Wireless Mouse");
    }

    #[test]
    fn unknown_sort_column() {
        let mut view = TableView::default();
        let err = view
            .sort_by_key::<Product>("colour", SortOrder::Ascending)
            .unwrap_err();
        assert!(err.to_string().contains("id, name, description, price"));
    }

    #[test]
    fn clear_restores_defaults() {
        let mut view = TableView::default();
        view.set_filter("mouse");
        view.sort_by(3, SortOrder::Descending);
        view.clear();
        assert_eq!(view, TableView::default());
        assert_eq!(view.apply(&rows()).len(), 6);
    }
}
