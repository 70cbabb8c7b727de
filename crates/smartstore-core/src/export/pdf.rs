// ── PDF table report ──
//
// A4 portrait, Helvetica, one table: title, "Generated on" line, a filled
// header row repeated on every page, and alternating row shading. Rows
// that overflow continue on further pages.

use std::sync::Arc;

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::CoreError;
use crate::model::Resource;

// Dimensions in PDF points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 40;
const TITLE_SIZE: i64 = 18;
const SUBTITLE_SIZE: i64 = 11;
const FONT_SIZE: i64 = 10;
const ROW_HEIGHT: i64 = 20;
const CELL_PADDING: i64 = 6;
const ID_COLUMN_WIDTH: i64 = 45;
const TITLE_BASELINE: i64 = PAGE_HEIGHT - 62;
const SUBTITLE_BASELINE: i64 = PAGE_HEIGHT - 85;
const FIRST_TABLE_TOP: i64 = PAGE_HEIGHT - 113;
const TABLE_TOP: i64 = PAGE_HEIGHT - MARGIN;

macro_rules! fill_rgb {
    ($r:literal, $g:literal, $b:literal) => {
        Operation::new(
            "rg",
            vec![Object::Real($r), Object::Real($g), Object::Real($b)],
        )
    };
}

fn export_error(e: impl std::fmt::Display) -> CoreError {
    CoreError::Export {
        message: e.to_string(),
    }
}

/// Content of a single-table report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub title: String,
    pub generated_on: NaiveDate,
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
}

impl TableReport {
    /// Report over `rows` with the resource's title and columns.
    pub fn for_resources<R: Resource>(rows: &[Arc<R>], generated_on: NaiveDate) -> Self {
        Self {
            title: R::KIND.report_title(),
            generated_on,
            head: R::columns().iter().map(|c| c.header.to_owned()).collect(),
            body: rows.iter().map(|r| r.report_cells()).collect(),
        }
    }

    /// Body rows plus the header row.
    pub fn row_count(&self) -> usize {
        self.body.len() + 1
    }

    pub fn subtitle(&self) -> String {
        format!("Generated on: {}", self.generated_on.format("%Y-%m-%d"))
    }

    /// Body rows split per page. There is always at least one page.
    pub fn pages(&self) -> Vec<&[Vec<String>]> {
        let mut pages = Vec::new();
        let mut remaining = self.body.as_slice();
        let mut capacity = rows_fitting(FIRST_TABLE_TOP);
        loop {
            let (page, rest) = remaining.split_at(capacity.min(remaining.len()));
            pages.push(page);
            if rest.is_empty() {
                return pages;
            }
            remaining = rest;
            capacity = rows_fitting(TABLE_TOP);
        }
    }

    /// Render the report as PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>, CoreError> {
        let widths = column_widths(self.head.len());
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => regular, "F2" => bold },
        });

        let mut kids: Vec<Object> = Vec::new();
        for (index, rows) in self.pages().into_iter().enumerate() {
            let mut ops = Vec::new();
            let mut top = TABLE_TOP;
            if index == 0 {
                text(&mut ops, "F2", TITLE_SIZE, MARGIN, TITLE_BASELINE, &self.title);
                text(&mut ops, "F1", SUBTITLE_SIZE, MARGIN, SUBTITLE_BASELINE, &self.subtitle());
                top = FIRST_TABLE_TOP;
            }

            ops.push(fill_rgb!(0.161, 0.502, 0.725));
            table_row(&mut ops, &widths, top, &self.head, RowStyle::Header);
            for (i, row) in rows.iter().enumerate() {
                top -= ROW_HEIGHT;
                let style = if i % 2 == 1 {
                    ops.push(fill_rgb!(0.961, 0.961, 0.961));
                    RowStyle::Shaded
                } else {
                    RowStyle::Plain
                };
                table_row(&mut ops, &widths, top, row, style);
            }

            let content = Content { operations: ops };
            let encoded = content.encode().map_err(export_error)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = i64::try_from(kids.len()).map_err(export_error)?;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(export_error)?;
        Ok(bytes)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RowStyle {
    Header,
    Shaded,
    Plain,
}

/// Body rows that fit below `top`, leaving room for the header row.
fn rows_fitting(top: i64) -> usize {
    usize::try_from((top - MARGIN) / ROW_HEIGHT - 1)
        .unwrap_or(1)
        .max(1)
}

/// A narrow first (id) column, the rest sharing the remaining width.
fn column_widths(columns: usize) -> Vec<i64> {
    let table = PAGE_WIDTH - 2 * MARGIN;
    let Some(rest) = columns.checked_sub(1).filter(|n| *n > 0) else {
        return vec![table; columns];
    };
    let rest = i64::try_from(rest).unwrap_or(1);
    let share = (table - ID_COLUMN_WIDTH) / rest;
    std::iter::once(ID_COLUMN_WIDTH)
        .chain(std::iter::repeat_n(share, usize::try_from(rest).unwrap_or(0)))
        .collect()
}

/// Draw one row whose top edge is at `top`. Fill colour for header and
/// shaded rows must already be set.
fn table_row(ops: &mut Vec<Operation>, widths: &[i64], top: i64, cells: &[String], style: RowStyle) {
    let bottom = top - ROW_HEIGHT;
    if style != RowStyle::Plain {
        let width: i64 = widths.iter().sum();
        ops.push(Operation::new(
            "re",
            vec![
                Object::Integer(MARGIN),
                Object::Integer(bottom),
                Object::Integer(width),
                Object::Integer(ROW_HEIGHT),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    if style == RowStyle::Header {
        ops.push(fill_rgb!(1.0, 1.0, 1.0));
    } else {
        ops.push(fill_rgb!(0.314, 0.314, 0.314));
    }
    let font = if style == RowStyle::Header { "F2" } else { "F1" };

    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(widths) {
        let fitted = fit(cell, *width - 2 * CELL_PADDING);
        text(ops, font, FONT_SIZE, x + CELL_PADDING, bottom + 7, &fitted);
        x += width;
    }
}

fn text(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, value: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), Object::Integer(size)]));
    ops.push(Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(latin1(value))]));
    ops.push(Operation::new("ET", vec![]));
}

/// Truncate `value` to roughly fit `width` points of 10pt Helvetica.
fn fit(value: &str, width: i64) -> String {
    // Average Helvetica glyph is about half the font size wide.
    let max = usize::try_from(width * 2 / FONT_SIZE).unwrap_or(0);
    if value.chars().count() <= max {
        return value.to_owned();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// WinAnsi-compatible bytes; characters outside Latin-1 become `?`.
fn latin1(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Category, Product, ProductDraft, ResourceId};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    #[test]
    fn category_report_has_header_plus_six_rows() {
        let rows: Vec<_> = Category::seed().into_iter().map(Arc::new).collect();
        let report = TableReport::for_resources(&rows, date());

        assert_eq!(report.title, "Categories Report");
        assert_eq!(report.head, vec!["ID", "Name", "Description", "Created At"]);
        assert_eq!(report.body.len(), 6);
        assert_eq!(report.row_count(), 7);
        assert_eq!(report.subtitle(), "Generated on: 2024-07-01");

        let bytes = report.render().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert!(contains(&bytes, "Categories Report"));
        assert!(contains(&bytes, "Generated on: 2024-07-01"));
    }

    #[test]
    fn overflow_continues_on_new_pages() {
        let rows: Vec<_> = (1..=80)
            .map(|i| {
                Arc::new(Product::from_draft(
                    ResourceId::new(i),
                    ProductDraft::new(format!("Item {i}"), "bulk", 1.0),
                    Utc::now(),
                ))
            })
            .collect();
        let report = TableReport::for_resources(&rows, date());
        let pages = report.pages();
        assert!(pages.len() > 1);
        assert_eq!(pages.iter().map(|p| p.len()).sum::<usize>(), 80);

        let doc = Document::load_mem(&report.render().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
    }

    #[test]
    fn empty_report_still_renders_one_page() {
        let report = TableReport::for_resources::<Product>(&[], date());
        assert_eq!(report.pages().len(), 1);
        let doc = Document::load_mem(&report.render().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn long_cells_are_truncated() {
        let fitted = fit(&"x".repeat(100), 100);
        assert!(fitted.ends_with("..."));
        assert_eq!(fitted.chars().count(), 20);
        assert_eq!(fit("short", 100), "short");
    }

    #[test]
    fn widths_fill_the_table() {
        let widths = column_widths(4);
        assert_eq!(widths[0], ID_COLUMN_WIDTH);
        assert!(widths.iter().sum::<i64>() <= PAGE_WIDTH - 2 * MARGIN);
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        assert_eq!(latin1("Café ☕"), b"Caf\xe9 ?".to_vec());
    }
}
