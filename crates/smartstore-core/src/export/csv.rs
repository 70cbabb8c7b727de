// CSV rendering (RFC 4180, header row first).

use std::sync::Arc;

use crate::error::CoreError;
use crate::model::Resource;

fn export_error(e: impl std::fmt::Display) -> CoreError {
    CoreError::Export {
        message: e.to_string(),
    }
}

/// Render `rows` with a header of the resource's visible columns.
pub fn render_csv<R: Resource>(rows: &[Arc<R>]) -> Result<Vec<u8>, CoreError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer
        .write_record(R::columns().iter().map(|c| c.header))
        .map_err(export_error)?;
    for row in rows {
        writer.write_record(row.cells()).map_err(export_error)?;
    }
    writer.into_inner().map_err(export_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Category, Product, ProductDraft, ResourceId};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_and_rows() {
        let rows = vec![Arc::new(Product::from_draft(
            ResourceId::new(7),
            ProductDraft::new("Webcam", "HD webcam", 49.99),
            Utc::now(),
        ))];
        let out = String::from_utf8(render_csv(&rows).unwrap()).unwrap();
        assert_eq!(out, "ID,Name,Description,Price\n7,Webcam,HD webcam,49.99\n");
    }

    #[test]
    fn quotes_embedded_commas() {
        let rows: Vec<_> = Product::seed().into_iter().take(3).map(Arc::new).collect();
        let out = String::from_utf8(render_csv(&rows).unwrap()).unwrap();
        assert!(out.contains("\"Mechanical, brown switches\""));
    }

    #[test]
    fn empty_rows_still_have_header() {
        let out = String::from_utf8(render_csv::<Category>(&[]).unwrap()).unwrap();
        assert_eq!(out, "ID,Name,Description,Created At\n");
    }
}
