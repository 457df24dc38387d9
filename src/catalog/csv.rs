//! Minimal CSV reader for the ingredient catalog.
//!
//! Handles a header row, quoted fields with `""` escapes and CRLF line
//! endings. Quoted fields spanning several lines are not supported.

use crate::error::{CatalogErrorKind, Result, ScoopError};

/// Header name of the group column.
pub const GROUP_COLUMN: &str = "classification";

/// Header name of the ingredient column.
pub const INGREDIENT_COLUMN: &str = "ingredient";

/// One usable catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub group: String,
    pub ingredient: String,
}

/// Parse catalog CSV content into rows.
///
/// Rows with an empty group or ingredient are skipped with a warning;
/// extra columns are ignored.
pub fn parse_catalog_csv(content: &str) -> Result<Vec<CatalogRow>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err(ScoopError::catalog("reading header", CatalogErrorKind::Empty));
    };

    let header = split_record(header)
        .map_err(|message| malformed(header_line, message))?;
    let group_idx = column_index(&header, GROUP_COLUMN)?;
    let ingredient_idx = column_index(&header, INGREDIENT_COLUMN)?;

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let fields = split_record(line).map_err(|message| malformed(line_no, message))?;

        let group = fields.get(group_idx).map_or("", |s| s.trim());
        let ingredient = fields.get(ingredient_idx).map_or("", |s| s.trim());
        if group.is_empty() || ingredient.is_empty() {
            tracing::warn!("skipping catalog line {line_no}: empty group or ingredient");
            continue;
        }

        rows.push(CatalogRow {
            group: group.to_string(),
            ingredient: ingredient.to_string(),
        });
    }

    if rows.is_empty() {
        return Err(ScoopError::catalog("reading rows", CatalogErrorKind::Empty));
    }
    Ok(rows)
}

fn column_index(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            ScoopError::catalog(
                "reading header",
                CatalogErrorKind::MissingColumn(name.to_string()),
            )
        })
}

fn malformed(line: usize, message: &str) -> ScoopError {
    ScoopError::catalog(
        "reading rows",
        CatalogErrorKind::MalformedRow {
            line,
            message: message.to_string(),
        },
    )
}

/// Split a single CSV record into fields.
fn split_record(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field");
    }
    fields.push(field);
    Ok(fields)
}
