use std::io::Read;

use super::{ManifestError, HASH_COLUMN, MANIFEST_COLUMNS};
use crate::scanner::FileRecord;

/// Parse a manifest produced by [`super::write_manifest`].
///
/// Accepts both the four-column and the hashed five-column layout. An empty
/// `sha256` cell reads back as `None`.
pub fn read_manifest<R: Read>(mut reader: R) -> Result<Vec<FileRecord>, ManifestError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut rows = parse_rows(&content)?.into_iter();

    let header = rows.next().ok_or_else(|| ManifestError::InvalidHeader {
        found: String::new(),
    })?;
    let include_hash = match header.len() {
        4 => false,
        5 if header[4] == HASH_COLUMN => true,
        _ => {
            return Err(ManifestError::InvalidHeader {
                found: header.join(","),
            })
        }
    };
    if header[..4] != MANIFEST_COLUMNS {
        return Err(ManifestError::InvalidHeader {
            found: header.join(","),
        });
    }

    let width = header.len();
    rows.enumerate()
        .map(|(i, fields)| record_from(fields, width, include_hash, i + 2))
        .collect()
}

fn record_from(
    mut fields: Vec<String>,
    width: usize,
    include_hash: bool,
    line: usize,
) -> Result<FileRecord, ManifestError> {
    if fields.len() != width {
        return Err(ManifestError::MalformedRow {
            line,
            message: format!("expected {} fields, found {}", width, fields.len()),
        });
    }

    let content_hash = if include_hash {
        fields.pop().filter(|hash| !hash.is_empty())
    } else {
        None
    };
    let size_bytes = fields[3]
        .parse::<u64>()
        .map_err(|e| ManifestError::MalformedRow {
            line,
            message: format!("invalid size {:?}: {}", fields[3], e),
        })?;

    let mut fields = fields.into_iter();
    Ok(FileRecord {
        filename: fields.next().unwrap_or_default(),
        extension: fields.next().unwrap_or_default(),
        relative_path: fields.next().unwrap_or_default(),
        size_bytes,
        content_hash,
    })
}

/// Split CSV text into rows of unquoted fields
fn parse_rows(content: &str) -> Result<Vec<Vec<String>>, ManifestError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ManifestError::MalformedRow {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}
