use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{ManifestError, HASH_COLUMN, MANIFEST_COLUMNS};
use crate::scanner::FileRecord;

/// Incremental manifest writer.
///
/// Rows are written as they arrive so a scan can stream straight to the sink.
pub struct ManifestWriter<W: Write> {
    sink: W,
    include_hash: bool,
    rows: usize,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(sink: W, include_hash: bool) -> Self {
        Self {
            sink,
            include_hash,
            rows: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<(), ManifestError> {
        let mut columns: Vec<&str> = MANIFEST_COLUMNS.to_vec();
        if self.include_hash {
            columns.push(HASH_COLUMN);
        }
        self.write_row(&columns)
    }

    pub fn write_record(&mut self, record: &FileRecord) -> Result<(), ManifestError> {
        let size = record.size_bytes.to_string();
        let mut fields = vec![
            record.filename.as_str(),
            record.extension.as_str(),
            record.relative_path.as_str(),
            size.as_str(),
        ];
        if self.include_hash {
            // Missing hash is an empty cell, not an error
            fields.push(record.content_hash.as_deref().unwrap_or(""));
        }
        self.write_row(&fields)?;
        self.rows += 1;
        Ok(())
    }

    /// Flush the sink and return the number of data rows written
    pub fn finish(mut self) -> Result<usize, ManifestError> {
        self.sink.flush()?;
        debug!(rows = self.rows, "Manifest complete");
        Ok(self.rows)
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<(), ManifestError> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b",")?;
            }
            write_field(&mut self.sink, field)?;
        }
        self.sink.write_all(b"\n")?;
        Ok(())
    }
}

fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

fn write_field<W: Write>(sink: &mut W, field: &str) -> std::io::Result<()> {
    if !needs_quoting(field) {
        return sink.write_all(field.as_bytes());
    }
    sink.write_all(b"\"")?;
    sink.write_all(field.replace('"', "\"\"").as_bytes())?;
    sink.write_all(b"\"")
}

/// Write a complete manifest and return the number of data rows
pub fn write_manifest<I, W>(records: I, sink: W, include_hash: bool) -> Result<usize, ManifestError>
where
    I: IntoIterator<Item = FileRecord>,
    W: Write,
{
    let mut writer = ManifestWriter::new(sink, include_hash);
    writer.write_header()?;
    for record in records {
        writer.write_record(&record)?;
    }
    writer.finish()
}

/// Write a manifest to `path`, fed by a fallible record source.
///
/// Output goes to a uniquely named temporary file in the same directory and is
/// persisted over `path` only once every record has been written, so a failed
/// scan leaves no file behind.
pub fn write_manifest_file<I, E>(records: I, path: &Path, include_hash: bool) -> Result<usize, E>
where
    I: IntoIterator<Item = Result<FileRecord, E>>,
    E: From<ManifestError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(ManifestError::from)?;

    // Dropping `temp` on error removes it
    let rows = write_rows(records, temp.as_file(), include_hash)?;

    temp.persist(path).map_err(|e| ManifestError::from(e.error))?;
    info!("Manifest written to: {:?}", path);
    Ok(rows)
}

fn write_rows<I, E>(records: I, file: &File, include_hash: bool) -> Result<usize, E>
where
    I: IntoIterator<Item = Result<FileRecord, E>>,
    E: From<ManifestError>,
{
    let mut writer = ManifestWriter::new(BufWriter::new(file), include_hash);
    writer.write_header()?;
    for record in records {
        writer.write_record(&record?)?;
    }
    Ok(writer.finish()?)
}
