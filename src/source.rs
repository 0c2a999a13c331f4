//! Read delimiter-separated sheet exports (CSV, TSV) into a raw row grid.

use crate::error::ExportError;
use crate::sheet::Sheet;
use std::io::Read;
use std::path::Path;

/// Field delimiter for a file: tab for `.tsv` / `.txt`, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("txt") => b'\t',
        _ => b',',
    }
}

/// Read every row of a table file. Rows may have different lengths.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>, ExportError> {
    let file = std::fs::File::open(path)?;
    read_table_from(file, delimiter)
}

pub fn read_table_str(text: &str, delimiter: u8) -> Result<Vec<Vec<String>>, ExportError> {
    read_table_from(text.as_bytes(), delimiter)
}

fn read_table_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Load a sheet file, naming the sheet after the file stem.
pub fn load_sheet(path: &Path) -> Result<Sheet, ExportError> {
    let rows = read_table(path, delimiter_for_path(path))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet");
    Ok(Sheet::from_rows(name, rows))
}
