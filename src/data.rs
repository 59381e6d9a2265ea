use crate::Error;
use flate2::read::GzDecoder;
use indexmap::IndexMap;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columnar table: ordered rows, named columns. The crate's native input
/// form, the analogue of the plotting engine's column data source.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: IndexMap<String, Vec<Value>>,
}

impl DataTable {
    pub fn new() -> DataTable {
        DataTable::default()
    }

    /// Builder-style column insertion. All columns must have equal length.
    pub fn with_column<S: Into<String>>(
        mut self,
        name: S,
        values: Vec<Value>,
    ) -> Result<DataTable, Error> {
        let name = name.into();
        if let Some(expected) = self.columns.values().next().map(Vec::len) {
            if values.len() != expected {
                return Err(Error::ColumnLength(name, values.len(), expected));
            }
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    /// Loads a headered csv file, transparently decompressing `.gz` inputs.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<DataTable, Error> {
        DataTable::from_csv_reader(open_file(path)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<DataTable, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut columns: IndexMap<String, Vec<Value>> =
            headers.iter().map(|h| (h.clone(), Vec::new())).collect();
        for record in reader.into_records() {
            let record = record?;
            for (header, field) in headers.iter().zip(record.iter()) {
                if let Some(column) = columns.get_mut(header) {
                    column.push(infer_value(field));
                }
            }
        }
        Ok(DataTable { columns })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// A column coerced to f64, failing on absence or non-numeric cells.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, Error> {
        let values = self
            .column(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        values
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| Error::NonNumericColumn(name.to_string()))
            })
            .collect()
    }

    /// Display form of a cell, for tooltips. Missing cells show as empty.
    pub fn cell_text(&self, name: &str, row: usize) -> String {
        match self.column(name).and_then(|c| c.get(row)) {
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
            None => String::new(),
        }
    }
}

/// Opens a file for reading, decompressing when the extension is `.gz`.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Box<dyn Read>, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    Ok(match path.extension() {
        Some(ext) if ext == OsStr::new("gz") => Box::new(GzDecoder::new(file)),
        _ => Box::new(file),
    })
}

/// Numeric cells become numbers, everything else stays a string.
fn infer_value(field: &str) -> Value {
    match field.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(field.to_string()),
    }
}
