// ============================================================
// Layer 4: Password File Loader
// ============================================================
// Reads a person's password history from one of three formats,
// chosen by file extension:
//
//   .txt  → one password per line (a dump or a plain list)
//   .csv  → browser password-manager export; the password column
//           is picked by index, negative indices count from the
//           end of the row (default -1 = last column)
//   .json → array of records, each with a "password" field
//
// Anything else is a FormatError. There is no partial success:
// a malformed row aborts the whole load, because silently
// training on half the list would produce a misleading model.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs, path::{Path, PathBuf}};

use serde_json::Value;

use crate::domain::{error::PassError, traits::PasswordSource};

/// Column used when the caller does not pass `--col`.
pub const DEFAULT_COLUMN: i64 = -1;

/// The input formats we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordFormat {
    Text,
    Csv,
    Json,
}

impl PasswordFormat {
    /// Pick the format from the extension, ignoring ASCII case.
    pub fn from_path(path: &Path) -> Result<Self, PassError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt")  => Ok(Self::Text),
            Some("csv")  => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some(other)  => Err(PassError::format(path, format!("unsupported extension '.{other}'"))),
            None         => Err(PassError::format(path, "file has no extension")),
        }
    }
}

/// A password file on disk.
/// Implements the PasswordSource trait from Layer 3.
pub struct PasswordFile {
    path:   PathBuf,
    column: i64,
}

impl PasswordFile {
    pub fn new(path: impl Into<PathBuf>, column: i64) -> Self {
        Self { path: path.into(), column }
    }

    fn read_text(&self) -> Result<String, PassError> {
        let bytes = fs::read(&self.path)
            .map_err(|e| PassError::format(&self.path, e))?;
        Ok(decode_dropping_invalid(&bytes))
    }

    fn load_text(&self) -> Result<Vec<String>, PassError> {
        let text = self.read_text()?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn load_csv(&self) -> Result<Vec<String>, PassError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| PassError::format(&self.path, e))?;

        let mut passwords = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| PassError::format(&self.path, e))?;
            let index  = resolve_column(self.column, record.len()).ok_or_else(|| {
                PassError::format(
                    &self.path,
                    format!(
                        "row {} has {} columns, column {} is out of range",
                        row + 1,
                        record.len(),
                        self.column
                    ),
                )
            })?;
            // resolve_column guarantees index < record.len()
            passwords.push(record.get(index).unwrap_or_default().to_string());
        }

        Ok(passwords)
    }

    fn load_json(&self) -> Result<Vec<String>, PassError> {
        let text = self.read_text()?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| PassError::format(&self.path, e))?;

        let rows = json.as_array().ok_or_else(|| {
            PassError::format(&self.path, "expected a top-level array of records")
        })?;

        let mut passwords = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let record = row.as_object().ok_or_else(|| {
                PassError::format(&self.path, format!("record {i} is not an object"))
            })?;

            let password = match record.get("password") {
                Some(Value::String(s)) => s.clone(),
                Some(other)            => other.to_string(),
                None => {
                    tracing::warn!("Record {} in '{}' has no password field", i, self.path.display());
                    String::new()
                }
            };
            passwords.push(password);
        }

        Ok(passwords)
    }
}

impl PasswordSource for PasswordFile {
    fn load_all(&self) -> Result<Vec<String>, PassError> {
        let passwords = match PasswordFormat::from_path(&self.path)? {
            PasswordFormat::Text => self.load_text()?,
            PasswordFormat::Csv  => self.load_csv()?,
            PasswordFormat::Json => self.load_json()?,
        };

        tracing::info!(
            "Loaded {} passwords from '{}'",
            passwords.len(),
            self.path.display()
        );
        Ok(passwords)
    }
}

/// UTF-8 decode that skips invalid byte sequences instead of
/// replacing them, so a stray byte adds no UNK code and no mask char.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Turn a possibly negative column index into a position in a row of `len` fields.
fn resolve_column(column: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if column < 0 { len + column } else { column };
    (0..len).contains(&idx).then_some(idx as usize)
}
