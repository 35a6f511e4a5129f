use std::{fs, path::Path};

use crate::errors::Result;
use crate::expense::{record, Expense, ExpenseRecord};

/// Writes expense records to disk atomically by staging to a temporary file.
pub fn save_records_to_file(records: &[ExpenseRecord], path: &Path) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads the raw expense rows from a JSON array file.
pub fn load_records_from_file(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads and validates expenses, filling missing currencies with `default_currency`.
pub fn load_expenses_from_file(path: &Path, default_currency: &str) -> Result<Vec<Expense>> {
    let records = load_records_from_file(path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded expense records");
    record::into_expenses(records, default_currency)
}
