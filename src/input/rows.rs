//! Loose row loading from JSON and CSV files.

use crate::error::{PlannerError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// One imported row, keys as they appear in the file.
pub type Row = HashMap<String, String>;

/// Read rows from a `.json` or `.csv` file.
pub fn read_rows(path: &str) -> Result<Vec<Row>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let text = match extension.as_deref() {
        Some("json") | Some("csv") => std::fs::read_to_string(path)?,
        _ => return Err(PlannerError::UnsupportedInput(path.to_string())),
    };
    log::info!("Reading rows from {path}");

    let rows = if extension.as_deref() == Some("json") {
        rows_from_json(&text)?
    } else {
        rows_from_csv(&text)?
    };
    log::info!("# Got row count = {}", rows.len());
    Ok(rows)
}

/// Parse a JSON array of flat objects. Scalars are stringified, nulls dropped.
pub fn rows_from_json(text: &str) -> Result<Vec<Row>> {
    let objects: Vec<serde_json::Map<String, Value>> = serde_json::from_str(text)?;
    Ok(objects
        .into_iter()
        .map(|object| {
            object
                .into_iter()
                .filter_map(|(key, value)| {
                    let value = match value {
                        Value::Null => return None,
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    Some((key, value))
                })
                .collect()
        })
        .collect())
}

/// Parse CSV text with a header line. Quoted fields may hold commas, fields are trimmed,
/// blank lines are skipped and missing trailing fields read as empty.
pub fn rows_from_csv(text: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), record.get(i).unwrap_or_default().to_string()))
                .collect(),
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_csv() {
        let text = "Site,IP\nParis,\n,192.168.0.0/21\n\n,172.16.0.0/18\n";
        let rows = rows_from_csv(text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Site"], "Paris");
        assert_eq!(rows[0]["IP"], "");
        assert_eq!(rows[1]["IP"], "192.168.0.0/21");
    }

    #[test]
    fn test_rows_from_csv_short_line() {
        let rows = rows_from_csv("name,type,zone\nPC-1,pc\n").unwrap();
        assert_eq!(rows[0]["zone"], "");
        assert!(rows_from_csv("").unwrap().is_empty());
    }

    #[test]
    fn test_rows_from_csv_quoted_fields() {
        let text = "id,name,type,zone\n1,\"PC, hall\",pc,Paris\n2,\"say \"\"hi\"\"\",iot,\n";
        let rows = rows_from_csv(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "PC, hall");
        assert_eq!(rows[0]["type"], "pc");
        assert_eq!(rows[0]["zone"], "Paris");
        assert_eq!(rows[1]["name"], "say \"hi\"");
    }

    #[test]
    fn test_rows_from_json() {
        let text = r#"[{"id": 7, "name": "SRV", "type": "server", "zone": null, "currentVlan": 451}]"#;
        let rows = rows_from_json(text).unwrap();
        assert_eq!(rows[0]["id"], "7");
        assert_eq!(rows[0]["currentVlan"], "451");
        assert!(!rows[0].contains_key("zone"));
        assert!(rows_from_json("{\"not\": \"an array\"}").is_err());
    }

    #[test]
    fn test_read_rows_unsupported() {
        assert!(matches!(
            read_rows("inventory.xlsx"),
            Err(PlannerError::UnsupportedInput(_))
        ));
    }
}
