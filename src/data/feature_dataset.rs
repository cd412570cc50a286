// ============================================================
// Layer 4 — Feature Dataset
// ============================================================
// Reads the labelled trait table from a CSV file.
//
// Expected layout: a header row where one column holds the
// animal label and every other column is a trait name. Columns
// literally named "id" are ignored. The first non-id column is
// the label column. A blank cell is a missing value; the
// imputer fills it later. Any other unparsable cell aborts the
// load, naming the row and column.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use burn::data::dataset::Dataset;

/// One labelled row of the trait table. Values are aligned to
/// the table's trait order; `None` marks a missing cell.
#[derive(Debug, Clone)]
pub struct FeatureRecord {
    pub label:  String,
    pub values: Vec<Option<f64>>,
}

/// The parsed trait table: the trait vocabulary plus all rows.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub trait_names: Vec<String>,
    pub records:     Vec<FeatureRecord>,
}

impl FeatureTable {
    /// Sorted, de-duplicated list of labels appearing in the table.
    pub fn class_list(&self) -> Vec<String> {
        let mut classes: Vec<String> =
            self.records.iter().map(|r| r.label.clone()).collect();
        classes.sort();
        classes.dedup();
        classes
    }
}

/// Loads the trait table from a CSV file on disk.
pub struct CsvFeatureLoader {
    path: PathBuf,
}

impl CsvFeatureLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<FeatureTable> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("cannot open trait dataset '{}'", self.path.display()))?;
        let table = parse_table(file, &self.path.display().to_string())?;
        tracing::info!(
            "Loaded {} rows, {} traits from '{}'",
            table.records.len(),
            table.trait_names.len(),
            self.path.display()
        );
        Ok(table)
    }
}

/// Parse a trait table from any reader. Split out from the
/// loader so it can be tested without touching the filesystem.
pub fn parse_table<R: Read>(reader: R, origin: &str) -> Result<FeatureTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .with_context(|| format!("cannot read CSV header in '{origin}'"))?
        .clone();

    // Column roles: skip "id", first remaining column is the label,
    // the rest are traits.
    let mut label_col: Option<usize> = None;
    let mut trait_cols: Vec<usize> = Vec::new();
    let mut trait_names: Vec<String> = Vec::new();

    for (i, name) in headers.iter().enumerate() {
        if name.eq_ignore_ascii_case("id") {
            continue;
        }
        if label_col.is_none() {
            label_col = Some(i);
        } else {
            trait_cols.push(i);
            trait_names.push(name.to_string());
        }
    }

    let Some(label_col) = label_col else {
        bail!("'{origin}' has no usable columns");
    };
    if trait_names.is_empty() {
        bail!("'{origin}' has a label column but no trait columns");
    }

    let mut records = Vec::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        // Header is line 1, so data rows start at line 2
        let line = row_idx + 2;
        let row = row.with_context(|| format!("cannot read row {line} of '{origin}'"))?;

        let label = row
            .get(label_col)
            .unwrap_or("")
            .to_lowercase();
        if label.is_empty() {
            bail!("row {line} of '{origin}' has an empty label");
        }

        let mut values = Vec::with_capacity(trait_cols.len());
        for (&col, name) in trait_cols.iter().zip(&trait_names) {
            let cell = row.get(col).unwrap_or("");
            if cell.is_empty() {
                values.push(None);
            } else {
                let value: f64 = cell.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "row {line}, column '{name}' of '{origin}': '{cell}' is not a number"
                    )
                })?;
                values.push(Some(value));
            }
        }

        records.push(FeatureRecord { label, values });
    }

    Ok(FeatureTable { trait_names, records })
}

// ─── FeatureSample / FeatureDataset ───────────────────────────────────────────

/// One imputed, scaled training sample. `features` holds one
/// value per trait in [0, 1]; `label_idx` indexes the class list.
#[derive(Debug, Clone)]
pub struct FeatureSample {
    pub features:  Vec<f32>,
    pub label_idx: usize,
}

pub struct FeatureDataset {
    samples: Vec<FeatureSample>,
}

impl FeatureDataset {
    pub fn new(samples: Vec<FeatureSample>) -> Self {
        Self { samples }
    }
}

impl Dataset<FeatureSample> for FeatureDataset {
    fn get(&self, index: usize) -> Option<FeatureSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,zwierze,lojalnosc,towarzyskosc,lenistwo
1,pies,90,80,20
2,kot,40,,70
3,pies,85,75,25
";

    #[test]
    fn test_parse_headers_and_rows() {
        let table = parse_table(CSV.as_bytes(), "test.csv").unwrap();
        assert_eq!(table.trait_names, vec!["lojalnosc", "towarzyskosc", "lenistwo"]);
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[0].label, "pies");
        assert_eq!(table.records[0].values, vec![Some(90.0), Some(80.0), Some(20.0)]);
    }

    #[test]
    fn test_blank_cell_is_missing() {
        let table = parse_table(CSV.as_bytes(), "test.csv").unwrap();
        assert_eq!(table.records[1].values[1], None);
    }

    #[test]
    fn test_labels_are_lowercased() {
        let csv = "zwierze,lojalnosc\nPies,50\n";
        let table = parse_table(csv.as_bytes(), "test.csv").unwrap();
        assert_eq!(table.records[0].label, "pies");
    }

    #[test]
    fn test_class_list_is_sorted_unique() {
        let table = parse_table(CSV.as_bytes(), "test.csv").unwrap();
        assert_eq!(table.class_list(), vec!["kot", "pies"]);
    }

    #[test]
    fn test_unparsable_cell_names_row_and_column() {
        let csv = "zwierze,lojalnosc\npies,dużo\n";
        let err = parse_table(csv.as_bytes(), "test.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("lojalnosc"));
        assert!(msg.contains("row 2"));
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let csv = "zwierze,lojalnosc\n,50\n";
        assert!(parse_table(csv.as_bytes(), "test.csv").is_err());
    }

    #[test]
    fn test_no_trait_columns_is_rejected() {
        let csv = "zwierze\npies\n";
        assert!(parse_table(csv.as_bytes(), "test.csv").is_err());
    }
}
