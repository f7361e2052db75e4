//! CSV persistence for training datasets

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::training::{ColumnLayout, Dataset, Sample, N_FEATURES};
use crate::domain::DomainError;

/// Write `dataset` as CSV with a header row, label column last
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), DomainError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        DomainError::storage(format!("Failed to create {}: {}", path.display(), e))
    })?;

    writer
        .write_record(Dataset::header())
        .map_err(|e| DomainError::storage(format!("Failed to write CSV header: {}", e)))?;

    for sample in dataset.samples() {
        let mut record: Vec<String> = sample.features.iter().map(|v| format!("{:.1}", v)).collect();
        record.push(sample.label.to_string());

        writer
            .write_record(&record)
            .map_err(|e| DomainError::storage(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| DomainError::storage(format!("Failed to flush {}: {}", path.display(), e)))
}

/// Read a dataset, locating the required columns by header name
pub fn read_dataset(path: &Path) -> Result<Dataset, DomainError> {
    let file = File::open(path).map_err(|e| {
        DomainError::storage(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| DomainError::storage(format!("Failed to parse CSV header: {}", e)))?
        .clone();
    let header_names: Vec<&str> = headers.iter().collect();
    let layout = ColumnLayout::resolve(&header_names[..])?;

    let mut samples = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DomainError::storage(format!("Failed to parse CSV row {}: {}", row + 1, e)))?;

        let mut features = [0.0; N_FEATURES];
        for (value, &column) in features.iter_mut().zip(&layout.features) {
            *value = parse_number(&record, column, row)?;
        }
        let label = parse_label(&record, layout.target, row)?;

        samples.push(Sample::new(features, label));
    }

    Ok(Dataset::new(samples))
}

fn field<'a>(record: &'a csv::StringRecord, column: usize, row: usize) -> Result<&'a str, DomainError> {
    record
        .get(column)
        .map(str::trim)
        .ok_or_else(|| DomainError::storage(format!("Row {} is missing column {}", row + 1, column)))
}

fn parse_number(record: &csv::StringRecord, column: usize, row: usize) -> Result<f64, DomainError> {
    let raw = field(record, column, row)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(DomainError::storage(format!(
            "Row {}: '{}' is not a finite number",
            row + 1,
            raw
        ))),
        Err(_) => Err(DomainError::storage(format!(
            "Row {}: '{}' is not a number",
            row + 1,
            raw
        ))),
    }
}

/// Labels may have been written as floats (`1.0`) by other tools
fn parse_label(record: &csv::StringRecord, column: usize, row: usize) -> Result<u32, DomainError> {
    let raw = field(record, column, row)?;
    if let Ok(label) = raw.parse::<u32>() {
        return Ok(label);
    }

    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
        _ => Err(DomainError::storage(format!(
            "Row {}: '{}' is not a class label",
            row + 1,
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_written_csv_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let dataset = Dataset::new(vec![Sample::new([5.0, 3.5, 1.4, 0.2], 0)]);

        write_dataset(&dataset, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "sepal length (cm),sepal width (cm),petal length (cm),petal width (cm),target\n\
             5.0,3.5,1.4,0.2,0\n"
        );
    }

    #[test]
    fn test_read_with_extra_and_reordered_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id,target,petal width (cm),petal length (cm),sepal width (cm),sepal length (cm)"
        )
        .unwrap();
        writeln!(file, "7,2.0,2.3,6.1,3.0,7.7").unwrap();

        let dataset = read_dataset(file.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.samples()[0].features, [7.7, 3.0, 6.1, 2.3]);
        assert_eq!(dataset.samples()[0].label, 2);
    }

    #[test]
    fn test_read_rejects_missing_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a,b,c,d,target").unwrap();
        writeln!(file, "1,2,3,4,0").unwrap();

        let err = read_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DomainError::SchemaValidation { .. }));
    }

    #[test]
    fn test_read_rejects_non_finite_features() {
        for raw in ["nan", "NaN", "inf", "-inf"] {
            let mut file = NamedTempFile::new().unwrap();
            writeln!(file, "{}", Dataset::header().join(",")).unwrap();
            writeln!(file, "5.1,3.5,{},0.2,0", raw).unwrap();

            let err = read_dataset(file.path()).unwrap_err();
            assert!(err.to_string().contains("is not a finite number"), "{raw}");
        }
    }

    #[test]
    fn test_read_rejects_non_numeric_feature() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", Dataset::header().join(",")).unwrap();
        writeln!(file, "5.1,wide,1.4,0.2,0").unwrap();

        let err = read_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("'wide' is not a number"));
    }
}
