// pose2csv · AGPL-3.0 License

//! CSV serialization of the dataset table.

use std::path::Path;

use crate::dataset::DatasetTable;
use crate::error::Result;

/// Write the table to `path` as comma-delimited text.
///
/// The header is written exactly once, even for an empty table, followed by
/// one record per row in table order.
///
/// # Errors
///
/// Returns an error if the destination can't be created or written.
pub fn write_table<P: AsRef<Path>>(table: &DatasetTable, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row.to_record())?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Class, FeatureRow};
    use crate::landmark::LandmarkSchema;

    fn table_with_rows(rows: Vec<FeatureRow>) -> DatasetTable {
        DatasetTable {
            header: LandmarkSchema::default().header(),
            rows,
        }
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty.csv");

        write_table(&table_with_rows(Vec::new()), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("filename,nose_x,"));
        assert!(lines[0].ends_with("class_no,class_name"));
    }

    #[test]
    fn test_rows_follow_header_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");

        let rows = vec![
            FeatureRow {
                filename: "g.png".to_string(),
                values: vec![0.5; 39],
                class: Class::Good,
            },
            FeatureRow {
                filename: "b.png".to_string(),
                values: vec![0.25; 39],
                class: Class::Bad,
            },
        ];
        write_table(&table_with_rows(rows), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("g.png,0.5,"));
        assert!(lines[1].ends_with(",1,good"));
        assert!(lines[2].starts_with("b.png,0.25,"));
        assert!(lines[2].ends_with(",0,bad"));

        // Every record has the header's column count.
        for line in &lines {
            assert_eq!(line.split(',').count(), 41);
        }
    }

    #[test]
    fn test_unwritable_destination_is_an_error() {
        let table = table_with_rows(Vec::new());
        assert!(write_table(&table, "/nonexistent-dir/out.csv").is_err());
    }
}
