use mafdb_table::{tokenize, Field, Table};
use tracing::{info, instrument};

use crate::{ReaderError, RecordSet, Schema};

#[instrument(skip_all, fields(table = %schema.table(), records = records.len()))]
/// Builds the root table of a conversion.
///
/// Every record is split on tabs and must have exactly one cell per
/// schema column.
pub fn build_root<'a>(schema: &Schema, records: &'a RecordSet) -> Result<Table<'a>, ReaderError> {
    let mut table = Table::new(
        &schema.header(),
        &schema.quoting_rules(),
        schema.table(),
        schema.starting_point(),
    )?;

    for (i, record) in records.iter().enumerate() {
        let cells = tokenize(&Field::whole(record), '\t');
        if cells.len() != table.ncol() {
            return Err(ReaderError::RowWidth {
                line: i + 1,
                expected: table.ncol(),
                found: cells.len(),
            });
        }

        for cell in cells {
            table.add(cell);
        }
    }

    info!(rows = table.nrow(), "Built root table");
    Ok(table)
}

/// Converts the records into a single `INSERT` statement for the root table.
pub fn convert(schema: &Schema, records: &RecordSet) -> Result<String, ReaderError> {
    Ok(build_root(schema, records)?.echo())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnRule, SchemaColumn};

    fn schema(starting_point: i64) -> Schema {
        Schema::builder()
            .table("t")
            .starting_point(starting_point)
            .columns(vec![
                SchemaColumn::new("a", ColumnRule::Quote),
                SchemaColumn::new("b", ColumnRule::Verbatim),
            ])
            .build()
    }

    #[test]
    fn test_convert_root() {
        let records = RecordSet::from_text("x\t1\ny\t2\n");
        let output = convert(&schema(0), &records).unwrap();
        assert_eq!(output, "INSERT INTO t VALUES \n(1,'x',1),\n(2,'y',2);\n");
    }

    #[test]
    fn test_convert_with_starting_point() {
        let records = RecordSet::from_text("x\t1\ny\t2\n");
        let table_schema = schema(1000);
        let root = build_root(&table_schema, &records).unwrap();
        assert_eq!(root.primary_keys(), &[1001, 1002]);
    }

    #[test]
    fn test_convert_no_records() {
        let output = convert(&schema(0), &RecordSet::default()).unwrap();
        assert_eq!(output, "");
    }

    #[rstest::rstest]
    #[case("x\t1\ty", 1, 3)]
    #[case("x\t1\nlonely", 2, 1)]
    fn test_row_width_mismatch(#[case] text: &str, #[case] line: usize, #[case] found: usize) {
        let records = RecordSet::from_text(text);
        let err = convert(&schema(0), &records).unwrap_err();
        assert!(
            matches!(err, ReaderError::RowWidth { line: l, expected: 2, found: f } if l == line && f == found),
            "{err:?}",
        );
    }

    #[test]
    fn test_header_mismatch_is_configuration_error() {
        let empty = Schema::builder().table("t").columns(vec![]).build();
        let err = convert(&empty, &RecordSet::from_text("x")).unwrap_err();
        assert!(
            matches!(err, ReaderError::Table(mafdb_table::TableError::Configuration(_))),
            "{err:?}",
        );
    }
}
