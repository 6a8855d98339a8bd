use thiserror::Error;

use crate::flag::ReportFlag;
use crate::schema::Schema;

/// Marks a column value as absent or inapplicable, both in numeric columns
/// of the input and in the variant columns of a demoted row.
pub const SENTINEL: &str = ".";

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("expected {expected} columns but found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column `{column}` should be numeric but holds `{value}`")]
    Numeric {
        column: &'static str,
        value: String,
    },
}

/// One row of a report.
///
/// Every column value is kept as a string in schema order, so writing a
/// record back out reproduces the input byte for byte. The fields the
/// filter consults are additionally parsed into typed views at load time;
/// a typed view is `None` when the stored value is the `.` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<String>,
    pub flag: ReportFlag,
    pub pc_ident: Option<f64>,
    pub ref_base_assembled: Option<i64>,
}

fn coerce_int(value: &str, column: &'static str) -> Result<Option<i64>, RecordError> {
    if value == SENTINEL {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| RecordError::Numeric {
            column,
            value: value.to_string(),
        })
}

fn coerce_float(value: &str, column: &'static str) -> Result<Option<f64>, RecordError> {
    if value == SENTINEL {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RecordError::Numeric {
            column,
            value: value.to_string(),
        })
}

impl Record {
    /// Builds a record from the column values of one report line.
    ///
    /// Fails if the column count does not match the schema, or if a numeric
    /// column holds a value which is neither numeric nor the `.` sentinel.
    pub fn from_fields<S: AsRef<str>>(
        fields: &[S],
        schema: &Schema,
    ) -> Result<Record, RecordError> {
        if fields.len() != schema.len() {
            return Err(RecordError::ColumnCount {
                expected: schema.len(),
                found: fields.len(),
            });
        }

        let values: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();

        // every numeric column must coerce, even the ones the filter never
        // looks at; anything else is a schema-consistency error
        for &i in &schema.int_columns {
            coerce_int(&values[i], schema.columns[i])?;
        }
        for &i in &schema.float_columns {
            coerce_float(&values[i], schema.columns[i])?;
        }

        let raw_flag = &values[schema.flag];
        let bits: u32 = raw_flag.parse().map_err(|_| RecordError::Numeric {
            column: schema.columns[schema.flag],
            value: raw_flag.clone(),
        })?;

        let pc_ident = coerce_float(&values[schema.pc_ident], schema.columns[schema.pc_ident])?;
        let ref_base_assembled = coerce_int(
            &values[schema.ref_base_assembled],
            schema.columns[schema.ref_base_assembled],
        )?;

        Ok(Record {
            values,
            flag: ReportFlag::from_bits_truncate(bits),
            pc_ident,
            ref_base_assembled,
        })
    }

    /// Parses one tab-separated report line. Inverse of [`Record::to_line`].
    pub fn from_line(line: &str, schema: &Schema) -> Result<Record, RecordError> {
        let fields: Vec<&str> = line.split('\t').collect();
        Record::from_fields(&fields, schema)
    }

    /// Joins the current column values back into a tab-separated line.
    pub fn to_line(&self) -> String {
        self.values.join("\t")
    }

    /// All column values, in schema order.
    pub fn fields(&self) -> &[String] {
        &self.values
    }

    pub fn ref_name(&self, schema: &Schema) -> &str {
        &self.values[schema.ref_name]
    }

    pub fn ctg(&self, schema: &Schema) -> &str {
        &self.values[schema.ctg]
    }

    pub fn has_known_var(&self, schema: &Schema) -> &str {
        &self.values[schema.has_known_var]
    }

    /// A copy of this record with every variant column overwritten with the
    /// `.` sentinel. Used when a row is kept only as a placeholder
    /// representative of its group, where the variant call columns would be
    /// misleading.
    pub fn demoted(&self, schema: &Schema) -> Record {
        let mut demoted = self.clone();
        for &i in &schema.var_columns {
            demoted.values[i] = SENTINEL.to_string();
        }
        demoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> String {
        [
            "gene1", "presence_absence", "27", "42", "cluster1", "1000", "990", "99.42",
            "ctg.l15", "1100", "31.4", "1", "SNP", "n", "A42T", "1", "A42T", "SNP", "42", "42",
            "A", "84", "84", "T", "17", "T", "17", "ref has wild type", "some free text",
        ]
        .join("\t")
    }

    #[test]
    fn parse_and_typed_views() {
        let schema = Schema::report();
        let record = Record::from_line(&line(), &schema).unwrap();

        assert_eq!(record.ref_name(&schema), "gene1");
        assert_eq!(record.ctg(&schema), "ctg.l15");
        assert_eq!(record.has_known_var(&schema), "1");
        assert_eq!(record.pc_ident, Some(99.42));
        assert_eq!(record.ref_base_assembled, Some(990));
        assert!(record.flag.has("assembled"));
        assert!(record.flag.has("complete_gene"));
        assert!(!record.flag.has("assembly_fail"));
    }

    #[test]
    fn to_line_is_inverse_of_parse() {
        let schema = Schema::report();
        let record = Record::from_line(&line(), &schema).unwrap();
        assert_eq!(record.to_line(), line());
    }

    #[test]
    fn sentinel_skips_numeric_coercion() {
        let schema = Schema::report();
        let line = line().replace("99.42", ".").replace("\t990\t", "\t.\t");
        let record = Record::from_line(&line, &schema).unwrap();
        assert_eq!(record.pc_ident, None);
        assert_eq!(record.ref_base_assembled, None);
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let schema = Schema::report();
        let line = format!("{}\textra", line());
        let err = Record::from_line(&line, &schema).unwrap_err();
        assert!(matches!(
            err,
            RecordError::ColumnCount {
                expected: 29,
                found: 30
            }
        ));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let schema = Schema::report();
        let line = line().replace("99.42", "high");
        let err = Record::from_line(&line, &schema).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Numeric {
                column: "pc_ident",
                ..
            }
        ));
    }

    #[test]
    fn demotion_blanks_exactly_the_variant_columns() {
        let schema = Schema::report();
        let record = Record::from_line(&line(), &schema).unwrap();
        let demoted = record.demoted(&schema);

        for (i, value) in demoted.fields().iter().enumerate() {
            if schema.var_columns.contains(&i) {
                assert_eq!(value, SENTINEL, "column {}", schema.columns[i]);
            } else {
                assert_eq!(value, &record.fields()[i], "column {}", schema.columns[i]);
            }
        }

        // the untyped view changes, the typed views do not
        assert_eq!(demoted.has_known_var(&schema), SENTINEL);
        assert_eq!(demoted.pc_ident, record.pc_ident);
    }
}
