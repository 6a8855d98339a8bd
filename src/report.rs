use std::collections::BTreeMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

use anyhow::{bail, Context, Result};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use thiserror::Error;

use crate::record::Record;
use crate::schema::Schema;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("expected the report to begin with the header line\n  `{expected}`\nbut found\n  `{found}`")]
    BadHeader { expected: String, found: String },
}

/// An in-memory report: every row, grouped by reference sequence and then
/// by contig. `BTreeMap` keys make the lexicographic output order of both
/// serializers explicit instead of an accident of iteration.
#[derive(Debug)]
pub struct Report {
    pub schema: Schema,
    pub(crate) groups: BTreeMap<String, BTreeMap<String, Vec<Record>>>,
}

impl Report {
    pub fn new(schema: Schema) -> Self {
        Report {
            schema,
            groups: BTreeMap::new(),
        }
    }

    /// Loads a whole report file into memory.
    ///
    /// The first line must be the exact `#`-tagged header for `schema`;
    /// every later line is parsed into a [`Record`]. Any malformed line
    /// aborts the load, so a partially read report is never filtered or
    /// written.
    pub fn from_path(path: &str, schema: Schema) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("could not open report file {path}"))?;
        let mut file = BufReader::new(file);

        let mut header = String::new();
        file.read_line(&mut header)
            .context("could not read the header line")?;

        let expected = schema.header_line();
        let found = header.trim_end_matches(|c| c == '\r' || c == '\n');
        if found != expected {
            bail!(ReportError::BadHeader {
                expected,
                found: found.to_string(),
            });
        }

        // the header has already been consumed, so the csv reader only sees
        // data lines; the column-count check is ours, not the csv crate's
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(file);

        let mut report = Report::new(schema);

        for (i, row) in rdr.records().enumerate() {
            let line = i + 2; // line 1 is the header
            let row = row.with_context(|| format!("could not read report line {line}"))?;
            let fields: Vec<&str> = row.iter().collect();
            let record = Record::from_fields(&fields, &report.schema)
                .with_context(|| format!("could not parse report line {line}"))?;
            report.insert(record);
        }

        Ok(report)
    }

    /// Appends a record to its (reference, contig) group, preserving the
    /// order records arrive in.
    pub fn insert(&mut self, record: Record) {
        let ref_name = record.ref_name(&self.schema).to_string();
        let ctg = record.ctg(&self.schema).to_string();

        self.groups
            .entry(ref_name)
            .or_default()
            .entry(ctg)
            .or_default()
            .push(record);
    }

    /// Iterates every record: references in lexicographic order, contigs in
    /// lexicographic order within a reference, records in stored order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.groups.values().flat_map(|ctgs| ctgs.values().flatten())
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct reference sequences.
    pub fn references(&self) -> usize {
        self.groups.len()
    }

    /// Number of (reference, contig) groups.
    pub fn contigs(&self) -> usize {
        self.groups.values().map(|ctgs| ctgs.len()).sum()
    }

    /// Writes the report as a header-tagged TSV file, the same format the
    /// loader reads.
    pub fn write_tsv(&self, path: &str) -> Result<()> {
        let mut file =
            File::create(path).with_context(|| format!("could not create {path}"))?;
        writeln!(file, "{}", self.schema.header_line())?;

        let mut wtr = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .from_writer(file);

        for record in self.records() {
            wtr.write_record(record.fields())?;
        }

        wtr.flush()?;
        Ok(())
    }
}
