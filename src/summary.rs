use std::collections::BTreeMap;
use std::io::prelude::*;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::flag::FLAG_NAMES;
use crate::report::Report;

/// Headline statistics of a (usually unfiltered) report.
#[derive(Serialize, Debug)]
pub struct ReportStatistics {
    pub references: usize,
    pub contigs: usize,
    pub records: usize,
    pub records_with_known_var: usize,
    /// How many records carry each flag condition, keyed by flag name.
    pub flag_counts: BTreeMap<String, usize>,
}

pub fn statistics(report: &Report) -> ReportStatistics {
    let mut flag_counts = BTreeMap::new();
    let mut records_with_known_var = 0;

    for record in report.records() {
        if record.has_known_var(&report.schema) == "1" {
            records_with_known_var += 1;
        }
        for (name, flag) in FLAG_NAMES {
            if record.flag.contains(*flag) {
                *flag_counts.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }

    ReportStatistics {
        references: report.references(),
        contigs: report.contigs(),
        records: report.len(),
        records_with_known_var,
        flag_counts,
    }
}

/// Summarizes a report as pretty-printed JSON.
pub fn summarize(report: &Report, writer: &mut impl Write) -> Result<()> {
    let stats = statistics(report);
    let json =
        serde_json::to_string_pretty(&stats).context("could not serialize statistics")?;
    writeln!(writer, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::schema::Schema;

    fn line(ref_name: &str, ctg: &str, flag: u32, has_known_var: &str) -> String {
        [
            ref_name, "variants_only", &flag.to_string(), "10", "cl", "500", "500", "98.0",
            ctg, "600", "20.0", "1", "SNP", "n", "A6T", has_known_var, "A6T", "SNP", "6", "6",
            "A", "6", "6", "T", "12", "T", "12", ".", ".",
        ]
        .join("\t")
    }

    #[test]
    fn counts_references_contigs_and_flags() {
        let schema = Schema::report();
        let mut report = Report::new(schema.clone());
        report.insert(Record::from_line(&line("geneA", "ctg1", 27, "1"), &schema).unwrap());
        report.insert(Record::from_line(&line("geneA", "ctg2", 3, "0"), &schema).unwrap());
        report.insert(Record::from_line(&line("geneB", "ctg1", 64, "0"), &schema).unwrap());

        let stats = statistics(&report);

        assert_eq!(stats.references, 2);
        assert_eq!(stats.contigs, 3);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.records_with_known_var, 1);
        assert_eq!(stats.flag_counts["assembled"], 2);
        assert_eq!(stats.flag_counts["complete_gene"], 1);
        assert_eq!(stats.flag_counts["assembly_fail"], 1);
        assert!(!stats.flag_counts.contains_key("scaffold_graph_bad"));
    }

    #[test]
    fn summary_is_json() {
        let schema = Schema::report();
        let mut report = Report::new(schema.clone());
        report.insert(Record::from_line(&line("geneA", "ctg1", 27, "1"), &schema).unwrap());

        let mut out = Vec::new();
        summarize(&report, &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["records"], 1);
        assert_eq!(parsed["flag_counts"]["assembled"], 1);
    }
}
