use crate::flag::ReportFlag;
use crate::record::Record;
use crate::report::Report;
use crate::schema::Schema;

/// Thresholds and switches deciding which report rows survive.
#[derive(Debug, Clone)]
pub struct FilterOpts {
    /// Minimum percent identity (essential).
    pub min_pc_ident: f64,
    /// Minimum number of reference bases assembled (essential).
    pub min_ref_base_assembled: i64,
    /// When true, rows additionally need `has_known_var == "1"`
    /// (non-essential: failing it can demote instead of exclude).
    pub require_known_var: bool,
    /// Rows carrying any of these flags are excluded (essential).
    pub exclude_flags: ReportFlag,
}

impl Default for FilterOpts {
    fn default() -> Self {
        FilterOpts {
            min_pc_ident: 90.0,
            min_ref_base_assembled: 1,
            require_known_var: true,
            exclude_flags: ReportFlag::ASSEMBLY_FAIL | ReportFlag::REF_SEQ_CHOOSE_FAIL,
        }
    }
}

/// The hard quality bar. A `.` sentinel in either numeric column fails its
/// comparison, so the predicate stays total over well-formed input.
fn passes_essential(record: &Record, opts: &FilterOpts) -> bool {
    !record.flag.intersects(opts.exclude_flags)
        && record.pc_ident.is_some_and(|v| v >= opts.min_pc_ident)
        && record
            .ref_base_assembled
            .is_some_and(|v| v >= opts.min_ref_base_assembled)
}

/// The soft criterion: the row describes a known variant.
fn passes_non_essential(record: &Record, schema: &Schema, opts: &FilterOpts) -> bool {
    !opts.require_known_var || record.has_known_var(schema) == "1"
}

/// Selects the surviving records of one (reference, contig) group.
///
/// Records passing both predicates survive as-is, in their original order.
/// When none do but at least one clears the essential bar, the first such
/// record (original row order, a stable tie-break) survives alone, demoted:
/// its variant columns are blanked since it represents the absence of a
/// known variant rather than a call. A group where every record fails the
/// essential bar comes back empty.
fn filter_group(records: Vec<Record>, schema: &Schema, opts: &FilterOpts) -> Vec<Record> {
    let mut pass = Vec::new();
    let mut essential_only = Vec::new();

    for record in records {
        if !passes_essential(&record, opts) {
            continue;
        }
        if passes_non_essential(&record, schema, opts) {
            pass.push(record);
        } else {
            essential_only.push(record);
        }
    }

    if pass.is_empty() {
        if let Some(first) = essential_only.first() {
            pass.push(first.demoted(schema));
        }
    }

    pass
}

/// Filters every group of the report in place, then prunes: a group left
/// with no records is removed from its reference, and a reference left
/// with no groups is removed from the report. Removal keys are collected
/// before any deletion so iteration is never invalidated.
pub fn filter(report: &mut Report, opts: &FilterOpts) {
    let schema = report.schema.clone();

    let mut empty_groups = Vec::new();
    for (ref_name, ctgs) in report.groups.iter_mut() {
        for (ctg, records) in ctgs.iter_mut() {
            *records = filter_group(std::mem::take(records), &schema, opts);
            if records.is_empty() {
                empty_groups.push((ref_name.clone(), ctg.clone()));
            }
        }
    }

    let mut empty_refs = Vec::new();
    for (ref_name, ctg) in empty_groups {
        if let Some(ctgs) = report.groups.get_mut(&ref_name) {
            ctgs.remove(&ctg);
            if ctgs.is_empty() {
                empty_refs.push(ref_name);
            }
        }
    }

    for ref_name in empty_refs {
        report.groups.remove(&ref_name);
    }
}
