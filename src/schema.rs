/// Ordered column names of a report file. The header line of every report
/// is `#` followed by these names, tab-joined, and every data line must
/// have exactly this many columns.
pub const COLUMNS: &[&str] = &[
    "ref_name",
    "ref_type",
    "flag",
    "reads",
    "cluster",
    "ref_len",
    "ref_base_assembled",
    "pc_ident",
    "ctg",
    "ctg_len",
    "ctg_cov",
    "known_var",
    "var_type",
    "var_seq_type",
    "known_var_change",
    "has_known_var",
    "ref_ctg_change",
    "ref_ctg_effect",
    "ref_start",
    "ref_end",
    "ref_nt",
    "ctg_start",
    "ctg_end",
    "ctg_nt",
    "smtls_total_depth",
    "smtls_nts",
    "smtls_nts_depth",
    "var_description",
    "free_text",
];

const INT_COLUMNS: &[&str] = &[
    "reads",
    "ref_len",
    "ref_base_assembled",
    "ctg_len",
    "ref_start",
    "ref_end",
    "ctg_start",
    "ctg_end",
];

const FLOAT_COLUMNS: &[&str] = &["pc_ident", "ctg_cov"];

// The columns which only make sense on a row describing a genuine variant
// call. These are the ones blanked when a row is demoted to a placeholder
// representative of its group.
const VAR_COLUMNS: &[&str] = &[
    "known_var",
    "var_type",
    "var_seq_type",
    "known_var_change",
    "has_known_var",
    "ref_ctg_change",
    "ref_ctg_effect",
    "ref_start",
    "ref_end",
    "ref_nt",
    "ctg_start",
    "ctg_end",
    "ctg_nt",
    "smtls_total_depth",
    "smtls_nts",
    "smtls_nts_depth",
    "var_description",
];

/// The fixed report schema: which columns exist, in what order, and how
/// they are typed. Built once and shared by the loader, the filter and
/// both serializers rather than kept as ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub columns: &'static [&'static str],
    pub int_columns: Vec<usize>,
    pub float_columns: Vec<usize>,
    pub var_columns: Vec<usize>,
    pub ref_name: usize,
    pub ctg: usize,
    pub flag: usize,
    pub pc_ident: usize,
    pub ref_base_assembled: usize,
    pub has_known_var: usize,
}

impl Schema {
    /// The schema of the assembly/variant-call report.
    pub fn report() -> Schema {
        let index = |name: &str| {
            COLUMNS
                .iter()
                .position(|c| *c == name)
                .expect("column is in the schema")
        };

        Schema {
            columns: COLUMNS,
            int_columns: INT_COLUMNS.iter().map(|c| index(c)).collect(),
            float_columns: FLOAT_COLUMNS.iter().map(|c| index(c)).collect(),
            var_columns: VAR_COLUMNS.iter().map(|c| index(c)).collect(),
            ref_name: index("ref_name"),
            ctg: index("ctg"),
            flag: index("flag"),
            pc_ident: index("pc_ident"),
            ref_base_assembled: index("ref_base_assembled"),
            has_known_var: index("has_known_var"),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// The exact header line expected at the top of a report file.
    pub fn header_line(&self) -> String {
        format!("#{}", self.columns.join("\t"))
    }
}
