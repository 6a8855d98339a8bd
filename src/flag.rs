use bitflags::bitflags;

bitflags! {
    /// Status bits attached to each report row by the assembly and
    /// variant-calling stages. Bit positions match the pipeline's integer
    /// encoding of the `flag` column.
    pub struct ReportFlag: u32 {
        const ASSEMBLED                         = 1;
        const ASSEMBLED_INTO_ONE_CONTIG         = 1 << 1;
        const REGION_ASSEMBLED_TWICE            = 1 << 2;
        const COMPLETE_GENE                     = 1 << 3;
        const UNIQUE_CONTIG                     = 1 << 4;
        const SCAFFOLD_GRAPH_BAD                = 1 << 5;
        const ASSEMBLY_FAIL                     = 1 << 6;
        const REF_SEQ_CHOOSE_FAIL               = 1 << 7;
        const VARIANTS_SUGGEST_COLLAPSED_REPEAT = 1 << 8;
        const HIT_BOTH_STRANDS                  = 1 << 9;
        const HAS_VARIANT                       = 1 << 10;
    }
}

/// Every flag condition, paired with the name used in report files and on
/// the command line, in bit order.
pub const FLAG_NAMES: &[(&str, ReportFlag)] = &[
    ("assembled", ReportFlag::ASSEMBLED),
    ("assembled_into_one_contig", ReportFlag::ASSEMBLED_INTO_ONE_CONTIG),
    ("region_assembled_twice", ReportFlag::REGION_ASSEMBLED_TWICE),
    ("complete_gene", ReportFlag::COMPLETE_GENE),
    ("unique_contig", ReportFlag::UNIQUE_CONTIG),
    ("scaffold_graph_bad", ReportFlag::SCAFFOLD_GRAPH_BAD),
    ("assembly_fail", ReportFlag::ASSEMBLY_FAIL),
    ("ref_seq_choose_fail", ReportFlag::REF_SEQ_CHOOSE_FAIL),
    (
        "variants_suggest_collapsed_repeat",
        ReportFlag::VARIANTS_SUGGEST_COLLAPSED_REPEAT,
    ),
    ("hit_both_strands", ReportFlag::HIT_BOTH_STRANDS),
    ("has_variant", ReportFlag::HAS_VARIANT),
];

impl ReportFlag {
    /// Looks up a single flag condition by its report-file name.
    pub fn from_name(name: &str) -> Option<ReportFlag> {
        FLAG_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, flag)| *flag)
    }

    /// Membership query by name. Unknown names are simply not members.
    pub fn has(self, name: &str) -> bool {
        Self::from_name(name).is_some_and(|flag| self.contains(flag))
    }
}
