use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};
use itertools::Itertools;

use crate::flag::{ReportFlag, FLAG_NAMES};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
const INFO_STRING: &str = "
🧬 varsift version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   quality filtering for assembly and variant-call reports";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a report and write the surviving rows as .tsv and .xls
    #[command(arg_required_else_help = true)]
    Filter {
        /// the input report file
        report: String,

        /// prefix of the output files: writes <prefix>.xls and <prefix>.tsv
        #[arg(short, long)]
        outprefix: String,

        /// minimum percent identity for a row to be kept
        #[arg(long, default_value_t = 90.0)]
        min_pc_ident: f64,

        /// minimum number of reference bases assembled for a row to be kept
        #[arg(long, default_value_t = 1)]
        min_ref_base_assembled: i64,

        /// keep rows whose has_known_var column is not "1".
        /// without this, a group in which no surviving row has a known
        /// variant is reduced to a single row with its variant columns
        /// blanked
        #[arg(long, action, verbatim_doc_comment)]
        keep_without_known_var: bool,

        /// comma-separated names of flags which exclude a row, e.g.
        ///     --exclude-flags assembly_fail,ref_seq_choose_fail
        #[arg(
            long,
            value_parser = |x: &str| ArgFlagSet::try_from(x),
            default_value = "assembly_fail,ref_seq_choose_fail",
            verbatim_doc_comment
        )]
        exclude_flags: ArgFlagSet,
    },

    /// Print summary statistics of a report as JSON
    #[command(arg_required_else_help = true)]
    Summary {
        /// the input report file
        report: String,

        /// output file; defaults to standard output
        #[arg(short)]
        output: Option<String>,
    },
}

/// A set of report flags, parsed from a comma-separated list of names.
#[derive(Copy, Clone, Debug)]
pub struct ArgFlagSet(pub ReportFlag);

/// Error type for parsing a flag-set string.
#[derive(Debug)]
pub struct ParseFlagSetErr(String);

impl std::fmt::Display for ParseFlagSetErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid flag set: {}", self.0)
    }
}

impl std::error::Error for ParseFlagSetErr {}

impl<'a> TryFrom<&'a str> for ArgFlagSet {
    type Error = ParseFlagSetErr;

    fn try_from(arg: &'a str) -> Result<ArgFlagSet, Self::Error> {
        let mut flags = ReportFlag::empty();

        for name in arg.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match ReportFlag::from_name(name) {
                Some(flag) => flags |= flag,
                None => {
                    return Err(ParseFlagSetErr(indoc::formatdoc! {"
                        unknown flag name '{name}'. Valid flag names are:
                          {valid}
                        ", valid = FLAG_NAMES.iter().map(|(n, _)| *n).join(", ")}));
                }
            }
        }

        Ok(ArgFlagSet(flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_flag_names() {
        let set = ArgFlagSet::try_from("assembly_fail,ref_seq_choose_fail").unwrap();
        assert_eq!(
            set.0,
            ReportFlag::ASSEMBLY_FAIL | ReportFlag::REF_SEQ_CHOOSE_FAIL
        );
    }

    #[test]
    fn empty_list_means_no_exclusions() {
        assert_eq!(ArgFlagSet::try_from("").unwrap().0, ReportFlag::empty());
    }

    #[test]
    fn unknown_names_are_rejected_with_the_valid_list() {
        let err = ArgFlagSet::try_from("assembly_fail,bogus").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bogus"));
        assert!(msg.contains("ref_seq_choose_fail"));
    }
}
