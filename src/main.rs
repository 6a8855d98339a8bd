extern crate env_logger;
#[macro_use]
extern crate log;

use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::Result;
use clap::Parser;

mod cli;
mod filter;
mod flag;
mod record;
mod report;
mod schema;
mod summary;
mod xls;

use cli::{Cli, Commands};

/// Creates a `BufWriter` for the given output option, defaulting to
/// standard output when no path is passed.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Filter {
            report,
            outprefix,
            min_pc_ident,
            min_ref_base_assembled,
            keep_without_known_var,
            exclude_flags,
        } => {
            let opts = filter::FilterOpts {
                min_pc_ident: *min_pc_ident,
                min_ref_base_assembled: *min_ref_base_assembled,
                require_known_var: !keep_without_known_var,
                exclude_flags: exclude_flags.0,
            };

            let mut report = report::Report::from_path(report, schema::Schema::report())?;
            info!(
                "Loaded {} records across {} references",
                report.len(),
                report.references()
            );

            filter::filter(&mut report, &opts);
            info!("{} records remain after filtering", report.len());

            xls::write_xls(&report, &format!("{outprefix}.xls"))?;
            report.write_tsv(&format!("{outprefix}.tsv"))?;
            info!("Wrote {outprefix}.xls and {outprefix}.tsv");
        }
        Commands::Summary { report, output } => {
            let report = report::Report::from_path(report, schema::Schema::report())?;
            let mut writer = get_writer(output)?;
            summary::summarize(&report, &mut writer)?;
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
