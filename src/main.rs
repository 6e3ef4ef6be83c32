//! Gradpath: Student Outcome Feature Engineering CLI
//!
//! Prepares labelled datasets for the outcome models and transforms single
//! student records with the persisted artifacts.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gradpath::cli::{
    run_epoch, run_lookup, run_prepare, run_transform, Cli, Commands, PrepareOptions,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "gradpath=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Prepare {
            input,
            model,
            output,
            artifacts,
            imputer,
            separator,
            infer_schema_length,
        } => {
            let output_path = Commands::prepare_output_path(input, output.as_deref(), *model);
            run_prepare(&PrepareOptions {
                input,
                model: *model,
                output: &output_path,
                artifacts,
                imputer: *imputer,
                separator: *separator,
                infer_schema_length: *infer_schema_length,
            })
        }
        Commands::Transform {
            record,
            model,
            artifacts,
            json,
        } => run_transform(record, *model, artifacts, *json),
        Commands::Lookup { field, code, label } => run_lookup(field, *code, label.as_deref()),
        Commands::Epoch {
            unemployment,
            inflation,
            gdp,
        } => run_epoch(*unemployment, *inflation, *gdp),
    }
}
