use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use iref_clean::config::ConfigLoader;
use iref_clean::error::IrefError;
use iref_clean::output::{JsonOutput, TracingSink};
use iref_clean::pipeline::{Pipeline, RunSummary, default_output_path};

#[derive(Parser)]
#[command(name = "iref-clean")]
#[command(about = "Clean an iRefIndex MITAB export into a pairwise interaction table")]
#[command(version, author)]
struct Cli {
    /// iRefIndex MITAB file (.txt, .gz or .zip)
    input: Utf8PathBuf,

    /// Destination TSV [default: Clean_iRefIndex.tsv]
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// JSON config file [default: iref-clean.json if present]
    #[arg(long)]
    config: Option<String>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<IrefError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &IrefError) -> u8 {
    match error {
        IrefError::InputRead { .. } | IrefError::Archive(_) | IrefError::ConfigRead(_) => 2,
        IrefError::MissingColumns(_) | IrefError::MalformedRow { .. } | IrefError::Tsv(_) => 3,
        IrefError::OutputWrite { .. } => 4,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    let output = cli.output.unwrap_or_else(default_output_path);
    let pipeline = Pipeline::new(config);

    if cli.json {
        let summary = pipeline.run(&cli.input, &output, &JsonOutput)?;
        JsonOutput::print_summary(&summary).into_diagnostic()?;
    } else {
        let summary = pipeline.run(&cli.input, &output, &TracingSink)?;
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let green = "\x1b[32m";
    let yellow = "\x1b[33m";
    let cyan = "\x1b[36m";
    let reset = "\x1b[0m";
    let stats = &summary.stats;

    println!("{cyan}iref-clean summary{reset}");
    println!("  input:  {}", summary.input);
    println!("  output: {}", summary.output);
    println!("  rows read:       {}", stats.rows_read);
    println!("  direct (PPI):    {}", stats.ppi_rows);
    println!(
        "  complexes:       {} ({} rows -> {} pairs)",
        stats.complexes, stats.complex_rows, stats.complex_pairs
    );
    println!("{yellow}  rows dropped:    {}{reset}", stats.rows_dropped);
    println!("{green}  rows written:    {}{reset}", stats.rows_written);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let unreadable = IrefError::InputRead {
            path: PathBuf::from("in.txt.gz"),
            message: "invalid gzip header".to_string(),
        };
        assert_eq!(map_exit_code(&unreadable), 2);
        assert_eq!(map_exit_code(&IrefError::ConfigRead(PathBuf::from("c.json"))), 2);
        assert_eq!(map_exit_code(&IrefError::Archive("empty".to_string())), 2);

        let schema = IrefError::MissingColumns("method".to_string());
        assert_eq!(map_exit_code(&schema), 3);
        let short_row = IrefError::MalformedRow {
            line: 7,
            message: "expected at least 5 fields, found 2".to_string(),
        };
        assert_eq!(map_exit_code(&short_row), 3);

        let unwritable = IrefError::OutputWrite {
            path: PathBuf::from("out.tsv"),
            message: "permission denied".to_string(),
        };
        assert_eq!(map_exit_code(&unwritable), 4);

        assert_eq!(map_exit_code(&IrefError::InvalidConfig("x".to_string())), 1);
        assert_eq!(map_exit_code(&IrefError::ConfigParse("x".to_string())), 1);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "iref-clean",
            "10090.mitab.txt",
            "-o",
            "clean.tsv",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.input.as_str(), "10090.mitab.txt");
        assert_eq!(cli.output.as_deref(), Some(camino::Utf8Path::new("clean.tsv")));
        assert!(cli.json);
        assert!(cli.config.is_none());
    }
}
