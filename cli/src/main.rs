//! untab CLI - Word document table extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use untab::{HeaderMode, JsonFormat, RowPolicy, Untab, UntabResult};

#[derive(Parser)]
#[command(name = "untab")]
#[command(version)]
#[command(about = "Extract tabular data from Word documents to CSV, XLSX, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert document tables to CSV
    Csv {
        #[command(flatten)]
        input: ExtractArgs,

        /// Output file (next to the input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert document tables to an XLSX workbook
    Xlsx {
        #[command(flatten)]
        input: ExtractArgs,

        /// Output file (next to the input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print extracted records as JSON
    Json {
        #[command(flatten)]
        input: ExtractArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        #[command(flatten)]
        input: ExtractArgs,
    },
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Input .docx file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Header detection mode
    #[arg(long, value_enum, default_value = "first-row")]
    headers: HeaderArg,

    /// Row assembly policy
    #[arg(long, value_enum, default_value = "per-row")]
    rows: RowArg,

    /// Delimiter for list-valued cells
    #[arg(long, value_name = "SEP", default_value = "; ")]
    list_delimiter: String,

    /// Expand list values into parallel columns instead of joining
    #[arg(long, conflicts_with = "list_delimiter")]
    expand_lists: bool,

    /// Skip tables with unexpected structure instead of failing
    #[arg(long)]
    lenient: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum HeaderArg {
    /// First row of each table names the columns
    FirstRow,
    /// Cells wrapped in curly quotes are headers
    Quoted,
    /// Cells like {Name} are headers
    Placeholder,
    /// Cells like "Key: value" carry their own header
    Colon,
}

impl From<HeaderArg> for HeaderMode {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::FirstRow => HeaderMode::FirstRow,
            HeaderArg::Quoted => HeaderMode::Quoted,
            HeaderArg::Placeholder => HeaderMode::Placeholder,
            HeaderArg::Colon => HeaderMode::Colon,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RowArg {
    /// One record per data row
    PerRow,
    /// One record per table, later values win
    Overwrite,
    /// One record per table, repeats grow lists
    Append,
    /// Repeated headers start a new record
    SectionSplit,
}

impl From<RowArg> for RowPolicy {
    fn from(arg: RowArg) -> Self {
        match arg {
            RowArg::PerRow => RowPolicy::PerRow,
            RowArg::Overwrite => RowPolicy::Overwrite,
            RowArg::Append => RowPolicy::Append,
            RowArg::SectionSplit => RowPolicy::SectionSplit,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> untab::Result<()> {
    match command {
        Commands::Csv { input, output } => {
            let path = output.unwrap_or_else(|| sibling_path(&input.input, "csv"));
            let result = extract(&input)?;
            fs::write(&path, result.to_csv()?)?;
            report_written(&path, result.records().len());
            Ok(())
        }
        Commands::Xlsx { input, output } => {
            let path = output.unwrap_or_else(|| sibling_path(&input.input, "xlsx"));
            let result = extract(&input)?;
            fs::write(&path, result.to_xlsx()?)?;
            report_written(&path, result.records().len());
            Ok(())
        }
        Commands::Json {
            input,
            output,
            compact,
        } => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let result = extract(&input)?;
            let json = result.to_json(format)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    report_written(&path, result.records().len());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Info { input } => {
            let result = extract(&input)?;
            let doc = result.document();
            println!("{}", "Document".bold());
            if let Some(source) = &doc.metadata.source {
                println!("  Source:  {source}");
            }
            println!("  Tables:  {}", doc.table_count());
            if doc.metadata.skipped_tables > 0 {
                println!(
                    "  Skipped: {}",
                    doc.metadata.skipped_tables.to_string().yellow()
                );
            }
            println!("  Rows:    {}", doc.row_count());
            println!("  Records: {}", result.records().len());
            Ok(())
        }
    }
}

fn extract(args: &ExtractArgs) -> untab::Result<UntabResult> {
    let mut untab = Untab::new()
        .with_header_mode(args.headers.into())
        .with_row_policy(args.rows.into())
        .with_list_delimiter(args.list_delimiter.clone());
    if args.expand_lists {
        untab = untab.expand_lists();
    }
    if args.lenient {
        untab = untab.lenient();
    }

    let result = untab.parse(&args.input)?;
    log::debug!(
        "{}: {} records from {} tables",
        args.input.display(),
        result.records().len(),
        result.document().table_count()
    );
    Ok(result)
}

fn sibling_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

fn report_written(path: &Path, records: usize) {
    println!(
        "{} {} ({} records)",
        "wrote".green().bold(),
        path.display(),
        records
    );
}
