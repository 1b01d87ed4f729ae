use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lcsdiff::areas::session::Session;
use lcsdiff::areas::workspace::Workspace;
use lcsdiff::artifacts::core::Output;
use lcsdiff::artifacts::lines::{DiffFlags, DiffOptions};
use lcsdiff::commands::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `LCSDIFF_LOG=debug`.
const LOG_ENV: &str = "LCSDIFF_LOG";

#[derive(Parser)]
#[command(
    name = "lcsdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Line and character diffs of text files",
    long_about = "This tool computes the differences between two texts with an O(ND) \
    longest-common-subsequence algorithm, refining changed lines into changed characters.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "diff",
        about = "Show the changed lines and characters between two files",
        long_about = "This command compares two text files line by line and reports every changed \
        region, refined into character changes for small regions."
    )]
    Diff {
        #[arg(index = 1, help = "The original file")]
        original: PathBuf,
        #[arg(index = 2, help = "The modified file")]
        modified: PathBuf,
        #[command(flatten)]
        switches: DiffSwitches,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "The output format")]
        format: OutputFormat,
    },
    #[command(
        name = "chars",
        about = "Show the changed characters between two strings",
        long_about = "This command compares two strings character by character and prints every \
        change as original start and length followed by modified start and length."
    )]
    Chars {
        #[arg(index = 1, help = "The original string")]
        original: String,
        #[arg(index = 2, help = "The modified string")]
        modified: String,
        #[arg(long, help = "Keep change boundaries where the search found them")]
        no_pretty: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "The output format")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct DiffSwitches {
    #[arg(long, help = "Report changed lines only")]
    no_char_changes: bool,
    #[arg(long, help = "Keep character changes separated by a few matching characters apart")]
    no_post_process: bool,
    #[arg(long, help = "Treat leading and trailing whitespace as significant")]
    keep_trim_whitespace: bool,
    #[arg(long, help = "Keep change boundaries where the search found them")]
    no_pretty: bool,
    #[arg(long, value_name = "MS", help = "Time budget in milliseconds, 0 for unlimited [default: 5000]")]
    max_computation_time: Option<u64>,
    #[arg(long, value_name = "FILE", help = "JSON file with default diff options")]
    config: Option<PathBuf>,
}

impl DiffSwitches {
    /// Command line switches win over the config file.
    fn apply(&self, options: DiffOptions) -> DiffOptions {
        let options = options
            .with_flag(
                DiffFlags::COMPUTE_CHAR_CHANGES,
                !self.no_char_changes && options.should_compute_char_changes(),
            )
            .with_flag(
                DiffFlags::POST_PROCESS_CHAR_CHANGES,
                !self.no_post_process && options.should_post_process_char_changes(),
            )
            .with_flag(
                DiffFlags::IGNORE_TRIM_WHITESPACE,
                !self.keep_trim_whitespace && options.should_ignore_trim_whitespace(),
            )
            .with_flag(
                DiffFlags::PRETTY_DIFF,
                !self.no_pretty && options.should_make_pretty_diff(),
            );

        match self.max_computation_time {
            Some(millis) => options.with_max_computation_time(millis),
            None => options,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;
    let output = Output::detect();

    match &cli.command {
        Commands::Diff {
            original,
            modified,
            switches,
            format,
        } => {
            let options = match &switches.config {
                Some(config) => Workspace::new(pwd.clone().into_boxed_path())
                    .read_config(config)?
                    .apply(DiffOptions::default()),
                None => DiffOptions::default(),
            };

            let session = Session::new(
                &pwd.to_string_lossy(),
                output.writer(),
                switches.apply(options),
            )?;
            session.diff(original, modified, *format)?
        }
        Commands::Chars {
            original,
            modified,
            no_pretty,
            format,
        } => {
            let options = DiffOptions::default().with_flag(DiffFlags::PRETTY_DIFF, !no_pretty);
            let session = Session::new(&pwd.to_string_lossy(), output.writer(), options)?;
            session.chars(original, modified, *format)?
        }
    }

    output.finish()
}
