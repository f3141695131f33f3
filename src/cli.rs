//! Command-line interface implementation for fileproc.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

const NOTES: &str = r#"Notes.

- The string containing variables should be enclosed between SINGLE QUOTES (') in order to avoid shell expansion.

- The name format variables available are the following.
  - ${FP_BASENAME} the basename of the input file.
  - ${FP_EXTENSION} the extension of the input file (including the separator).
  - ${FP_COUNTERN} a counter with N digits, N <= 20 (if N = 0 no leading zeros are prepended).
  - ${FP_ORIGCOUNTERN} the first number found in the input file name, with N digits.

- The command format variables available are the following.
  - ${FP_IN} the quoted input file, ${FP_OUT} the quoted output file, ${FP_OUT_FOLDER} the quoted output folder.
  - Any other label is an error; use the environment variables below (e.g. $FP_IN_BASENAME) instead.

- The following values are exported to the environment of the command that is launched.
  - FP_IN the full name of the input file
  - FP_IN_FOLDER the folder of the input file
  - FP_IN_BASENAME the basename of the input file
  - FP_IN_EXTENSION the extension of the input file
  - FP_OUT the full name of the output file (provided a name format was given)
  - FP_OUT_FOLDER the folder for the output

Example:

fileproc ./in -o ./out -f '(\.bin)\b' -n '${FP_BASENAME}_processed${FP_EXTENSION}' -c 'myCommand ${FP_IN} ${FP_OUT}' -r

The command myCommand is applied to all the .bin files in the folder ./in and its subfolders.
The output files have the _processed string appended after the basename and are written in ./out."#;

/// Command-line arguments structure for fileproc.
///
/// Options left unset fall back to the preset file, then to built-in defaults.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Process a set of files applying a command to each of them.",
    long_about = None,
    after_help = NOTES
)]
pub struct Args {
    /// The folder containing the files to process
    #[arg(value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// The output folder (if not set, the input folder is used)
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Processing order: 0 no sorting, 1 lexicographical, 2 human friendly [default: 2]
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub sort_mode: Option<u8>,

    /// Regular expression used to filter the input file names
    #[arg(short, long)]
    pub file_filter: Option<String>,

    /// Process one file every N ones [default: 1]
    #[arg(short = 'm', long, value_name = "N")]
    pub sampling_step: Option<usize>,

    /// Output name format built from the name format variables
    #[arg(short, long)]
    pub name_format: Option<String>,

    /// Initial value of the ${FP_COUNTERN} counter [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub counter_offset: Option<i64>,

    /// The command to apply to every file (see the notes below)
    #[arg(short, long)]
    pub command: Option<String>,

    /// Recurse inside the input folder
    #[arg(short, long)]
    pub recursive: bool,

    /// Process the files in parallel (a verbosity of 0 is suggested)
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of concurrent workers in parallel mode [default: available CPUs]
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Write a CSV log with the command, stdout and stderr of every job
    #[arg(short, long)]
    pub log_filename: Option<PathBuf>,

    /// Bit field: 0 silent, 1 command output, 2 progress, 4 rendered commands [default: 2]
    #[arg(short, long)]
    pub verbosity: Option<u8>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,

    /// JSON or YAML file providing default values for the options above
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
