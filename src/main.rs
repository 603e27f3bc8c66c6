use clap::Parser;
use filemerge::app::{run, RunOptions};
use filemerge::ignore::IGNORE_FILE_NAME;
use filemerge::logger::initialize_logger;
use filemerge::merge::DEFAULT_OUTPUT_FILE;
use filemerge::select::Prompter;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(short = 'd', long, help = "Project directory (prompted for when omitted)")]
    dir: Option<String>,
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
    #[arg(short = 'i', long, default_value = IGNORE_FILE_NAME, help = "Name of the ignore file inside the project directory")]
    ignore_file: String,
    #[arg(short = 's', long, help = "Indices to include, comma separated, or '*' for all (prompted for when omitted)")]
    select: Option<String>,
}

fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let options = RunOptions {
        dir: cli_args.dir,
        output: cli_args.output,
        ignore_file: cli_args.ignore_file,
        select: cli_args.select,
    };
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    match run(options, &mut prompter) {
        Ok(outcome) => println!("Data written to {}", outcome.output.display()),
        Err(e) if e.is_empty_result() => println!("{}", e),
        Err(e) => eprintln!("{}", e),
    }
}
