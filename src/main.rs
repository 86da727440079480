/*!
 * Command-line interface for codedump
 */

use std::env;
use std::io;

use chrono::Local;
use clap::Parser;

use codedump::config::{Args, Config};
use codedump::report::Reporter;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    // Always operate on the working directory
    let config = Config::from_args(&args, env::current_dir()?, Local::now());

    let summary = codedump::run(&config)?;

    if config.echo {
        println!("\nDone! Output: {}", summary.output_file);
    }
    Reporter::new().print_report(&summary);

    Ok(())
}
