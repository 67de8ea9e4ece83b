#![forbid(unsafe_code)]

//! # Roster CLI
//!
//! ```bash
//! roster --data staff.json --filter department=HR --query john
//! ```

use roster::{Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    let output = roster::run(&cli)?;
    println!("{output}");

    Ok(())
}
