//! Command line entry point for the `plainspec` binary.

use eyre::Result;

fn main() -> Result<()> {
    plainspec_cli::run()
}
