//! `libretuya flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use libretuya::ops::{to_code, validate_description};
use libretuya::{BuildContext, Directive};

pub fn execute(args: FlagsArgs) -> Result<()> {
    let mut ctx = BuildContext::new();
    let config = validate_description(&args.file, &mut ctx)?;

    let mut directives: Vec<Directive> = Vec::new();
    to_code(&config, &mut directives)?;

    println!("# Directives for `{}`:", config.board);
    for directive in &directives {
        println!("  {:<12} {}", directive.kind(), directive);
    }

    Ok(())
}
