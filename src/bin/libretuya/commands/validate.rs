//! `libretuya validate` command

use anyhow::Result;

use crate::cli::ValidateArgs;
use libretuya::core::config::FRAMEWORK_NAME;
use libretuya::ops::validate_description;
use libretuya::BuildContext;

pub fn execute(args: ValidateArgs) -> Result<()> {
    let mut ctx = BuildContext::new();
    let config = validate_description(&args.file, &mut ctx)?;

    if args.json {
        let report = serde_json::json!({
            "config": config,
            "context": ctx,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("board:     {}", config.board);
    println!("framework: {} {}", FRAMEWORK_NAME, config.framework.version);
    println!("source:    {}", config.framework.source);
    println!();
    println!("Configuration is valid.");

    Ok(())
}
