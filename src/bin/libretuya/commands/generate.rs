//! `libretuya generate` command

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use libretuya::ops::{to_code, validate_description};
use libretuya::util::config::{global_config_path, load_config, project_config_path};
use libretuya::{BuildConfiguration, BuildContext};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    // Load configuration (global + project), CLI overrides both
    let config = load_config(global_config_path().as_deref(), &project_config_path(&cwd));
    let env_name = args.env.unwrap_or(config.generate.env_name);
    let out_dir = args.out.unwrap_or(cwd);

    let mut ctx = BuildContext::new();
    let platform = validate_description(&args.file, &mut ctx)?;

    let mut build = BuildConfiguration::new();
    to_code(&platform, &mut build)?;

    let ini = build.render_platformio_ini(&env_name);
    let defines = build.render_defines_header();

    if args.stdout {
        println!("; {}", config.generate.ini_path.display());
        print!("{}", ini);
        println!();
        println!("// {}", config.generate.defines_path.display());
        print!("{}", defines);
        println!();
        println!("// setup");
        print!("{}", build.render_setup());
        return Ok(());
    }

    let ini_path = out_dir.join(&config.generate.ini_path);
    let defines_path = out_dir.join(&config.generate.defines_path);
    write_file(&ini_path, &ini)?;
    write_file(&defines_path, &defines)?;

    println!("Wrote {}", ini_path.display());
    println!("Wrote {}", defines_path.display());
    println!("Fingerprint: {}", build.short_fingerprint());

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))
}
