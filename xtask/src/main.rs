use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Parser)]
#[command(author, version, about = "Workspace automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// fmt + clippy -D warnings + tests (workspace)
    Ci,
    /// Parse and validate every config under data/config
    ConfigCheck,
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("spawn")?;
    if !status.success() {
        bail!("command failed: {:?}", cmd);
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let mut c = Command::new("cargo");
    c.args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    run(&mut c)
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all"])?;
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])?;
    cargo(&["test"])?;
    config_check()?;
    Ok(())
}

fn config_check() -> Result<()> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
    let dir = root.join("data/config");
    let ownership = dir.join("ownership.toml");
    if ownership.is_file() {
        let cfg = data_runtime::configs::ownership::load_from(&ownership)?;
        println!(
            "xtask: ownership.toml ok (role={:?}, near={}, distant={})",
            cfg.role, cfg.near_radius, cfg.distant_radius
        );
    }
    let telemetry = dir.join("telemetry.toml");
    if telemetry.is_file() {
        let txt = std::fs::read_to_string(&telemetry)
            .with_context(|| format!("read {}", telemetry.display()))?;
        let _cfg: data_runtime::configs::telemetry::TelemetryCfg =
            toml::from_str(&txt).context("parse telemetry TOML")?;
        println!("xtask: telemetry.toml ok");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::ConfigCheck => config_check(),
    }
}
