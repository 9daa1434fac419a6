mod cli;
mod config;
mod core;
mod graph;
mod store;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, GraphArgs, ReportArgs, ReposSubcommand, RunArgs, ScansSubcommand};
use std::fs;
use std::path::PathBuf;
use store::ScanStore;
use store::fixtures::FixtureStore;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let store = FixtureStore::new();

    match cli.command {
        Commands::Report(args) => run_report(&store, args),
        Commands::Graph(args) => run_graph(&store, args),
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `devsense init`; writing ./devsense.toml"
                );
            }

            let path = std::env::current_dir()?.join("devsense.toml");
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Scans { command } => match command {
            ScansSubcommand::List(args) => run_scans(&store, args),
        },
        Commands::Repos { command } => match command {
            ReposSubcommand::List(args) => run_repos(&store, args),
        },
        Commands::Usage(args) => run_usage(&store, args),
    }
}

fn load(args: &RunArgs) -> Result<(config::Config, bool)> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    let json = args.json || loaded.config.general.json;
    Ok((loaded.config, json))
}

fn run_report(store: &dyn ScanStore, args: ReportArgs) -> Result<i32> {
    let (cfg, json) = load(&args.run)?;
    let report = core::build_report(store, args.scan.as_deref(), &cfg)?;

    if json {
        let json_report = core::report::JsonReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_graph(store: &dyn ScanStore, args: GraphArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let cfg = config::load_config(args.config.as_deref(), &cwd)?.config;
    let id = core::resolve_scan_id(store, args.scan.as_deref())?;
    let Some(dataset) = store.graph(&id) else {
        bail!("no dependency graph recorded for scan {id}");
    };

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&cfg.render.out));
    let scale = args.scale.unwrap_or(cfg.render.scale);
    if scale <= 0.0 {
        bail!("render scale must be positive, got {scale}");
    }

    let is_svg = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let svg = graph::render::scene_svg(&dataset)?;
        fs::write(&out, svg).with_context(|| format!("failed writing {}", out.display()))?;
    } else {
        let png = graph::render::render_png(&dataset, scale)?;
        fs::write(&out, png).with_context(|| format!("failed writing {}", out.display()))?;
    }

    println!("wrote {}", out.display());
    Ok(0)
}

fn run_scans(store: &dyn ScanStore, args: RunArgs) -> Result<i32> {
    let (_, json) = load(&args)?;
    let scans = store.list_scans();
    if json {
        println!("{}", serde_json::to_string_pretty(&scans)?);
    } else {
        core::report::print_scan_list(&scans);
    }
    Ok(0)
}

fn run_repos(store: &dyn ScanStore, args: RunArgs) -> Result<i32> {
    let (_, json) = load(&args)?;
    let repos = store.list_repositories();
    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else {
        core::report::print_repo_list(&repos);
    }
    Ok(0)
}

fn run_usage(store: &dyn ScanStore, args: RunArgs) -> Result<i32> {
    let (_, json) = load(&args)?;
    let usage = core::report::UsageReport::from(&store.usage());
    if json {
        println!("{}", serde_json::to_string_pretty(&usage)?);
    } else {
        core::report::print_usage(&usage);
    }
    Ok(0)
}
