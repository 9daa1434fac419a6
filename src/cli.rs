use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "devsense",
    version,
    about = "Architecture health reports and dependency graphs for .NET solutions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the results of a scan.
    Report(ReportArgs),
    /// Render a scan's dependency graph to SVG or PNG.
    Graph(GraphArgs),
    /// Write a default devsense.toml to the current directory.
    Init(InitArgs),
    /// Browse scan history.
    Scans {
        #[command(subcommand)]
        command: ScansSubcommand,
    },
    /// Browse connected repositories.
    Repos {
        #[command(subcommand)]
        command: ReposSubcommand,
    },
    /// Show monthly scan quota usage.
    Usage(RunArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub run: RunArgs,
    /// Scan id to report on; defaults to the most recent scan.
    #[arg(long)]
    pub scan: Option<String>,
}

/// Graph output is always a file, so there is no `--json` here.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Scan id whose graph should be rendered; defaults to the most recent.
    #[arg(long)]
    pub scan: Option<String>,
    /// Output file; the extension picks the format (.svg or .png).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Raster scale factor for PNG output.
    #[arg(long)]
    pub scale: Option<f32>,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ScansSubcommand {
    /// List scan history, newest first.
    List(RunArgs),
}

#[derive(Debug, Subcommand)]
pub enum ReposSubcommand {
    /// List connected repositories and their scores.
    List(RunArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_a_help_line() {
        for subcommand in Cli::command().get_subcommands() {
            assert!(
                subcommand.get_about().is_some(),
                "`{}` is missing a help line",
                subcommand.get_name()
            );
        }
    }

    #[test]
    fn graph_rejects_the_json_flag() {
        assert!(Cli::try_parse_from(["devsense", "graph", "--json"]).is_err());
        assert!(Cli::try_parse_from(["devsense", "graph", "--out", "graph.svg"]).is_ok());
    }
}
