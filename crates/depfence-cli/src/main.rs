//! CLI entry point for depfence.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and exit
//! codes. All business logic lives in the `depfence-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use depfence_app::{
    CheckInput, DEFAULT_CONCURRENCY, DepsInput, FindCyclesInput, GraphSource, ListFormat,
    WhoInput, format_chains, format_info, format_violations, load_graph, load_policy_file,
    run_check, run_find_cycles, run_graph, run_info, run_list, run_who, run_why,
    serialize_report, verdict_exit_code,
};
use depfence_domain::{DependencyGraph, Policy, TracingDiagnostics, UNLIMITED_DEPTH};
use depfence_repo::ImportGraph;
use depfence_settings::DEFAULT_POLICY_FILE;
use std::collections::BTreeSet;
use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "depfence",
    version,
    about = "Architectural dependency policies for package import graphs"
)]
struct Cli {
    /// Policy file (JSON, or TOML when the extension is `.toml`).
    #[arg(long, global = true, default_value = DEFAULT_POLICY_FILE)]
    policy: Utf8PathBuf,

    /// Cargo workspace root used as the import graph.
    #[arg(long, global = true, default_value = ".")]
    workspace: Utf8PathBuf,

    /// JSON graph snapshot used instead of a Cargo workspace.
    #[arg(long, global = true)]
    snapshot: Option<Utf8PathBuf>,

    /// Log output format on stderr (falls back to DEPFENCE_LOG_FORMAT).
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check units against the policy constraints.
    Check {
        /// Units to check (default: every unit of the graph).
        units: Vec<String>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Show the components and constraints applying to units.
    Info {
        /// Units to describe (default: every unit of the graph).
        units: Vec<String>,
    },

    /// Find cycles between components.
    FindCycles {
        /// Roots of the search (default: every unit of the graph).
        units: Vec<String>,

        /// Where to write the DOT listing of cyclic component edges.
        #[arg(long)]
        graph_out: Option<Utf8PathBuf>,

        /// Units resolved concurrently.
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },

    /// Explain why a unit depends on another one.
    Why {
        source: String,
        target: String,

        /// Max distance between dependencies (0 = unlimited).
        #[arg(long, default_value_t = UNLIMITED_DEPTH)]
        max_depth: usize,
    },

    /// List the units depending on a target.
    Who {
        target: String,

        /// Candidate dependents (default: every unit of the graph).
        units: Vec<String>,

        /// Max distance between dependencies (0 = unlimited).
        #[arg(long, default_value_t = UNLIMITED_DEPTH)]
        max_depth: usize,

        /// Units resolved concurrently.
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },

    /// List dependencies of units.
    List {
        units: Vec<String>,

        /// Output format (plain|tree).
        #[arg(long, default_value = "plain", value_parser = parse_list_format)]
        format: ListFormat,

        /// Max distance between dependencies (0 = unlimited).
        #[arg(long, default_value_t = UNLIMITED_DEPTH)]
        max_depth: usize,
    },

    /// Output a component-level DOT graph of dependencies.
    Graph {
        units: Vec<String>,

        /// Component labels to leave out, comma separated.
        #[arg(long, value_delimiter = ',')]
        skip: Vec<String>,

        /// Where to write the graph (default: stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,

        /// Max distance between dependencies (0 = unlimited).
        #[arg(long, default_value_t = UNLIMITED_DEPTH)]
        max_depth: usize,
    },

    /// Print the JSON Schema of the policy document.
    Schema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("depfence error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Commands::Check {
            ref units,
            ref report_out,
            ref markdown_out,
        } => cmd_check(
            &cli,
            units.clone(),
            report_out.as_deref(),
            markdown_out.as_deref(),
        ),
        Commands::Info { ref units } => cmd_info(&cli, units),
        Commands::FindCycles {
            ref units,
            ref graph_out,
            concurrency,
        } => cmd_find_cycles(&cli, units.clone(), graph_out.as_deref(), concurrency),
        Commands::Why {
            ref source,
            ref target,
            max_depth,
        } => cmd_why(&cli, source, target, max_depth),
        Commands::Who {
            ref target,
            ref units,
            max_depth,
            concurrency,
        } => cmd_who(&cli, target, units.clone(), max_depth, concurrency),
        Commands::List {
            ref units,
            format,
            max_depth,
        } => cmd_list(&cli, units.clone(), format, max_depth),
        Commands::Graph {
            ref units,
            ref skip,
            ref output,
            max_depth,
        } => cmd_graph(&cli, units.clone(), skip, output.as_deref(), max_depth),
        Commands::Schema => {
            print!("{}", depfence_settings::policy_schema_json()?);
            Ok(0)
        }
    }
}

fn cmd_check(
    cli: &Cli,
    units: Vec<String>,
    report_out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    let policy = policy(cli)?;
    let graph = graph(cli)?;

    let output = run_check(CheckInput {
        policy: &policy,
        graph: &graph,
        units,
        diagnostics: &TracingDiagnostics,
    })?;

    print!("{}", format_violations(&output.results));

    if let Some(path) = report_out {
        let data = serialize_report(&output.report)?;
        write_file(path, &data).context("write report json")?;
    }
    if let Some(path) = markdown_out {
        let md = depfence_render::render_markdown(&output.report);
        write_file(path, md.as_bytes()).context("write markdown")?;
    }

    Ok(verdict_exit_code(output.report.verdict))
}

fn cmd_info(cli: &Cli, units: &[String]) -> anyhow::Result<i32> {
    let policy = policy(cli)?;
    let units = if units.is_empty() {
        graph(cli)?.units()
    } else {
        units.to_vec()
    };

    print!("{}", format_info(&run_info(&policy, &units)));
    Ok(0)
}

fn cmd_find_cycles(
    cli: &Cli,
    units: Vec<String>,
    graph_out: Option<&Utf8Path>,
    concurrency: usize,
) -> anyhow::Result<i32> {
    let policy = policy(cli)?;
    let graph = graph(cli)?;

    let output = run_find_cycles(FindCyclesInput {
        policy: &policy,
        graph: &graph,
        units,
        concurrency,
        diagnostics: &TracingDiagnostics,
    })?;

    print!("{}", format_chains(&output.report.cycles));
    if let Some(path) = graph_out {
        write_file(path, output.dot.as_bytes()).context("write cycle graph")?;
    }

    Ok(if output.has_cycles() { 2 } else { 0 })
}

fn cmd_why(cli: &Cli, source: &str, target: &str, max_depth: usize) -> anyhow::Result<i32> {
    let graph = graph(cli)?;
    let chains = run_why(&graph, source, target, max_depth)?;
    if chains.is_empty() {
        tracing::info!(target: "depfence", "{source} does not depend on {target}");
    }
    print!("{}", format_chains(&chains));
    Ok(0)
}

fn cmd_who(
    cli: &Cli,
    target: &str,
    units: Vec<String>,
    max_depth: usize,
    concurrency: usize,
) -> anyhow::Result<i32> {
    let graph = graph(cli)?;
    let dependents = run_who(WhoInput {
        graph: &graph,
        target: target.to_string(),
        units,
        max_depth,
        concurrency,
        diagnostics: &TracingDiagnostics,
    })?;

    for dependent in &dependents {
        print!("{}", format_chains(&dependent.chains));
    }
    Ok(0)
}

fn cmd_list(
    cli: &Cli,
    units: Vec<String>,
    format: ListFormat,
    max_depth: usize,
) -> anyhow::Result<i32> {
    let graph = graph(cli)?;
    let input = DepsInput {
        graph: &graph,
        units,
        max_depth,
        diagnostics: &TracingDiagnostics,
    };
    print!("{}", run_list(input, format));
    Ok(0)
}

fn cmd_graph(
    cli: &Cli,
    units: Vec<String>,
    skip: &[String],
    output: Option<&Utf8Path>,
    max_depth: usize,
) -> anyhow::Result<i32> {
    let policy = policy(cli)?;
    let graph = graph(cli)?;
    let skip: BTreeSet<String> = skip.iter().cloned().collect();

    let input = DepsInput {
        graph: &graph,
        units,
        max_depth,
        diagnostics: &TracingDiagnostics,
    };
    let dot = run_graph(input, &policy, &skip);

    match output {
        Some(path) => write_file(path, dot.as_bytes()).context("write graph")?,
        None => print!("{dot}"),
    }
    Ok(0)
}

fn policy(cli: &Cli) -> anyhow::Result<Policy> {
    load_policy_file(&cli.policy)
}

fn graph(cli: &Cli) -> anyhow::Result<ImportGraph> {
    let source = match &cli.snapshot {
        Some(path) => GraphSource::Snapshot(path.clone()),
        None => GraphSource::Workspace(cli.workspace.clone()),
    };
    load_graph(&source)
}

fn parse_list_format(value: &str) -> Result<ListFormat, String> {
    ListFormat::parse(value).ok_or_else(|| format!("unknown format `{value}` (plain|tree)"))
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write {path}"))?;
    Ok(())
}

fn init_tracing(format: Option<LogFormat>) {
    let filter = EnvFilter::try_from_env("DEPFENCE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "depfence=debug,warn"
        } else {
            "depfence=info,warn"
        })
    });

    let format = format.unwrap_or_else(|| match env::var("DEPFENCE_LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Compact,
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}
