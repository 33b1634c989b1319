use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{load_config, resolve_config_path, ConfigOverrides, ProjectionOptions};
use crate::generator::{generate_from_model, write_output, Generation};
use crate::graph::{analyze, GraphAnalysis};
use crate::linter::{has_errors, lint_model, print_lint_issues, LintSeverity};
use crate::logging::{init_logging, LogConfig};
use crate::model::EntityModel;
use crate::source::{read_source_dir, DeclarativeExtractor};

/// Command-line interface for entity-typegen
///
/// Projects entity definitions into a namespaced block of type declarations
/// ready for validator code generation.
#[derive(Parser)]
#[command(name = "entity-typegen")]
#[command(about = "Cycle-safe type declarations from entity definitions", long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides ETG_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the declaration block from a directory of entity units
    Generate {
        /// Directory containing .yaml/.yml/.json entity units
        #[arg(short, long)]
        input: PathBuf,

        /// File to write the declarations to (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Downstream validator family: zod, valibot, yup, joi
        #[arg(short, long)]
        target: Option<String>,

        /// Reference partial declarations for non-broken relations
        /// If not provided, defaults from the target family
        #[arg(long)]
        partial_types: Option<bool>,

        /// Name of the container the declarations are emitted into
        #[arg(long)]
        namespace: Option<String>,

        /// Path to the generator config (entity-typegen.toml)
        /// If not provided, will auto-detect inside the input directory
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Perform a dry run: report what would be generated without writing
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Lint entity definitions for degraded or invalid output
    Lint {
        /// Directory containing .yaml/.yml/.json entity units
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the generator config (entity-typegen.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit with an error if any error-level issue is found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Only report error-level issues
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the relation graph, its cycles, the broken relations and the order
    Graph {
        /// Directory containing .yaml/.yml/.json entity units
        #[arg(short, long)]
        input: PathBuf,

        /// Print the analysis as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Parse the process arguments, set up logging and execute the command
///
/// # Errors
///
/// Returns an error if:
/// - The input directory is missing or holds no entity units
/// - A unit or the config file cannot be parsed
/// - Generation fails (duplicate entities, unknown target, name collisions)
/// - The output file cannot be written
/// - `lint --fail-on-error` finds error-level issues
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.verbose {
        LogConfig::from_env().verbose()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config)?;
    execute(&cli.command)
}

/// Execute one command
pub fn execute(command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            input,
            output,
            target,
            partial_types,
            namespace,
            config,
            force,
            dry_run,
        } => {
            let overrides = ConfigOverrides {
                target: target.clone(),
                use_partial_types: *partial_types,
                namespace: namespace.clone(),
            };
            let options = resolve_options(input, config.as_deref(), &overrides)?;
            let model = load_model(input)?;
            let generation = generate_from_model(&model, &options)?;
            info!(
                declarations = generation.declarations.len(),
                family = %options.target,
                "generation finished"
            );

            if *dry_run {
                print_dry_run(&generation, output.as_deref());
                return Ok(());
            }
            match output {
                Some(path) => {
                    write_output(path, &generation.output, *force)?;
                }
                None => print!("{}", generation.output),
            }
            Ok(())
        }
        Commands::Lint {
            input,
            config,
            fail_on_error,
            errors_only,
        } => {
            let options = resolve_options(input, config.as_deref(), &ConfigOverrides::default())?;
            let model = load_model(input)?;
            let mut issues = lint_model(&model, &options);
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);

            if *fail_on_error && has_errors(&issues) {
                let count = issues
                    .iter()
                    .filter(|i| i.severity == LintSeverity::Error)
                    .count();
                anyhow::bail!("lint found {count} error(s)");
            }
            Ok(())
        }
        Commands::Graph { input, json } => {
            let model = load_model(input)?;
            let analysis = analyze(&model);
            if *json {
                let text = serde_json::to_string_pretty(&analysis)
                    .context("Failed to serialize graph analysis")?;
                println!("{text}");
            } else {
                print_graph(&analysis);
            }
            Ok(())
        }
    }
}

fn resolve_options(
    input: &Path,
    config: Option<&Path>,
    overrides: &ConfigOverrides,
) -> anyhow::Result<ProjectionOptions> {
    if let Some(path) = config.filter(|p| !p.exists()) {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    let file_config = match resolve_config_path(config, input) {
        Some(path) => {
            debug!(config = %path.display(), "using generator config");
            load_config(&path)?.unwrap_or_default()
        }
        None => Default::default(),
    };
    Ok(file_config.resolve(overrides)?)
}

fn load_model(input: &Path) -> anyhow::Result<EntityModel> {
    let units = read_source_dir(input)?;
    let model = EntityModel::collect(&units, &DeclarativeExtractor)
        .with_context(|| format!("Failed to collect entities from {}", input.display()))?;
    Ok(model)
}

fn print_dry_run(generation: &Generation, output: Option<&Path>) {
    let destination = output.map_or_else(|| "stdout".to_string(), |p| format!("{p:?}"));
    println!(
        "🔍 Dry run: would write {} declaration(s) for {} entities to {destination}",
        generation.declarations.len(),
        generation.analysis.order.len(),
    );
    for decl in &generation.declarations {
        println!("   {}", decl.name);
    }
}

fn print_graph(analysis: &GraphAnalysis) {
    println!(
        "📊 Relation graph: {} entities, {} edges",
        analysis.graph.names().len(),
        analysis.graph.edges().len()
    );
    for edge in analysis.graph.edges() {
        println!(
            "   {}.{} → {} ({})",
            edge.from, edge.field, edge.to, edge.multiplicity
        );
    }

    if analysis.cycles.is_empty() {
        println!("✅ No cycles");
    } else {
        println!("🔁 Cycles:");
        for cycle in &analysis.cycles {
            let mut path = cycle.path.clone();
            if let Some(first) = cycle.path.first() {
                path.push(first.clone());
            }
            println!("   {}", path.join(" → "));
        }
        println!("✂️  Broken relations:");
        for (from, to) in analysis.broken.pairs() {
            println!("   {from} → {to}");
        }
    }

    println!("📋 Order: {}", analysis.order.join(", "));
}
