//! GOAP inspector CLI.
//!
//! - `goap-cli plan` - plan from a start state to a goal over an action file
//! - `goap-cli check` - validate an action file and list its atoms and actions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use goap_core::AtomRegistry;
use goap_planner::{ActionSet, ActionSetDef, Planner, PlannerConfig, StateDef};

#[derive(Parser)]
#[command(name = "goap-cli")]
#[command(about = "Inspect GOAP action sets and plans", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the cheapest plan from a start state to a goal
    Plan {
        /// Action set definition (.yaml, .yml or .json)
        #[arg(long)]
        actions: PathBuf,

        /// Start state, e.g. `AtEdge=false,Inside=false`
        #[arg(long, default_value = "")]
        start: String,

        /// Goal state, e.g. `Inside=true`
        #[arg(long)]
        goal: String,

        /// Node expansion budget
        #[arg(long, default_value_t = PlannerConfig::default().max_expansions)]
        max_expansions: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate an action set definition
    Check {
        /// Action set definition (.yaml, .yml or .json)
        #[arg(long)]
        actions: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan {
            actions,
            start,
            goal,
            max_expansions,
            json,
        } => run_plan(&actions, &start, &goal, max_expansions, json),
        Commands::Check { actions } => run_check(&actions),
    }
}

/// A loaded action file with its atoms registered.
struct Loaded {
    def: ActionSetDef,
    registry: AtomRegistry,
    actions: ActionSet,
}

fn load(path: &Path) -> Result<Loaded> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let def = parse_definition(path, &input)
        .with_context(|| format!("parsing {}", path.display()))?;

    let mut registry = AtomRegistry::new();
    let actions = def
        .build(&mut registry)
        .with_context(|| format!("building action set from {}", path.display()))?;
    tracing::debug!(
        atoms = registry.len(),
        actions = actions.len(),
        path = %path.display(),
        "loaded action set"
    );

    Ok(Loaded {
        def,
        registry,
        actions,
    })
}

fn parse_definition(path: &Path, input: &str) -> Result<ActionSetDef> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let def = if is_json {
        ActionSetDef::from_json_str(input)?
    } else {
        ActionSetDef::from_yaml_str(input)?
    };
    Ok(def)
}

#[derive(Debug, Serialize)]
struct PlanReport {
    found: bool,
    steps: Vec<String>,
    cost: u32,
    start: String,
    goal: String,
}

fn plan_report(loaded: &Loaded, start: &str, goal: &str, max_expansions: usize) -> Result<PlanReport> {
    let start = StateDef::parse_assignments(start)
        .and_then(|def| def.resolve(&loaded.registry))
        .context("resolving --start")?;
    let goal = StateDef::parse_assignments(goal)
        .and_then(|def| def.resolve(&loaded.registry))
        .context("resolving --goal")?;

    let planner =
        Planner::new(loaded.actions.clone()).with_config(PlannerConfig { max_expansions });
    let plan = planner.plan(&start, &goal);

    Ok(PlanReport {
        found: plan.is_some(),
        steps: plan
            .as_ref()
            .map(|plan| {
                plan.names(planner.actions())
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        cost: plan.as_ref().map_or(0, |plan| plan.planned_cost()),
        start: start.display(&loaded.registry).to_string(),
        goal: goal.display(&loaded.registry).to_string(),
    })
}

fn run_plan(path: &Path, start: &str, goal: &str, max_expansions: usize, json: bool) -> Result<()> {
    let loaded = load(path)?;
    let report = plan_report(&loaded, start, goal, max_expansions)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("start: {}", report.start);
    println!("goal:  {}", report.goal);
    if !report.found {
        println!("no plan");
    } else if report.steps.is_empty() {
        println!("goal already satisfied");
    } else {
        println!("plan (cost {}):", report.cost);
        for (i, step) in report.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let loaded = load(path)?;
    loaded
        .def
        .monitor(&loaded.registry, &loaded.actions)
        .context("resolving watch lists")?;

    println!("atoms ({}):", loaded.registry.len());
    for (atom, name) in loaded.registry.iter() {
        println!("  {atom} {name}");
    }

    println!("actions ({}):", loaded.actions.len());
    for (def, (_, action)) in loaded.def.actions.iter().zip(loaded.actions.iter()) {
        print!(
            "  {} cost={} pre={} post={}",
            action.name(),
            action.cost(),
            action.preconditions().display(&loaded.registry),
            action.postconditions().display(&loaded.registry),
        );
        if !def.watch.is_empty() {
            print!(" watch=[{}]", def.watch.join(", "));
        }
        println!();
    }
    println!("ok");
    Ok(())
}
