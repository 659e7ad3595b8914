//! PoolPlan CLI
//!
//! Thin presentation layer over the planning library: parses a capacity
//! request and constraints from arguments, runs the planner or analyzer,
//! and prints the result as JSON. All real logic lives in the library.

use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use poolplan::{
    analyze_parity, nice_bytes, plan_layout, plan_memory, CapacityRequest, LayoutConstraints,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// PoolPlan - capacity layout planner for object storage pools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a pool layout for a desired capacity
    Plan {
        /// Desired capacity magnitude
        #[arg(long)]
        capacity: f64,

        /// Capacity unit (Kubernetes style: Gi, Ti, Pi, ...)
        #[arg(long, default_value = "Gi")]
        unit: String,

        /// Candidate node count
        #[arg(long)]
        nodes: u32,

        /// Pin drives per node (omit to let the planner choose)
        #[arg(long)]
        drives_per_node: Option<u32>,

        /// Maximum total cluster size in bytes
        #[arg(long, default_value_t = u64::MAX)]
        max_cluster_bytes: u64,
    },

    /// Analyze erasure-code parity trade-offs for a layout
    Erasure {
        /// Supported parity options, e.g. --parity EC:4 --parity EC:2
        #[arg(long = "parity", required = true)]
        parity_options: Vec<String>,

        /// Total drives in the pool
        #[arg(long)]
        drives: u64,

        /// Size of each volume in bytes
        #[arg(long)]
        volume_size_bytes: u64,
    },

    /// Plan memory request/limit for pool nodes
    Memory {
        /// Requested memory per node in Gi
        #[arg(long)]
        memory_gib: u64,

        /// Pool capacity in bytes
        #[arg(long)]
        capacity_bytes: u64,

        /// Memory available on the selected nodes in bytes
        #[arg(long)]
        max_memory_bytes: u64,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() {
    let args = Args::parse();

    init_logging(&args);

    let outcome = match args.command {
        Command::Plan {
            capacity,
            unit,
            nodes,
            drives_per_node,
            max_cluster_bytes,
        } => {
            let request = CapacityRequest::new(capacity, unit);
            let constraints = LayoutConstraints {
                nodes,
                drives_per_node,
                max_cluster_bytes,
            };
            plan_layout(&request, &constraints, None).map(|layout| {
                debug!(
                    volume = %nice_bytes(layout.volume_size_bytes, true),
                    "layout feasible"
                );
                serde_json::to_string_pretty(&layout).expect("layout serializes")
            })
        }
        Command::Erasure {
            parity_options,
            drives,
            volume_size_bytes,
        } => analyze_parity(&parity_options, drives, volume_size_bytes)
            .map(|summary| serde_json::to_string_pretty(&summary).expect("summary serializes")),
        Command::Memory {
            memory_gib,
            capacity_bytes,
            max_memory_bytes,
        } => plan_memory(memory_gib, capacity_bytes, max_memory_bytes)
            .map(|memory| serde_json::to_string_pretty(&memory).expect("memory serializes")),
    };

    match outcome {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
