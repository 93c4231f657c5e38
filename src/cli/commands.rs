use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bankroll", about = "Progressive capital-growth planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a plan: grow INITIAL to TARGET over DAYS days
    Init {
        initial: f64,
        target: f64,
        #[arg(allow_negative_numbers = true)]
        days: i64,
        /// Replace an existing plan
        #[arg(long)]
        force: bool,
    },
    /// Record today's capital (absolute total)
    Record {
        /// Capital now held
        #[arg(
            required_unless_present = "delta",
            conflicts_with = "delta",
            allow_negative_numbers = true
        )]
        capital: Option<f64>,
        /// Record a signed change instead of the total (e.g. --delta=-250)
        #[arg(long, allow_negative_numbers = true)]
        delta: Option<f64>,
        /// Print the status report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show plan overview and today's adjusted goal
    Status {
        #[arg(long)]
        json: bool,
    },
    /// List recorded observations, most recent first
    History {
        #[arg(long)]
        json: bool,
    },
    /// Draw actual vs theoretical capital in the terminal
    Chart {
        #[arg(long, default_value = "60")]
        width: usize,
        #[arg(long, default_value = "16")]
        height: usize,
    },
    /// Export the actual and theoretical series with axis bounds as JSON
    Series,
    /// Delete the plan and its history
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
