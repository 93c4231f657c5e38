use bankroll::cli::commands::{Cli, Commands};
use bankroll::config::Settings;
use bankroll::infrastructure::render::text::TextChartRenderer;
use bankroll::presentation::messages::{describe_history, describe_report, describe_summary};
use bankroll::Bankroll;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            std::process::exit(1);
        }
    };

    let bankroll = match Bankroll::new(&settings) {
        Ok(bankroll) => bankroll,
        Err(e) => {
            eprintln!("Error initializing bankroll: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(bankroll, &settings, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    bankroll: Bankroll,
    settings: &Settings,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    let currency = settings.currency.as_str();

    match cmd {
        Commands::Init {
            initial,
            target,
            days,
            force,
        } => {
            if !force && bankroll.load_plan().await?.is_some() {
                return Err("A plan already exists. Use --force to replace it or `reset` first".into());
            }
            let state = bankroll.create_plan(initial, target, days).await?;
            println!("{}", describe_summary(&bankroll.summary(&state), currency));
        }
        Commands::Record {
            capital,
            delta,
            json,
        } => {
            let state = bankroll.current_plan().await?;
            let (_, report) = match (capital, delta) {
                (Some(capital), _) => bankroll.record_observation(&state, capital).await?,
                (None, Some(delta)) => bankroll.record_delta(&state, delta).await?,
                (None, None) => return Err("Provide a capital amount or --delta".into()),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", describe_report(&report, currency));
            }
        }
        Commands::Status { json } => {
            let state = bankroll.current_plan().await?;
            let summary = bankroll.summary(&state);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", describe_summary(&summary, currency));
            }
        }
        Commands::History { json } => {
            let state = bankroll.current_plan().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(state.history())?);
            } else if state.history().is_empty() {
                println!("No history");
            } else {
                for line in describe_history(&state, currency) {
                    println!("{line}");
                }
            }
        }
        Commands::Chart { width, height } => {
            let state = bankroll.current_plan().await?;
            let renderer = TextChartRenderer::new(std::io::stdout(), width, height, currency);
            bankroll.draw_chart(&state, &renderer);
        }
        Commands::Series => {
            let state = bankroll.current_plan().await?;
            println!("{}", serde_json::to_string_pretty(&bankroll.chart(&state))?);
        }
        Commands::Reset { yes } => {
            if !yes && !confirm("Reset the plan? All data will be deleted. [y/N] ")? {
                println!("Reset cancelled");
                return Ok(());
            }
            bankroll.reset().await?;
            println!("Plan reset");
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
