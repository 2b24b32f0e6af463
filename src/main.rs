/*!
 * schedsim - Main Entry Point
 *
 * Runs the FCFS, SJF and RR schedulers side by side over an input file of
 * `arrival duration` lines and prints their average turnaround, response and
 * waiting times.
 */

use cpu_sched_sim::{
    init_tracing, ArrivalSchedule, OutputFormat, SequentialGenerator, SimConfig, Simulation,
    SimulationError,
};
use tracing::{error, info};

fn main() -> miette::Result<()> {
    init_tracing();

    let input = input_arg(std::env::args())?;

    run(&input).map_err(|e| {
        error!(error = %e, "Simulation failed");
        e.into()
    })
}

/// First positional argument, the input file
fn input_arg(mut args: impl Iterator<Item = String>) -> miette::Result<String> {
    args.nth(1).ok_or_else(|| {
        miette::miette!(
            code = "schedsim::usage",
            help = "usage: schedsim <input-file>, one `arrival duration` pair per line",
            "Missing input file argument"
        )
    })
}

fn run(input: &str) -> Result<(), SimulationError> {
    let config = SimConfig::from_env()?;
    info!(?config, input, "Loading arrival schedule");

    let schedule = ArrivalSchedule::from_path(input)?;
    let mut simulation = Simulation::standard(&config)?;
    let report = simulation.run(&schedule, &SequentialGenerator::default())?;

    match config.output {
        OutputFormat::Text => print!("{}", report.render_text(config.precision, config.rounding)),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    Ok(())
}
