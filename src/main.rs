/* 3rd party libraries */
use clap::{Arg, Command as Cli};
use crossbeam_channel as cbc;
use log::{error, info};
use serde_json::json;
use std::path::Path;
use std::thread::Builder;
use thiserror::Error;

/* Custom libraries */
use elevator_sim::config::load_config;
use elevator_sim::scenario::load_scenario;
use elevator_sim::shared::{ElevatorSnapshot, OperatingMode};
use elevator_sim::unwrap_or_exit;
use elevator_sim::{Command, Dispatcher, ElevatorManager, Outcome};

#[derive(Debug, Error)]
enum DriverError {
    #[error("dispatcher thread is gone")]
    Disconnected,
}

fn cli() -> Cli<'static> {
    Cli::new("elevator-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replays a scripted scenario against a simulated elevator bank")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Building and dispatch configuration"),
        )
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .takes_value(true)
                .required(true)
                .help("Scenario file with the calls to replay"),
        )
        .arg(
            Arg::new("ticks")
                .short('t')
                .long("ticks")
                .takes_value(true)
                .help("Number of ticks to run, overrides the scenario"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON object per outcome"),
        )
}

/* Main */
fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    // Load the configuration and scenario
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = unwrap_or_exit!(load_config(Path::new(config_path)), "loading configuration");
    let scenario_path = matches.value_of("scenario").unwrap_or_default();
    let scenario = unwrap_or_exit!(load_scenario(Path::new(scenario_path)), "loading scenario");
    let ticks = if matches.is_present("ticks") {
        unwrap_or_exit!(matches.value_of_t::<u64>("ticks"), "parsing --ticks")
    } else {
        scenario.ticks
    };
    let as_json = matches.is_present("json");

    // Initialize channels
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (outcome_tx, outcome_rx) = cbc::unbounded::<Outcome>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the dispatcher
    let dispatcher = Dispatcher::new(
        ElevatorManager::new(&config),
        command_rx,
        outcome_tx,
        terminate_rx,
    );
    let dispatcher_thread = unwrap_or_exit!(
        Builder::new()
            .name("dispatcher".into())
            .spawn(move || dispatcher.run()),
        "starting dispatcher"
    );

    // Replay the scenario
    info!("running {} tick(s) from {}", ticks, scenario_path);
    for tick in 0..ticks {
        for event in scenario.events_at(tick) {
            let outcome = unwrap_or_exit!(
                send_command(&command_tx, &outcome_rx, event.to_command()),
                format!("tick {}", tick)
            );
            print_outcome(&outcome, as_json);
        }
        let outcome = unwrap_or_exit!(
            send_command(&command_tx, &outcome_rx, Command::Step),
            format!("tick {}", tick)
        );
        print_outcome(&outcome, as_json);
    }

    let _ = terminate_tx.send(());
    match dispatcher_thread.join() {
        Ok(manager) => {
            let pending: usize = manager.snapshots().iter().map(|s| s.pending_stops).sum();
            info!("finished with {} pending stop(s)", pending);
        }
        Err(_) => {
            error!("dispatcher thread panicked");
            std::process::exit(1);
        }
    }
}

fn send_command(
    command_tx: &cbc::Sender<Command>,
    outcome_rx: &cbc::Receiver<Outcome>,
    command: Command,
) -> Result<Outcome, DriverError> {
    command_tx
        .send(command)
        .map_err(|_| DriverError::Disconnected)?;
    outcome_rx.recv().map_err(|_| DriverError::Disconnected)
}

fn print_outcome(outcome: &Outcome, as_json: bool) {
    if as_json {
        let line = match outcome {
            Outcome::Assigned { request, elevator } => {
                json!({ "assigned": { "request": request, "elevator": elevator } })
            }
            Outcome::Accepted { elevator, request } => {
                json!({ "accepted": { "request": request, "elevator": elevator } })
            }
            Outcome::Stepped { tick, snapshots } => {
                json!({ "tick": tick, "elevators": snapshots })
            }
            Outcome::Scaled {
                traffic,
                active,
                snapshots,
            } => json!({
                "scaled": { "traffic": traffic, "active": active, "elevators": snapshots }
            }),
            Outcome::Rejected(e) => json!({ "rejected": e.to_string() }),
        };
        println!("{}", line);
        return;
    }

    match outcome {
        Outcome::Assigned { request, elevator } => {
            println!(
                "  hall {:>2} {:<4} -> elevator {}",
                request.floor, request.direction, elevator
            )
        }
        Outcome::Accepted { elevator, request } => {
            println!(
                "  cab  {:>2}      -> elevator {}",
                request.destination_floor, elevator
            )
        }
        Outcome::Stepped { tick, snapshots } => {
            println!("tick {:>3} | {}", tick, format_fleet(snapshots))
        }
        Outcome::Scaled { traffic, active, .. } => {
            println!("  traffic {} -> {} active", traffic, active)
        }
        Outcome::Rejected(e) => println!("  rejected: {}", e),
    }
}

fn format_fleet(snapshots: &[ElevatorSnapshot]) -> String {
    snapshots
        .iter()
        .map(|s| {
            let mode = match s.state {
                Some(OperatingMode::Active) => "on",
                Some(OperatingMode::PowerSaving) => "eco",
                None => "-",
            };
            format!(
                "{} {:>2} {:<4} {:<3} {}",
                s.id, s.current_floor, s.direction, mode, s.pending_stops
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
