/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::coordinator::ElevatorManager;
use crate::shared::{DispatchError, ElevatorId, ElevatorSnapshot, ExternalRequest, InternalRequest};

/***************************************/
/*               Enums                 */
/***************************************/

/// Commands accepted by the dispatcher thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    HallCall(ExternalRequest),
    CabCall(ElevatorId, InternalRequest),
    Step,
    AdjustTraffic(u32),
}

/// Answer to every command, sent in command order.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Assigned {
        request: ExternalRequest,
        elevator: ElevatorId,
    },
    Accepted {
        elevator: ElevatorId,
        request: InternalRequest,
    },
    Stepped {
        tick: u64,
        snapshots: Vec<ElevatorSnapshot>,
    },
    Scaled {
        traffic: u32,
        active: usize,
        snapshots: Vec<ElevatorSnapshot>,
    },
    Rejected(DispatchError),
}

enum Event {
    NewCommand(Command),
    Terminate,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Runs the fleet on its own thread.
 *
 * The dispatcher is the only owner of the `ElevatorManager`. Callers never touch elevator state
 * directly, they send a `Command` and read the `Outcome`. Commands are applied one at a time,
 * so a request sent while a tick is in progress is applied after that tick.
 *
 * # Fields
 * - `manager`:         The fleet.
 * - `tick`:            Number of completed ticks.
 * - `command_rx`:      Receives commands from callers.
 * - `outcome_tx`:      Sends one outcome per command.
 * - `terminate_rx`:    Stops the loop. A disconnected command channel stops it too.
 */
pub struct Dispatcher {
    manager: ElevatorManager,
    tick: u64,
    command_rx: cbc::Receiver<Command>,
    outcome_tx: cbc::Sender<Outcome>,
    terminate_rx: cbc::Receiver<()>,
}

impl Dispatcher {
    pub fn new(
        manager: ElevatorManager,
        command_rx: cbc::Receiver<Command>,
        outcome_tx: cbc::Sender<Outcome>,
        terminate_rx: cbc::Receiver<()>,
    ) -> Dispatcher {
        Dispatcher {
            manager,
            tick: 0,
            command_rx,
            outcome_tx,
            terminate_rx,
        }
    }

    /// Main loop. Returns the manager once terminated so callers can inspect the final fleet.
    pub fn run(mut self) -> ElevatorManager {
        info!("dispatcher started with {} elevator(s)", self.manager.len());

        loop {
            match self.wait_for_event() {
                Event::NewCommand(command) => {
                    let outcome = self.handle_command(command);
                    if self.outcome_tx.send(outcome).is_err() {
                        warn!("outcome receiver dropped, stopping dispatcher");
                        break;
                    }
                }
                Event::Terminate => break,
            }
        }

        info!("dispatcher terminated after {} tick(s)", self.tick);
        self.manager
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.command_rx) -> command => {
                match command {
                    Ok(command) => Event::NewCommand(command),
                    Err(_) => {
                        debug!("command channel disconnected");
                        Event::Terminate
                    }
                }
            }
            recv(self.terminate_rx) -> _ => Event::Terminate,
        }
    }

    fn handle_command(&mut self, command: Command) -> Outcome {
        match command {
            Command::HallCall(request) => match self.manager.handle_external_request(request) {
                Ok(elevator) => Outcome::Assigned { request, elevator },
                Err(e) => self.reject(e),
            },

            Command::CabCall(elevator, request) => {
                match self.manager.handle_internal_request(elevator, request) {
                    Ok(()) => Outcome::Accepted { elevator, request },
                    Err(e) => self.reject(e),
                }
            }

            Command::Step => {
                self.manager.step_all_elevators();
                self.tick += 1;
                Outcome::Stepped {
                    tick: self.tick,
                    snapshots: self.manager.snapshots(),
                }
            }

            Command::AdjustTraffic(traffic) => {
                let active = self.manager.adjust_elevator_count(traffic);
                Outcome::Scaled {
                    traffic,
                    active,
                    snapshots: self.manager.snapshots(),
                }
            }
        }
    }

    fn reject(&self, error: DispatchError) -> Outcome {
        warn!("request rejected at tick {}: {}", self.tick, error);
        Outcome::Rejected(error)
    }
}
