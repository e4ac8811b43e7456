//! Elevator bank dispatch simulator.
//!
//! - **elevator**: one car, its cost model and stop-ordering state machine
//! - **coordinator**: fleet manager, dynamic scaler and the dispatcher thread
//! - **scenario**: scripted runs loaded from TOML
//! - **config**: building bounds, timing weights and dispatch policy

pub mod config;
pub mod coordinator;
pub mod elevator;
pub mod scenario;
pub mod shared;

pub use config::{load_config, Config, ConfigError, PowerSavingPolicy};
pub use coordinator::{Command, Dispatcher, DynamicScaler, ElevatorManager, Outcome};
pub use elevator::Elevator;
pub use scenario::{load_scenario, Scenario, ScenarioError, ScenarioEvent};
pub use shared::{
    Direction, DispatchError, ElevatorId, ElevatorSnapshot, ExternalRequest, Floor,
    InternalRequest, OperatingMode,
};
