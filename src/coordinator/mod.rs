pub mod coordinator;
pub mod manager;
pub mod scaler;
mod manager_tests;

pub use coordinator::{Command, Dispatcher, Outcome};
pub use manager::ElevatorManager;
pub use scaler::DynamicScaler;
