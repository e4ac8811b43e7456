pub mod cost;
pub mod fsm;

pub use fsm::Elevator;
