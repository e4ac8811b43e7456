pub mod error;
pub mod macros;
pub mod structs;

pub use error::DispatchError;
pub use structs::Direction;
pub use structs::ElevatorId;
pub use structs::ElevatorSnapshot;
pub use structs::ExternalRequest;
pub use structs::Floor;
pub use structs::InternalRequest;
pub use structs::OperatingMode;
