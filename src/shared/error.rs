/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, Floor};

/// Errors raised at the request boundary. None of them are transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown elevator {0}")]
    UnknownElevator(ElevatorId),

    #[error("no elevator in the fleet can take the call")]
    EmptyFleet,

    #[error("floor {floor} is outside the building [{min}, {max}]")]
    FloorOutOfRange { floor: Floor, min: Floor, max: Floor },
}
