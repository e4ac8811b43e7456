/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type Floor = i32;

/// Stable elevator identity, assigned at fleet creation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ElevatorId(pub u32);

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    pub fn is_moving(&self) -> bool {
        *self != Direction::Idle
    }

    /// Direction of travel from `from` to `to`, `None` when they are the same floor.
    pub fn between(from: Floor, to: Floor) -> Option<Direction> {
        if to > from {
            Some(Direction::Up)
        } else if to < from {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Idle => "idle",
        };
        f.pad(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OperatingMode {
    Active,
    PowerSaving,
}

/// Hall call: someone on `floor` wants to travel in `direction`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalRequest {
    pub floor: Floor,
    pub direction: Direction,
}

impl ExternalRequest {
    pub fn new(floor: Floor, direction: Direction) -> ExternalRequest {
        ExternalRequest { floor, direction }
    }
}

/// Cab call: a passenger inside the car pressed `destination_floor`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalRequest {
    #[serde(rename = "destinationFloor")]
    pub destination_floor: Floor,
}

impl InternalRequest {
    pub fn new(destination_floor: Floor) -> InternalRequest {
        InternalRequest { destination_floor }
    }
}

/// Read-only view of one elevator, published after every command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub id: ElevatorId,
    #[serde(rename = "currentFloor")]
    pub current_floor: Floor,
    pub direction: Direction,
    pub state: Option<OperatingMode>,
    #[serde(rename = "pendingStops")]
    pub pending_stops: usize,
}
