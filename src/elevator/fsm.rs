use crate::config::{BuildingConfig, TimingConfig};
use crate::shared::{
    Direction, DispatchError, ElevatorId, ElevatorSnapshot, ExternalRequest, Floor,
    InternalRequest, OperatingMode,
};
use log::debug;

/**
 * One elevator car and its stop-ordering state machine.
 *
 * The car keeps its pending stops as an unordered working set. Each call to `step` linearizes
 * the set according to the current direction of travel, commits to the first stop and arrives
 * there in the same tick. One tick is one serviced stop, not one floor.
 *
 * # Fields
 * - `id`:              Stable identity, never reassigned.
 * - `current_floor`:   Floor the car is standing at. Only `step` moves it.
 * - `direction`:       Committed direction of travel, `Idle` when no stops are left.
 * - `stops`:           Pending floors. Never contains `current_floor` and never holds duplicates.
 * - `state`:           Operating mode. Unset until the scaler first runs.
 * - `building`:        Floor bounds used to validate requests and as cost fallback.
 * - `timing`:          Weights for the time-to-serve estimate.
 *
 */
#[derive(Debug, Clone)]
pub struct Elevator {
    id: ElevatorId,
    current_floor: Floor,
    direction: Direction,
    stops: Vec<Floor>,
    state: Option<OperatingMode>,
    pub(super) building: BuildingConfig,
    pub(super) timing: TimingConfig,
}

impl Elevator {
    pub fn new(id: ElevatorId, building: &BuildingConfig, timing: &TimingConfig) -> Elevator {
        Elevator {
            id,
            current_floor: building.ground_floor(),
            direction: Direction::Idle,
            stops: Vec::new(),
            state: None,
            building: *building,
            timing: *timing,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> Option<OperatingMode> {
        self.state
    }

    pub fn set_state(&mut self, state: OperatingMode) {
        self.state = Some(state);
    }

    pub fn building(&self) -> &BuildingConfig {
        &self.building
    }

    pub fn stops(&self) -> &[Floor] {
        &self.stops
    }

    pub fn is_power_saving(&self) -> bool {
        self.state == Some(OperatingMode::PowerSaving)
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            state: self.state,
            pending_stops: self.stops.len(),
        }
    }

    /// Adds the hall call's floor as a stop. Returns whether a new stop was added.
    pub fn add_external_request(
        &mut self,
        request: &ExternalRequest,
    ) -> Result<bool, DispatchError> {
        self.add_stop(request.floor)
    }

    /// Adds the cab call's destination as a stop. Returns whether a new stop was added.
    pub fn add_internal_request(
        &mut self,
        request: &InternalRequest,
    ) -> Result<bool, DispatchError> {
        self.add_stop(request.destination_floor)
    }

    fn add_stop(&mut self, floor: Floor) -> Result<bool, DispatchError> {
        let floor = self.building.check_floor(floor)?;
        if floor == self.current_floor || self.stops.contains(&floor) {
            return Ok(false);
        }
        self.stops.push(floor);
        Ok(true)
    }

    /// Advances one tick. Returns the floor the car arrived at, if it moved.
    pub fn step(&mut self) -> Option<Floor> {
        if self.stops.is_empty() {
            self.direction = Direction::Idle;
            return None;
        }

        self.order_stops();

        let next_stop = self.stops.remove(0);
        self.current_floor = next_stop;
        self.update_direction();

        debug!(
            "elevator {} arrived at floor {}, heading {}, {} stop(s) left",
            self.id,
            self.current_floor,
            self.direction,
            self.stops.len()
        );
        Some(next_stop)
    }

    fn order_stops(&mut self) {
        match self.direction {
            Direction::Up => self.stops.sort_unstable(),
            Direction::Down => self.stops.sort_unstable_by(|a, b| b.cmp(a)),
            // Stable so equally distant stops keep arrival order
            Direction::Idle => {
                let current_floor = self.current_floor;
                self.stops.sort_by_key(|stop| stop.abs_diff(current_floor));
            }
        }
    }

    fn update_direction(&mut self) {
        match self.stops.first() {
            None => self.direction = Direction::Idle,
            Some(&next) => {
                if let Some(direction) = Direction::between(self.current_floor, next) {
                    self.direction = direction;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn test_set_position(&mut self, floor: Floor, direction: Direction) {
        self.current_floor = floor;
        self.direction = direction;
        self.stops.retain(|&stop| stop != floor);
    }
}
