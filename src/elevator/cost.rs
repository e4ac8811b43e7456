use crate::elevator::Elevator;
use crate::shared::{Direction, ExternalRequest, Floor};

/*
 * Cost and time estimates for a candidate hall call.
 *
 * Both are pure functions of the car's state. The cost is a travel distance in floors and is
 * what the manager dispatches on. The time estimate is advisory and only used for reporting.
 * Both saturate at `u32::MAX` instead of overflowing on extreme building spans or weights.
 */
impl Elevator {
    pub fn calculate_cost(&self, request: &ExternalRequest) -> u32 {
        let current_floor = self.current_floor();

        if self.direction() == Direction::Idle {
            return current_floor.abs_diff(request.floor);
        }

        if self.direction() == request.direction && !self.has_passed(request.floor) {
            return current_floor.abs_diff(request.floor);
        }

        // Finish the current sweep, then travel back to the caller
        let end_floor = self.end_of_travel().unwrap_or_else(|| self.boundary_floor());
        self.remaining_distance_to_end()
            .saturating_add(end_floor.abs_diff(request.floor))
    }

    pub fn estimate_time_to_serve(&self, request: &ExternalRequest) -> u32 {
        let distance = self.current_floor().abs_diff(request.floor);
        let pending = u32::try_from(self.stops().len()).unwrap_or(u32::MAX);

        let mut time = distance.saturating_mul(self.timing.time_per_floor);
        time = time.saturating_add(pending.saturating_mul(self.timing.stop_time));

        if self.direction().is_moving() && self.direction() != request.direction {
            time = time.saturating_add(self.timing.direction_reversal_penalty);
        }

        time
    }

    fn has_passed(&self, floor: Floor) -> bool {
        match self.direction() {
            Direction::Up => self.current_floor() > floor,
            Direction::Down => self.current_floor() < floor,
            Direction::Idle => false,
        }
    }

    fn remaining_distance_to_end(&self) -> u32 {
        match self.end_of_travel() {
            Some(last_stop) => last_stop.abs_diff(self.current_floor()),
            None => 0,
        }
    }

    /// Farthest pending stop ahead of the car in its direction of travel.
    fn end_of_travel(&self) -> Option<Floor> {
        let current_floor = self.current_floor();
        let ahead = self.stops().iter().copied();

        match self.direction() {
            Direction::Up => ahead.filter(|&stop| stop > current_floor).max(),
            Direction::Down => ahead.filter(|&stop| stop < current_floor).min(),
            Direction::Idle => None,
        }
    }

    fn boundary_floor(&self) -> Floor {
        match self.direction() {
            Direction::Down => self.building.min_floor,
            _ => self.building.max_floor,
        }
    }
}
