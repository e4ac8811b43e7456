/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::collections::BTreeMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{BuildingConfig, Config, ConfigError, DispatchConfig, PowerSavingPolicy};
use crate::coordinator::DynamicScaler;
use crate::elevator::Elevator;
use crate::shared::{
    DispatchError, ElevatorId, ElevatorSnapshot, ExternalRequest, InternalRequest,
};

/**
 * Owns the fleet and routes calls to it.
 *
 * Elevators are kept in a lookup table keyed by their stable id, so fleet order is id order.
 * Hall calls go to the elevator with the strictly lowest dispatch cost (first in fleet order
 * wins a tie). Cab calls go straight to the addressed elevator.
 *
 * # Fields
 * - `fleet`:       Elevators by id. Fixed for the lifetime of the manager.
 * - `building`:    Floor bounds, checked before any request reaches an elevator.
 * - `dispatch`:    How power-saving elevators take part in hall call dispatch.
 * - `scaler`:      Active/power-saving partition policy.
 */
#[derive(Debug, Clone)]
pub struct ElevatorManager {
    fleet: BTreeMap<ElevatorId, Elevator>,
    building: BuildingConfig,
    dispatch: DispatchConfig,
    scaler: DynamicScaler,
}

impl ElevatorManager {
    /// Builds a fleet of `n_elevators` parked at the ground floor, ids `0..n_elevators`.
    pub fn new(config: &Config) -> ElevatorManager {
        let fleet = (0..config.building.n_elevators)
            .map(|id| {
                let elevator = Elevator::new(ElevatorId(id), &config.building, &config.timing);
                (elevator.id(), elevator)
            })
            .collect();
        ElevatorManager::assemble(fleet, config)
    }

    /// Builds a manager around prebuilt elevators.
    ///
    /// Ids must be unique and every elevator must share the floor bounds of `config.building`.
    pub fn with_fleet(
        elevators: Vec<Elevator>,
        config: &Config,
    ) -> Result<ElevatorManager, ConfigError> {
        let mut fleet = BTreeMap::new();

        for elevator in elevators {
            let bounds = elevator.building();
            if (bounds.min_floor, bounds.max_floor)
                != (config.building.min_floor, config.building.max_floor)
            {
                return Err(ConfigError::Invalid(format!(
                    "elevator {} spans floors [{}, {}], the building spans [{}, {}]",
                    elevator.id(),
                    bounds.min_floor,
                    bounds.max_floor,
                    config.building.min_floor,
                    config.building.max_floor
                )));
            }

            let id = elevator.id();
            if fleet.insert(id, elevator).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "elevator {} appears more than once in the fleet",
                    id
                )));
            }
        }

        Ok(ElevatorManager::assemble(fleet, config))
    }

    fn assemble(fleet: BTreeMap<ElevatorId, Elevator>, config: &Config) -> ElevatorManager {
        ElevatorManager {
            fleet,
            building: config.building,
            dispatch: config.dispatch,
            scaler: DynamicScaler::new(&config.scaler),
        }
    }

    pub fn len(&self) -> usize {
        self.fleet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fleet.is_empty()
    }

    pub fn elevator(&self, id: ElevatorId) -> Option<&Elevator> {
        self.fleet.get(&id)
    }

    pub fn elevators(&self) -> impl Iterator<Item = &Elevator> {
        self.fleet.values()
    }

    /// Assigns a hall call to the cheapest elevator and returns its id.
    pub fn handle_external_request(
        &mut self,
        request: ExternalRequest,
    ) -> Result<ElevatorId, DispatchError> {
        self.building.check_floor(request.floor)?;

        let best = self.find_best_elevator(&request)?;
        let elevator = self
            .fleet
            .get_mut(&best)
            .ok_or(DispatchError::UnknownElevator(best))?;
        elevator.add_external_request(&request)?;

        info!(
            "hall call at floor {} going {} assigned to elevator {}",
            request.floor, request.direction, best
        );
        Ok(best)
    }

    /// Adds a cab call to elevator `elevator_id`, bypassing cost evaluation.
    pub fn handle_internal_request(
        &mut self,
        elevator_id: ElevatorId,
        request: InternalRequest,
    ) -> Result<(), DispatchError> {
        self.building.check_floor(request.destination_floor)?;

        let elevator = self
            .fleet
            .get_mut(&elevator_id)
            .ok_or(DispatchError::UnknownElevator(elevator_id))?;
        elevator.add_internal_request(&request)?;

        debug!(
            "cab call to floor {} added to elevator {}",
            request.destination_floor, elevator_id
        );
        Ok(())
    }

    /// One synchronized tick: every elevator steps once, in fleet order.
    pub fn step_all_elevators(&mut self) {
        for elevator in self.fleet.values_mut() {
            elevator.step();
        }
    }

    /// Recomputes the active/power-saving partition. Returns how many elevators are active.
    pub fn adjust_elevator_count(&mut self, traffic: u32) -> usize {
        let active_count = self.scaler.adjust_elevator_count(self.fleet.values_mut(), traffic);
        info!(
            "traffic {}: {} of {} elevator(s) active",
            traffic,
            active_count,
            self.fleet.len()
        );
        active_count
    }

    pub fn snapshots(&self) -> Vec<ElevatorSnapshot> {
        self.fleet.values().map(Elevator::snapshot).collect()
    }

    /// Advisory time-to-serve of every elevator for `request`, in fleet order.
    pub fn estimate_time_to_serve(&self, request: &ExternalRequest) -> Vec<(ElevatorId, u32)> {
        self.fleet
            .values()
            .map(|elevator| (elevator.id(), elevator.estimate_time_to_serve(request)))
            .collect()
    }

    fn find_best_elevator(&self, request: &ExternalRequest) -> Result<ElevatorId, DispatchError> {
        let best = self.cheapest(request, |elevator| self.dispatch_cost(elevator, request));
        if best.is_some() || self.dispatch.power_saving != PowerSavingPolicy::Excluded {
            return best.ok_or(DispatchError::EmptyFleet);
        }

        // Every elevator is power-saving, wake the cheapest one
        warn!(
            "no active elevator for hall call at floor {}, dispatching to a power-saving one",
            request.floor
        );
        self.cheapest(request, |elevator| Some(elevator.calculate_cost(request)))
            .ok_or(DispatchError::EmptyFleet)
    }

    fn cheapest<F>(&self, request: &ExternalRequest, cost_of: F) -> Option<ElevatorId>
    where
        F: Fn(&Elevator) -> Option<u32>,
    {
        let mut best: Option<(ElevatorId, u32)> = None;

        for elevator in self.fleet.values() {
            let Some(cost) = cost_of(elevator) else {
                continue;
            };
            debug!(
                "elevator {} cost {} for hall call at floor {}",
                elevator.id(),
                cost,
                request.floor
            );
            if best.map_or(true, |(_, min_cost)| cost < min_cost) {
                best = Some((elevator.id(), cost));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Cost used for selection, `None` when the elevator may not take hall calls.
    fn dispatch_cost(&self, elevator: &Elevator, request: &ExternalRequest) -> Option<u32> {
        let cost = elevator.calculate_cost(request);
        if !elevator.is_power_saving() {
            return Some(cost);
        }

        match self.dispatch.power_saving {
            PowerSavingPolicy::Operational => Some(cost),
            PowerSavingPolicy::Excluded => None,
            PowerSavingPolicy::Penalized => {
                Some(cost.saturating_add(self.dispatch.power_saving_penalty))
            }
        }
    }
}
