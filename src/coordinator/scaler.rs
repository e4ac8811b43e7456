use crate::config::ScalerConfig;
use crate::elevator::Elevator;
use crate::shared::OperatingMode;

/// Flips elevators between active and power-saving mode from a traffic reading.
///
/// Stateless: every call recomputes the partition from scratch.
#[derive(Debug, Clone, Copy)]
pub struct DynamicScaler {
    traffic_threshold: u32,
}

impl DynamicScaler {
    pub fn new(config: &ScalerConfig) -> DynamicScaler {
        DynamicScaler {
            traffic_threshold: config.traffic_threshold,
        }
    }

    /// Number of elevators that stay active for `traffic` in a fleet of `fleet_size`.
    pub fn active_count(&self, fleet_size: usize, traffic: u32) -> usize {
        if traffic == self.traffic_threshold {
            fleet_size
        } else {
            fleet_size / 2
        }
    }

    /// Marks the first `active_count` elevators in fleet order active, the rest power-saving.
    pub fn adjust_elevator_count<'a, I>(&self, fleet: I, traffic: u32) -> usize
    where
        I: ExactSizeIterator<Item = &'a mut Elevator>,
    {
        let active_count = self.active_count(fleet.len(), traffic);

        for (index, elevator) in fleet.enumerate() {
            let mode = if index < active_count {
                OperatingMode::Active
            } else {
                OperatingMode::PowerSaving
            };
            elevator.set_state(mode);
        }

        active_count
    }
}
