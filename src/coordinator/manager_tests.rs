/*
 * Unit tests for the elevator manager
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_manager_init
 *  - test_hall_call_tie_goes_to_first_elevator
 *  - test_hall_call_goes_to_cheapest
 *  - test_cab_call_bypasses_cost
 *  - test_unknown_elevator_rejected
 *  - test_out_of_range_floor_rejected
 *  - test_empty_fleet_rejected
 *  - test_with_fleet_keeps_prebuilt_elevators
 *  - test_with_fleet_rejects_duplicate_ids
 *  - test_with_fleet_rejects_mismatched_bounds
 *  - test_step_all_elevators_is_independent
 *  - test_power_saving_operational
 *  - test_power_saving_excluded
 *  - test_power_saving_excluded_falls_back
 *  - test_power_saving_penalized
 *  - test_time_estimates_in_fleet_order
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod manager_tests {
    use crate::config::{BuildingConfig, Config, ConfigError, PowerSavingPolicy};
    use crate::coordinator::ElevatorManager;
    use crate::elevator::Elevator;
    use crate::shared::Direction::{Down, Idle, Up};
    use crate::shared::OperatingMode::{Active, PowerSaving};
    use crate::shared::{DispatchError, ElevatorId, ExternalRequest, InternalRequest};

    fn setup_manager(n_elevators: u32) -> ElevatorManager {
        let mut config = Config::default();
        config.building.n_elevators = n_elevators;
        ElevatorManager::new(&config)
    }

    fn setup_manager_with_policy(policy: PowerSavingPolicy) -> ElevatorManager {
        let mut config = Config::default();
        config.building.n_elevators = 2;
        config.dispatch.power_saving = policy;
        config.dispatch.power_saving_penalty = 4;
        ElevatorManager::new(&config)
    }

    // Moves elevator `id` to `floor` through a cab call and a tick
    fn park(manager: &mut ElevatorManager, id: u32, floor: i32) {
        manager
            .handle_internal_request(ElevatorId(id), InternalRequest::new(floor))
            .unwrap();
        manager.step_all_elevators();
    }

    #[test]
    fn test_manager_init() {
        // Arrange
        let manager = setup_manager(3);

        // Assert
        assert_eq!(manager.len(), 3);
        for (index, snapshot) in manager.snapshots().iter().enumerate() {
            assert_eq!(snapshot.id, ElevatorId(index as u32));
            assert_eq!(snapshot.current_floor, 0);
            assert_eq!(snapshot.direction, Idle);
            assert_eq!(snapshot.state, None);
            assert_eq!(snapshot.pending_stops, 0);
        }
    }

    #[test]
    fn test_hall_call_tie_goes_to_first_elevator() {
        // Arrange
        let mut manager = setup_manager(3);
        let before = manager.snapshots();

        // Act
        let assigned = manager
            .handle_external_request(ExternalRequest::new(5, Up))
            .unwrap();
        manager.step_all_elevators();

        // Assert
        assert_eq!(assigned, ElevatorId(0));
        let first = manager.elevator(ElevatorId(0)).unwrap();
        assert_eq!(first.current_floor(), 5);
        assert_eq!(first.direction(), Idle);
        assert!(first.stops().is_empty());
        assert_eq!(manager.snapshots()[1..], before[1..]);
    }

    #[test]
    fn test_hall_call_goes_to_cheapest() {
        // Arrange
        let mut manager = setup_manager(3);
        park(&mut manager, 1, 12);
        park(&mut manager, 2, 20);

        // Act
        let near_twelve = manager
            .handle_external_request(ExternalRequest::new(14, Down))
            .unwrap();
        let near_twenty = manager
            .handle_external_request(ExternalRequest::new(19, Up))
            .unwrap();
        let near_ground = manager
            .handle_external_request(ExternalRequest::new(2, Up))
            .unwrap();

        // Assert
        assert_eq!(near_twelve, ElevatorId(1));
        assert_eq!(near_twenty, ElevatorId(2));
        assert_eq!(near_ground, ElevatorId(0));
    }

    #[test]
    fn test_cab_call_bypasses_cost() {
        // Arrange
        let mut manager = setup_manager(2);

        // Act
        manager
            .handle_internal_request(ElevatorId(1), InternalRequest::new(25))
            .unwrap();

        // Assert
        assert!(manager.elevator(ElevatorId(0)).unwrap().stops().is_empty());
        assert_eq!(manager.elevator(ElevatorId(1)).unwrap().stops(), &[25]);
    }

    #[test]
    fn test_unknown_elevator_rejected() {
        let mut manager = setup_manager(2);

        let result = manager.handle_internal_request(ElevatorId(2), InternalRequest::new(3));

        assert_eq!(result, Err(DispatchError::UnknownElevator(ElevatorId(2))));
    }

    #[test]
    fn test_out_of_range_floor_rejected() {
        // Arrange
        let mut manager = setup_manager(2);

        // Act
        let hall = manager.handle_external_request(ExternalRequest::new(40, Down));
        let cab = manager.handle_internal_request(ElevatorId(0), InternalRequest::new(-2));

        // Assert
        assert_eq!(
            hall,
            Err(DispatchError::FloorOutOfRange { floor: 40, min: 0, max: 27 })
        );
        assert_eq!(
            cab,
            Err(DispatchError::FloorOutOfRange { floor: -2, min: 0, max: 27 })
        );
        assert!(manager.snapshots().iter().all(|s| s.pending_stops == 0));
    }

    #[test]
    fn test_empty_fleet_rejected() {
        let mut manager = ElevatorManager::with_fleet(Vec::new(), &Config::default()).unwrap();

        let result = manager.handle_external_request(ExternalRequest::new(3, Up));

        assert!(manager.is_empty());
        assert_eq!(result, Err(DispatchError::EmptyFleet));
    }

    #[test]
    fn test_with_fleet_keeps_prebuilt_elevators() {
        // Arrange
        let config = Config::default();
        let elevators = [4, 1]
            .into_iter()
            .map(|id| Elevator::new(ElevatorId(id), &config.building, &config.timing))
            .collect();

        // Act
        let manager = ElevatorManager::with_fleet(elevators, &config).unwrap();

        // Assert: fleet order is id order
        let ids: Vec<ElevatorId> = manager.elevators().map(Elevator::id).collect();
        assert_eq!(ids, vec![ElevatorId(1), ElevatorId(4)]);
    }

    #[test]
    fn test_with_fleet_rejects_duplicate_ids() {
        // Arrange
        let config = Config::default();
        let elevators = [0, 1, 1]
            .into_iter()
            .map(|id| Elevator::new(ElevatorId(id), &config.building, &config.timing))
            .collect();

        // Act
        let result = ElevatorManager::with_fleet(elevators, &config);

        // Assert
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_with_fleet_rejects_mismatched_bounds() {
        let config = Config::default();
        let taller = BuildingConfig {
            max_floor: 40,
            ..config.building
        };
        let elevators = vec![
            Elevator::new(ElevatorId(0), &config.building, &config.timing),
            Elevator::new(ElevatorId(1), &taller, &config.timing),
        ];

        let result = ElevatorManager::with_fleet(elevators, &config);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_step_all_elevators_is_independent() {
        // Arrange
        let mut manager = setup_manager(2);
        for floor in [4, 9] {
            manager
                .handle_internal_request(ElevatorId(0), InternalRequest::new(floor))
                .unwrap();
        }
        manager
            .handle_internal_request(ElevatorId(1), InternalRequest::new(15))
            .unwrap();

        // Act
        manager.step_all_elevators();

        // Assert
        let snapshots = manager.snapshots();
        assert_eq!((snapshots[0].current_floor, snapshots[0].direction), (4, Up));
        assert_eq!((snapshots[1].current_floor, snapshots[1].direction), (15, Idle));

        manager.step_all_elevators();
        let snapshots = manager.snapshots();
        assert_eq!((snapshots[0].current_floor, snapshots[0].direction), (9, Idle));
        assert_eq!(snapshots[1].current_floor, 15);
    }

    #[test]
    fn test_power_saving_operational() {
        // Arrange: elevator 1 sleeps but sits right at the call
        let mut manager = setup_manager_with_policy(PowerSavingPolicy::Operational);
        park(&mut manager, 1, 6);
        manager.adjust_elevator_count(0);

        // Act
        let assigned = manager
            .handle_external_request(ExternalRequest::new(6, Down))
            .unwrap();

        // Assert
        assert_eq!(manager.elevator(ElevatorId(1)).unwrap().state(), Some(PowerSaving));
        assert_eq!(assigned, ElevatorId(1));
    }

    #[test]
    fn test_power_saving_excluded() {
        let mut manager = setup_manager_with_policy(PowerSavingPolicy::Excluded);
        park(&mut manager, 1, 6);
        manager.adjust_elevator_count(0);

        let assigned = manager
            .handle_external_request(ExternalRequest::new(6, Down))
            .unwrap();

        assert_eq!(manager.elevator(ElevatorId(0)).unwrap().state(), Some(Active));
        assert_eq!(assigned, ElevatorId(0));
    }

    #[test]
    fn test_power_saving_excluded_falls_back() {
        // Arrange: a single elevator is always put to sleep below the threshold
        let mut config = Config::default();
        config.building.n_elevators = 1;
        config.dispatch.power_saving = PowerSavingPolicy::Excluded;
        let mut manager = ElevatorManager::new(&config);
        assert_eq!(manager.adjust_elevator_count(1), 0);

        // Act
        let assigned = manager.handle_external_request(ExternalRequest::new(3, Up));

        // Assert
        assert_eq!(assigned, Ok(ElevatorId(0)));
    }

    #[test]
    fn test_power_saving_penalized() {
        // Arrange: penalty is 4
        let mut manager = setup_manager_with_policy(PowerSavingPolicy::Penalized);
        park(&mut manager, 1, 6);
        manager.adjust_elevator_count(0);

        // Act: costs 6 vs 0 + 4, then 3 vs 3 + 4
        let close_to_sleeper = manager
            .handle_external_request(ExternalRequest::new(6, Down))
            .unwrap();
        let in_between = manager
            .handle_external_request(ExternalRequest::new(3, Down))
            .unwrap();

        // Assert
        assert_eq!(close_to_sleeper, ElevatorId(1));
        assert_eq!(in_between, ElevatorId(0));
    }

    #[test]
    fn test_time_estimates_in_fleet_order() {
        let mut manager = setup_manager(2);
        park(&mut manager, 1, 10);

        let estimates = manager.estimate_time_to_serve(&ExternalRequest::new(4, Up));

        assert_eq!(estimates, vec![(ElevatorId(0), 8), (ElevatorId(1), 12)]);
    }
}
