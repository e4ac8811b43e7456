/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::coordinator::Command;
use crate::shared::{Direction, ElevatorId, ExternalRequest, Floor, InternalRequest};

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("event at tick {tick} is past the end of the scenario ({ticks} ticks)")]
    EventAfterEnd { tick: u64, ticks: u64 },

    #[error("hall call at tick {tick} must go up or down, not idle")]
    IdleHallCall { tick: u64 },
}

/***************************************/
/*       Public data structures        */
/***************************************/

/**
 * Scripted run read from TOML.
 *
 * ```toml
 * ticks = 6
 *
 * [[event]]
 * tick = 0
 * kind = "hall"
 * floor = 5
 * direction = "up"
 *
 * [[event]]
 * tick = 1
 * kind = "cab"
 * elevator = 0
 * floor = 12
 *
 * [[event]]
 * tick = 2
 * kind = "traffic"
 * traffic = 4
 * ```
 *
 * Events for a tick are applied in file order before that tick's step.
 */
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Scenario {
    pub ticks: u64,
    #[serde(default, rename = "event")]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScenarioEvent {
    Hall {
        tick: u64,
        floor: Floor,
        direction: Direction,
    },
    Cab {
        tick: u64,
        elevator: u32,
        floor: Floor,
    },
    Traffic {
        tick: u64,
        traffic: u32,
    },
}

impl ScenarioEvent {
    pub fn tick(&self) -> u64 {
        match *self {
            ScenarioEvent::Hall { tick, .. } => tick,
            ScenarioEvent::Cab { tick, .. } => tick,
            ScenarioEvent::Traffic { tick, .. } => tick,
        }
    }

    pub fn to_command(&self) -> Command {
        match *self {
            ScenarioEvent::Hall {
                floor, direction, ..
            } => Command::HallCall(ExternalRequest::new(floor, direction)),
            ScenarioEvent::Cab {
                elevator, floor, ..
            } => Command::CabCall(ElevatorId(elevator), InternalRequest::new(floor)),
            ScenarioEvent::Traffic { traffic, .. } => Command::AdjustTraffic(traffic),
        }
    }
}

impl Scenario {
    pub fn from_toml_str(scenario_str: &str) -> Result<Scenario, ScenarioError> {
        let scenario: Scenario = toml::from_str(scenario_str)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        for event in &self.events {
            if event.tick() >= self.ticks {
                return Err(ScenarioError::EventAfterEnd {
                    tick: event.tick(),
                    ticks: self.ticks,
                });
            }
            if let ScenarioEvent::Hall {
                tick,
                direction: Direction::Idle,
                ..
            } = *event
            {
                return Err(ScenarioError::IdleHallCall { tick });
            }
        }
        Ok(())
    }

    /// Events scheduled for `tick`, in file order.
    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = &ScenarioEvent> {
        self.events.iter().filter(move |event| event.tick() == tick)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let scenario_str = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Scenario::from_toml_str(&scenario_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
