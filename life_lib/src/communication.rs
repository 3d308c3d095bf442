use std::time::Duration;

use crate::{Cell, GridSnapshot};

/// The data packets that the UI will send to the simulator.
#[derive(Debug)]
pub enum UiPacket {
    /// Sets a cell on the grid.
    Set {
        /// The index of the cell to set.
        index: usize,
        /// The state of the cell to set.
        cell_state: Cell,
    },
    /// Flips a cell on the grid.
    Toggle { index: usize },
    /// Kills every cell on the grid.
    Clear,

    /// Starts the simulation.
    Start,
    /// Starts the simulation, with it automatically stopping at the given generation.
    StartUntil { generation: u64 },
    /// Stops the simulation.
    Stop,
    /// Advances the simulation by a single generation.
    Step,

    /// Sets the current speed of the simulation.
    SimulationSpeed { speed: SimulationSpeed },

    /// Requests for the simulator to send a copy of the grid in its current state.
    Snapshot,

    /// Terminates the simulator thread.
    /// This is unrecoverable without relaunching the application.
    Terminate,
}

/// The data packets that the simulator will send to the ui.
#[derive(Debug)]
pub enum SimulatorPacket {
    /// A copy of the grid in its current state.
    Snapshot { snapshot: GridSnapshot },
    /// The simulation stopped by itself after reaching the generation requested with [`UiPacket::StartUntil`].
    Stopped { generation: u64 },
    /// The grid became identical to one of its recent generations.
    /// Sent once per cycle, until the grid is edited or cleared.
    CycleDetected {
        /// The amount of generations between repeats. A still life has a period of 1.
        period: usize,
        /// The generation at which the repeat was found.
        generation: u64,
    },
}

/// The delay between generations while the simulation is running.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SimulationSpeed {
    pub(crate) delay: Option<Duration>,
}

impl SimulationSpeed {
    /// The delay used by the reference front-end.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// Generations are computed as fast as possible.
    pub const UNCAPPED: Self = {
        Self { delay: None }
    };

    /// Creates a speed that waits the given amount of milliseconds between generations.
    /// A delay of zero is [`SimulationSpeed::UNCAPPED`].
    pub fn from_millis(delay_ms: u64) -> Self {
        match delay_ms {
            0 => Self::UNCAPPED,
            delay_ms => Self {
                delay: Some(Duration::from_millis(delay_ms)),
            },
        }
    }

    /// Gets the delay between generations.
    /// If [`None`] is returned there is no cap for the simulation speed.
    pub fn get(&self) -> Option<Duration> {
        self.delay
    }
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        Self {
            delay: Some(Self::DEFAULT_DELAY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_half_a_second() {
        assert_eq!(
            SimulationSpeed::default().get(),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn zero_is_uncapped() {
        assert_eq!(SimulationSpeed::from_millis(0), SimulationSpeed::UNCAPPED);
        assert_eq!(
            SimulationSpeed::from_millis(20).get(),
            Some(Duration::from_millis(20))
        );
    }
}
