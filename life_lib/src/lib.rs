mod cell;
pub mod communication;
pub mod config;
mod cycle;
mod display;
mod grid;
pub mod pattern;
mod position;
mod simulator;

pub use cell::Cell;
pub use cycle::CycleDetector;
pub use display::GridSnapshot;
pub use grid::{Boundary, Grid, GridError};
pub use position::GridPosition;
pub use simulator::Simulator;

use communication::{SimulationSpeed, SimulatorPacket, UiPacket};
use std::sync::{Arc, Mutex, mpsc};
use std::{thread, time::Duration};

/// How long the simulator waits between checking for packets while it is not running.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A pointer to the [`Mutex`] used to share the latest grid.
/// The simulator replaces the contained snapshot each time it publishes; the ui takes it to render it.
pub type SharedDisplay = Arc<Mutex<Option<GridSnapshot>>>;

/// The [`Receiver`] for [`UiPacket`]s from the ui.
///
/// [`Receiver`]: std::sync::mpsc::Receiver
pub type UiReceiver = mpsc::Receiver<UiPacket>;
/// The [`Sender`] for [`UiPacket`]s being sent from the ui.
/// Only the ui should ever have this [`Sender`].
///
/// [`Sender`]: std::sync::mpsc::Sender
pub type UiSender = mpsc::Sender<UiPacket>;
/// The [`Receiver`] for [`SimulatorPacket`]s from the [`Simulator`].
///
/// [`Receiver`]: std::sync::mpsc::Receiver
pub type SimulatorReceiver = mpsc::Receiver<SimulatorPacket>;
/// The [`Sender`] for [`SimulatorPacket`]s being sent from the [`Simulator`].
/// Only the [`Simulator`] should ever have this [`Sender`].
///
/// [`Sender`]: std::sync::mpsc::Sender
pub type SimulatorSender = mpsc::Sender<SimulatorPacket>;

/// Creates the channels for communication between the [`Simulator`] & the UI.
pub fn create_channels() -> ((UiSender, UiReceiver), (SimulatorSender, SimulatorReceiver)) {
    (mpsc::channel(), mpsc::channel())
}

/// Starts the simulation on a new thread without a callback.
///
/// For more information see [`start_simulator_with_callback`].
pub fn start_simulator(
    simulator: impl Simulator + 'static,
    ui_receiver: UiReceiver,
    simulator_sender: SimulatorSender,
    speed: SimulationSpeed,
) -> Result<thread::JoinHandle<()>, std::io::Error> {
    start_simulator_with_callback(simulator, ui_receiver, simulator_sender, speed, (), |_, _| {})
}

/// Starts the given simulation on a new thread. The simulation is stopped until a [`UiPacket::Start`] is received.
///
/// While running, each iteration computes the next generation, publishes it to the display & then waits for the
/// delay of the given speed. Packets are only processed between iterations, so a [`UiPacket::Stop`] takes effect
/// at the start of the next iteration & never interrupts a generation being computed.
///
/// The given callback is called on every iteration of the loop.
/// Due to this the callback **should not** be computationally intensive.
///
/// The callback will not have any effect on the state of the simulation.
/// The only value it can mutate is the given `Data` value, which allows the callback to persist its own state between simulation ticks.
///
/// The thread ends when [`UiPacket::Terminate`] is received or the ui drops its [`UiSender`].
///
/// # Panics
/// If the callback panics, this will be propagrated to the simulation thread and terminate the simulation.
pub fn start_simulator_with_callback<Data, Callback>(
    mut simulator: impl Simulator + 'static,
    ui_receiver: UiReceiver,
    simulator_sender: SimulatorSender,
    speed: SimulationSpeed,
    mut data: Data,
    mut callback: Callback,
) -> Result<thread::JoinHandle<()>, std::io::Error>
where
    Callback: FnMut(&mut Data, IsRunning) + Send + 'static,
    Data: Send + 'static,
{
    thread::Builder::new()
        .name("Simulator_Thread".into())
        .spawn(move || {
            let send_packet = |packet: SimulatorPacket| {
                if simulator_sender.send(packet).is_err() {
                    log::warn!("UI stopped listening to the simulation");
                }
            };

            // Used to keep a fixed delay between generations. A late tick delays the following ticks rather than
            // shortening the wait after it.
            let mut tick_rate_limiter =
                spin_sleep_util::interval(speed.get().unwrap_or(SimulationSpeed::DEFAULT_DELAY));
            tick_rate_limiter.set_missed_tick_behavior(spin_sleep_util::MissedTickBehavior::Delay);
            let mut tick_rate_limited = speed.get().is_some();

            let mut cycle_detector = CycleDetector::default();
            let mut is_running = false;
            let mut run_until = None;
            let mut display_needs_updating = true;

            loop {
                // Process all received packets.
                loop {
                    use std::sync::mpsc::TryRecvError;
                    let ui_packet = match ui_receiver.try_recv() {
                        Ok(ui_packet) => ui_packet,
                        Err(TryRecvError::Empty) => {
                            break;
                        }
                        Err(TryRecvError::Disconnected) => {
                            log::warn!("UI closed communication to simulation, stopping simulator");
                            return;
                        }
                    };

                    log::trace!("Received {ui_packet:?}");
                    match ui_packet {
                        UiPacket::Set { index, cell_state } => {
                            simulator.set(index, cell_state);
                            cycle_detector.clear();
                            display_needs_updating = true;
                        }
                        UiPacket::Toggle { index } => {
                            simulator.toggle(index);
                            cycle_detector.clear();
                            display_needs_updating = true;
                        }
                        UiPacket::Clear => {
                            simulator.reset();
                            cycle_detector.clear();
                            display_needs_updating = true;
                        }
                        UiPacket::Start | UiPacket::StartUntil { .. } => {
                            run_until = match ui_packet {
                                UiPacket::StartUntil { generation } => Some(generation),
                                _ => None,
                            };
                            log::info!(
                                "Simulation started at generation {}, running until {run_until:?}",
                                simulator.get_generation()
                            );

                            // Restart the delay schedule from now, as it was not followed whilst stopped.
                            if !is_running && tick_rate_limited {
                                tick_rate_limiter.tick();
                            }
                            is_running = true;
                        }
                        UiPacket::Stop => {
                            log::info!("Simulation stopped at generation {}", simulator.get_generation());
                            is_running = false;
                            run_until = None;
                        }
                        UiPacket::Step => {
                            simulator.tick();
                            detect_cycle(&simulator, &mut cycle_detector, &simulator_sender);
                            display_needs_updating = true;
                        }
                        UiPacket::SimulationSpeed { speed } => match speed.get() {
                            Some(delay) => {
                                tick_rate_limiter.set_period(delay);
                                tick_rate_limited = true;
                            }
                            None => {
                                tick_rate_limited = false;
                            }
                        },
                        UiPacket::Snapshot => {
                            send_packet(SimulatorPacket::Snapshot {
                                snapshot: simulator.snapshot(),
                            });
                        }
                        UiPacket::Terminate => return,
                    }
                }

                // Execute the user defined callback with the user data.
                callback(&mut data, IsRunning(is_running));

                if let Some(generation) = run_until {
                    if simulator.get_generation() >= generation {
                        log::info!("Simulation reached generation {generation}");
                        is_running = false;
                        run_until = None;
                        simulator.update_display();
                        display_needs_updating = false;
                        send_packet(SimulatorPacket::Stopped {
                            generation: simulator.get_generation(),
                        });
                    }
                }

                // If the game is not running then wait before performing any updates to save resources.
                if !is_running {
                    if display_needs_updating {
                        simulator.update_display();
                        display_needs_updating = false;
                    }

                    thread::sleep(IDLE_POLL_INTERVAL);
                    continue;
                }

                simulator.tick();
                simulator.update_display();
                display_needs_updating = false;
                log::debug!(
                    "Generation {}: {} alive",
                    simulator.get_generation(),
                    simulator.grid().alive_count()
                );

                detect_cycle(&simulator, &mut cycle_detector, &simulator_sender);

                if tick_rate_limited {
                    tick_rate_limiter.tick();
                }
            }
        })
}

/// Records the current generation, telling the ui the first time the grid repeats.
fn detect_cycle(
    simulator: &impl Simulator,
    cycle_detector: &mut CycleDetector,
    simulator_sender: &SimulatorSender,
) {
    let Some(period) = cycle_detector.observe(simulator.grid().fingerprint()) else {
        return;
    };

    let generation = simulator.get_generation();
    log::info!("Grid repeats every {period} generation(s) as of generation {generation}");

    if simulator_sender
        .send(SimulatorPacket::CycleDetected { period, generation })
        .is_err()
    {
        log::warn!("UI stopped listening to the simulation");
    }
}

/// This boolean value represents whether the simulation is currently running or not.
///
/// If it is true, the simulation is running.
/// If it is false, the simulation is not running.
///
/// This value **cannot** be changed to control the state of the simulation.
#[derive(Debug, derive_more::Deref)]
pub struct IsRunning(bool);
