use std::{
    error::Error,
    io::{self, Write},
    sync::mpsc::RecvTimeoutError,
    time::Duration,
};

use args::Args;
use clap::Parser;
use life_lib::{
    Cell, Grid, GridPosition, GridSnapshot, SharedDisplay, Simulator, SimulatorReceiver,
    UiSender,
    communication::{SimulationSpeed, SimulatorPacket, UiPacket},
    config::Config,
    pattern::{PATTERNS, Pattern},
};

mod args;
mod render;

/// How often the display is checked for a new generation.
const DISPLAY_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// The errors that end the program after the simulation has been set up.
#[derive(thiserror::Error, Debug)]
enum TermError {
    #[error("Unknown pattern '{0}'. Known patterns: {known}", known = pattern_names())]
    UnknownPattern(String),
    #[error("Cell {position} is outside of the {width} by {height} grid")]
    CellOutOfRange {
        position: GridPosition,
        width: usize,
        height: usize,
    },
    #[error("{}", error_text::SIM_THREAD_CLOSED)]
    SimulatorClosed,
    #[error("{}", error_text::SHARED_DISPLAY_POISONED)]
    DisplayPoisoned,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let config_dir = match &args.config_path {
        Some(config_dir) => config_dir.clone(),
        None => Config::default_directory()?,
    };
    let config_path = config_dir.join(Config::FILE_NAME);

    let mut config = Config::load(&config_path)?;
    args.apply(&mut config);
    if args.save_config {
        config.save(&config_path)?;
        log::info!("Saved configuration to {config_path:?}");
    }

    let grid = seed_grid(&args, &config)?;
    log::info!(
        "Starting {} by {} grid with {} alive cells",
        grid.width(),
        grid.height(),
        grid.alive_count()
    );

    let shared_display = SharedDisplay::default();
    let board = life_flat::Board::new(grid, shared_display.clone());

    let ((ui_sender, ui_receiver), (simulator_sender, simulator_receiver)) =
        life_lib::create_channels();

    let simulator =
        life_lib::start_simulator(board, ui_receiver, simulator_sender, config.speed())
            .inspect_err(|_| eprintln!("{}", error_text::CREATE_SIMULATION_THREAD))?;

    let result = present(
        &shared_display,
        &ui_sender,
        &simulator_receiver,
        config.speed(),
        args.generations,
        &mut io::stdout().lock(),
    );

    // Command simulator thread to terminate after presenting has finished.
    if ui_sender.send(UiPacket::Terminate).is_err() {
        log::error!("{}", error_text::COMMAND_SIM_THREAD_TERM)
    };

    if simulator.join().is_err() {
        log::error!("{}", error_text::SIM_THREAD_TERM);
    }

    result
}

/// Creates the starting grid from the configuration, the chosen pattern & the chosen cells.
fn seed_grid(args: &Args, config: &Config) -> Result<Grid, Box<dyn Error>> {
    let mut grid = config.empty_grid()?;

    if let Some(name) = &args.pattern {
        let pattern = Pattern::find(name).ok_or_else(|| TermError::UnknownPattern(name.clone()))?;

        let origin = args.at.unwrap_or_else(|| {
            let (rows, columns) = pattern.size();
            GridPosition::new(
                grid.height().saturating_sub(rows) / 2,
                grid.width().saturating_sub(columns) / 2,
            )
        });

        let placed = pattern.place(&mut grid, origin);
        if placed < pattern.cells.len() {
            log::warn!(
                "Only {placed} of the {} cells of {} fit on the grid",
                pattern.cells.len(),
                pattern.name
            );
        }
    }

    for position in &args.cell {
        let index = grid
            .index_of(*position)
            .ok_or(TermError::CellOutOfRange {
                position: *position,
                width: grid.width(),
                height: grid.height(),
            })?;
        grid.set(index, Cell::Alive);
    }

    Ok(grid)
}

/// Runs the simulation until the given generation, writing the starting grid & every generation after it.
///
/// With a delay the generations are taken from the display as they are published. Without one the display would be
/// overwritten faster than it is polled, so the simulation is stepped one generation at a time instead.
fn present(
    shared_display: &SharedDisplay,
    ui_sender: &UiSender,
    simulator_receiver: &SimulatorReceiver,
    speed: SimulationSpeed,
    generations: u64,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut last_written = None;

    let mut snapshot = request_snapshot(ui_sender, simulator_receiver)?;
    write_new(&mut last_written, &snapshot, out)?;

    if speed.get().is_none() {
        while snapshot.generation() < generations {
            ui_sender
                .send(UiPacket::Step)
                .map_err(|_| TermError::SimulatorClosed)?;
            snapshot = request_snapshot(ui_sender, simulator_receiver)?;
            write_new(&mut last_written, &snapshot, out)?;
        }
        return Ok(());
    }

    ui_sender
        .send(UiPacket::StartUntil {
            generation: generations,
        })
        .map_err(|_| TermError::SimulatorClosed)?;

    loop {
        let stopped = match simulator_receiver.recv_timeout(DISPLAY_POLL_INTERVAL) {
            Ok(SimulatorPacket::Stopped { generation }) => {
                log::info!("Simulation stopped at generation {generation}");
                true
            }
            Ok(SimulatorPacket::Snapshot { .. } | SimulatorPacket::CycleDetected { .. })
            | Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => return Err(TermError::SimulatorClosed.into()),
        };

        let published = shared_display
            .lock()
            .map_err(|_| TermError::DisplayPoisoned)?
            .take();
        if let Some(snapshot) = published {
            write_new(&mut last_written, &snapshot, out)?;
        }

        if stopped {
            break;
        }
    }

    // Make sure the final generation is shown even if its publication was missed.
    let snapshot = request_snapshot(ui_sender, simulator_receiver)?;
    write_new(&mut last_written, &snapshot, out)?;
    Ok(())
}

/// Asks the simulator for a copy of the grid & waits for it.
fn request_snapshot(
    ui_sender: &UiSender,
    simulator_receiver: &SimulatorReceiver,
) -> Result<GridSnapshot, TermError> {
    ui_sender
        .send(UiPacket::Snapshot)
        .map_err(|_| TermError::SimulatorClosed)?;

    loop {
        match simulator_receiver.recv() {
            Ok(SimulatorPacket::Snapshot { snapshot }) => return Ok(snapshot),
            Ok(SimulatorPacket::Stopped { .. } | SimulatorPacket::CycleDetected { .. }) => continue,
            Err(_) => return Err(TermError::SimulatorClosed),
        }
    }
}

/// Writes the snapshot unless its generation was the last one written.
fn write_new(
    last_written: &mut Option<u64>,
    snapshot: &GridSnapshot,
    out: &mut impl Write,
) -> io::Result<()> {
    if *last_written == Some(snapshot.generation()) {
        return Ok(());
    }

    *last_written = Some(snapshot.generation());
    render::write_frame(out, snapshot)?;
    out.flush()
}

/// The names of every known pattern, separated by commas.
fn pattern_names() -> String {
    PATTERNS
        .iter()
        .map(|pattern| pattern.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Creates a public constant string with the name as the name of the constant
/// and the text as the value of the string.
///
/// # Examples
/// ```ignore
/// lang!{QUOTE, "Ya like jazz?"}
/// assert_eq!(QUOTE, "Ya like jazz?");
/// ```
#[macro_export]
macro_rules! lang {
    {$($name:tt, $text:literal);*} => {
        $(
        pub const $name: &str = $text;
        )*
    };
}

mod error_text {
    lang! {
        CREATE_SIMULATION_THREAD, "Unable to create thread for grid simulation at OS level.";
        SIM_THREAD_TERM, "Simulator thread was unable to gracefully terminate";
        SIM_THREAD_CLOSED, "Simulator thread stopped responding.";
        SHARED_DISPLAY_POISONED, "Unable to read grid from simulation.";
        COMMAND_SIM_THREAD_TERM, "Unable to command simulator thread to terminate."
    }
}

#[cfg(test)]
mod tests {
    use life_lib::Boundary;

    use super::*;

    fn args(arguments: &[&str]) -> Args {
        Args::parse_from(std::iter::once("life_term").chain(arguments.iter().copied()))
    }

    fn small_config() -> Config {
        Config {
            width: 5,
            height: 5,
            delay_ms: 0,
            boundary: Boundary::FlatIndex,
        }
    }

    #[test]
    /// Patterns are centred when no position is given.
    fn seed_centred_pattern() {
        let grid = seed_grid(&args(&["--pattern", "blinker"]), &small_config())
            .expect("Valid arguments");

        assert_eq!(grid.to_string(), ".....\n.....\n.###.\n.....\n.....");
    }

    #[test]
    fn seed_cells_and_position() {
        let grid = seed_grid(
            &args(&["--pattern", "block", "--at", "0,0", "--cell", "4,4"]),
            &small_config(),
        )
        .expect("Valid arguments");

        assert_eq!(grid.to_string(), "##...\n##...\n.....\n.....\n....#");
    }

    #[test]
    fn seed_rejects_unknown_pattern() {
        let error = seed_grid(&args(&["--pattern", "spaceship"]), &small_config())
            .expect_err("Unknown pattern");

        assert!(matches!(
            error.downcast_ref::<TermError>(),
            Some(TermError::UnknownPattern(_))
        ));
        assert!(error.to_string().contains("Glider"));
    }

    #[test]
    fn seed_rejects_cell_outside_grid() {
        let error = seed_grid(&args(&["--cell", "5,0"]), &small_config())
            .expect_err("Cell outside grid");

        assert!(matches!(
            error.downcast_ref::<TermError>(),
            Some(TermError::CellOutOfRange { .. })
        ));
    }

    #[test]
    /// Every generation from the start up to the requested one is written, each once.
    fn present_writes_each_generation() {
        let grid = seed_grid(&args(&["--pattern", "blinker"]), &small_config())
            .expect("Valid arguments");
        let shared_display = SharedDisplay::default();
        let board = life_flat::Board::new(grid, shared_display.clone());
        let ((ui_sender, ui_receiver), (simulator_sender, simulator_receiver)) =
            life_lib::create_channels();

        // A delay keeps every generation published long enough to be taken.
        let simulator = life_lib::start_simulator(
            board,
            ui_receiver,
            simulator_sender,
            SimulationSpeed::from_millis(100),
        )
        .expect("Able to start simulator thread");

        let mut out = Vec::new();
        present(
            &shared_display,
            &ui_sender,
            &simulator_receiver,
            SimulationSpeed::from_millis(100),
            2,
            &mut out,
        )
        .expect("Presenting succeeds");

        ui_sender.send(UiPacket::Terminate).expect("Simulator is listening");
        simulator.join().expect("Simulator thread exits cleanly");

        let text = String::from_utf8(out).expect("Valid utf8");
        assert!(text.starts_with("generation: 0\n.....\n.....\n.###.\n"));
        assert!(text.ends_with("generation: 2\n.....\n.....\n.###.\n.....\n.....\n\n"));
        assert_eq!(text.matches("generation: 2").count(), 1);
        assert!(text.contains("generation: 1\n.....\n..#..\n..#..\n..#..\n.....\n"));
    }

    #[test]
    /// Without a delay no generation is skipped.
    fn present_uncapped_writes_each_generation() {
        let grid = seed_grid(&args(&["--pattern", "glider", "--at", "0,0"]), &small_config())
            .expect("Valid arguments");
        let shared_display = SharedDisplay::default();
        let board = life_flat::Board::new(grid, shared_display.clone());
        let ((ui_sender, ui_receiver), (simulator_sender, simulator_receiver)) =
            life_lib::create_channels();

        let simulator = life_lib::start_simulator(
            board,
            ui_receiver,
            simulator_sender,
            SimulationSpeed::UNCAPPED,
        )
        .expect("Able to start simulator thread");

        let mut out = Vec::new();
        present(
            &shared_display,
            &ui_sender,
            &simulator_receiver,
            SimulationSpeed::UNCAPPED,
            6,
            &mut out,
        )
        .expect("Presenting succeeds");

        ui_sender.send(UiPacket::Terminate).expect("Simulator is listening");
        simulator.join().expect("Simulator thread exits cleanly");

        let text = String::from_utf8(out).expect("Valid utf8");
        for generation in 0..=6 {
            assert_eq!(
                text.matches(&format!("generation: {generation}\n")).count(),
                1,
                "Generation {generation} written once"
            );
        }
        assert!(!text.contains("generation: 7"));
    }
}
