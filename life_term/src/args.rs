use std::path::PathBuf;

use clap::Parser;
use life_lib::{Boundary, GridPosition, config::Config};

/// Runs Conways game of life on a fixed size grid, printing every generation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The path to the directory which will contain the user configuration data.
    #[arg(short, long, value_name = "DIR")]
    pub(crate) config_path: Option<PathBuf>,

    /// The amount of cells in each row.
    #[arg(long)]
    pub(crate) width: Option<usize>,
    /// The amount of rows.
    #[arg(long)]
    pub(crate) height: Option<usize>,
    /// The delay between generations in milliseconds. Zero runs as fast as possible.
    #[arg(short, long, value_name = "MS")]
    pub(crate) delay_ms: Option<u64>,
    /// Treat cells beyond the left & right edges as dead, instead of looking into the adjacent rows.
    #[arg(long)]
    pub(crate) clipped: bool,

    /// A pattern to start from: block, blinker, toad, beacon, glider or r-pentomino.
    #[arg(short, long)]
    pub(crate) pattern: Option<String>,
    /// The top-left position of the pattern. Defaults to the centre of the grid.
    #[arg(long, value_name = "ROW,COLUMN")]
    pub(crate) at: Option<GridPosition>,
    /// A cell to set alive before starting. Can be given multiple times.
    #[arg(long, value_name = "ROW,COLUMN")]
    pub(crate) cell: Vec<GridPosition>,

    /// The generation to stop at.
    #[arg(short, long, default_value_t = 10)]
    pub(crate) generations: u64,

    /// Writes the configuration, including any values given on the command line, back to the configuration file.
    #[arg(long)]
    pub(crate) save_config: bool,
}

impl Args {
    /// Overrides the configuration with the values given on the command line.
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if self.clipped {
            config.boundary = Boundary::Clipped;
        }
    }
}
