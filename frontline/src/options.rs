use clap::{Args, Parser, Subcommand};
use icefront::{
    chrono::{DateTime, Utc},
    Config,
};
use std::path::PathBuf;

/// Detect ice-shelf front crossings and rampart-moat features in
/// along-track height profiles.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// JSON file holding an array of ground-track profiles.
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON config file. Missing fields take their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip weak beams.
    #[arg(long, default_value_t = false)]
    pub strong_only: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub cmd: Command,
}

/// Per-run overrides of individual config fields.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Mean dynamic topography offset (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub mdt: Option<f64>,

    /// Lowest valid corrected height (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub h_ss_low: Option<f64>,

    /// Highest valid corrected height (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub h_ss_high: Option<f64>,

    /// Seaward side of a front must be below this height (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub h_a_upper_limit: Option<f64>,

    /// Smallest front jump, exclusive (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub h_diff_lower_limit: Option<f64>,

    /// Largest front jump, exclusive (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub h_diff_upper_limit: Option<f64>,

    /// Largest along-track gap across a front (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub jump_x_dist_upper_limit: Option<f64>,

    /// Moats must stay above this height (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub moat_h_lower_limit: Option<f64>,

    /// Landward reach of the moat search (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub moat_search_dist: Option<f64>,

    /// Seaward reach of the rampart search (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub rampart_max_search_dist: Option<f64>,

    /// Along-track sample spacing (meters).
    #[arg(long, allow_hyphen_values = true)]
    pub step_size: Option<f64>,

    /// Epoch of sample times, RFC 3339.
    #[arg(long)]
    pub ref_time: Option<DateTime<Utc>>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        let Self {
            mdt,
            h_ss_low,
            h_ss_high,
            h_a_upper_limit,
            h_diff_lower_limit,
            h_diff_upper_limit,
            jump_x_dist_upper_limit,
            moat_h_lower_limit,
            moat_search_dist,
            rampart_max_search_dist,
            step_size,
            ref_time,
        } = self.clone();
        let set = |field: &mut f64, value: Option<f64>| {
            if let Some(value) = value {
                *field = value;
            }
        };
        set(&mut config.mdt, mdt);
        set(&mut config.h_ss_low, h_ss_low);
        set(&mut config.h_ss_high, h_ss_high);
        set(&mut config.h_a_upper_limit, h_a_upper_limit);
        set(&mut config.h_diff_lower_limit, h_diff_lower_limit);
        set(&mut config.h_diff_upper_limit, h_diff_upper_limit);
        set(&mut config.jump_x_dist_upper_limit, jump_x_dist_upper_limit);
        set(&mut config.moat_h_lower_limit, moat_h_lower_limit);
        set(&mut config.moat_search_dist, moat_search_dist);
        set(&mut config.rampart_max_search_dist, rampart_max_search_dist);
        set(&mut config.step_size, step_size);
        if let Some(ref_time) = ref_time {
            config.ref_time = ref_time;
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print one CSV row per profile to stdout.
    Csv,

    /// Print per-profile records as JSON to stdout.
    Json,

    /// Print per cycle and direction detection counts.
    Summary,

    /// Plot one corrected profile to the terminal.
    Plot {
        /// Beam name, e.g. `gt1l`.
        #[arg(long)]
        beam: String,

        #[arg(long)]
        cycle: u16,

        /// Reference ground track, required when the input holds
        /// more than one.
        #[arg(long)]
        track: Option<u16>,
    },
}
