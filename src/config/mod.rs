use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Coordinate;

/// Defaults for the George Square campus survey area.
pub mod defaults {
    /// Maximum number of moves for a whole flight, outbound plus return
    pub const MOVE_CEILING: usize = 150;
    /// Length of one move in degrees
    pub const STEP_LENGTH: f64 = 0.0003;
    /// Points checked along every candidate move
    pub const COLLISION_SAMPLES: usize = 1000;
    /// A sensor is read when the drone is closer than this
    pub const READING_RADIUS: f64 = 0.0002;
    /// The flight is home when the drone is closer than this to the start
    pub const HOMING_EPSILON: f64 = 0.0003;

    pub const CONFINEMENT_WEST: f64 = -3.192473;
    pub const CONFINEMENT_EAST: f64 = -3.184319;
    pub const CONFINEMENT_SOUTH: f64 = 55.942617;
    pub const CONFINEMENT_NORTH: f64 = 55.946233;

    pub const SERVER_HOST: &str = "localhost";
    pub const SERVER_PORT: u16 = 80;
}

fn default_move_ceiling() -> usize {
    defaults::MOVE_CEILING
}
fn default_step_length() -> f64 {
    defaults::STEP_LENGTH
}
fn default_collision_samples() -> usize {
    defaults::COLLISION_SAMPLES
}
fn default_reading_radius() -> f64 {
    defaults::READING_RADIUS
}
fn default_homing_epsilon() -> f64 {
    defaults::HOMING_EPSILON
}

/// Tunables of the route planner.
///
/// `collision_samples` trades planning fidelity against cost: every move,
/// real or simulated, is checked at this many evenly spaced points.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_move_ceiling")]
    pub move_ceiling: usize,
    #[serde(default = "default_step_length")]
    pub step_length: f64,
    #[serde(default = "default_collision_samples")]
    pub collision_samples: usize,
    #[serde(default = "default_reading_radius")]
    pub reading_radius: f64,
    #[serde(default = "default_homing_epsilon")]
    pub homing_epsilon: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            move_ceiling: default_move_ceiling(),
            step_length: default_step_length(),
            collision_samples: default_collision_samples(),
            reading_radius: default_reading_radius(),
            homing_epsilon: default_homing_epsilon(),
        }
    }
}

impl PlannerConfig {
    pub fn with_move_ceiling(mut self, move_ceiling: usize) -> Self {
        self.move_ceiling = move_ceiling;
        self
    }
}

fn default_server_host() -> String {
    defaults::SERVER_HOST.to_string()
}

fn default_server_port() -> u16 {
    defaults::SERVER_PORT
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Closed ring of the default confinement area
pub fn default_confinement() -> Vec<Coordinate> {
    use self::defaults::*;
    vec![
        Coordinate::new(CONFINEMENT_WEST, CONFINEMENT_NORTH),
        Coordinate::new(CONFINEMENT_EAST, CONFINEMENT_NORTH),
        Coordinate::new(CONFINEMENT_EAST, CONFINEMENT_SOUTH),
        Coordinate::new(CONFINEMENT_WEST, CONFINEMENT_SOUTH),
        Coordinate::new(CONFINEMENT_WEST, CONFINEMENT_NORTH),
    ]
}

fn default_confinement_positions() -> Vec<[f64; 2]> {
    default_confinement()
        .into_iter()
        .map(|c| [c.lng, c.lat])
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Confinement ring as `[lng, lat]` positions, first repeated last
    #[serde(default = "default_confinement_positions")]
    pub confinement: Vec<[f64; 2]>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            verbose: false,
            server: ServerConfig::default(),
            planner: PlannerConfig::default(),
            confinement: default_confinement_positions(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn confinement_ring(&self) -> Vec<Coordinate> {
        self.confinement.iter().map(|&p| Coordinate::from(p)).collect()
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("aqroute.toml"));
    paths.push(PathBuf::from(".aqroute.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("aqroute").join("config.toml"));
        paths.push(config_dir.join("aqroute.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".aqroute.toml"));
    }

    paths
}
