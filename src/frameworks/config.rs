use crate::domain::Tuning;
use std::{env, fmt, path::Path, path::PathBuf, time::Duration};

// Runtime/client constants (not gameplay tuning).

pub const MAX_FRAME_DT: Duration = Duration::from_millis(100);
pub const INPUT_SAMPLE_PERIOD: Duration = Duration::from_millis(50);
pub const FPS_WINDOW: usize = 60;
pub const INTERPOLATION_DELAY: Duration = Duration::from_millis(50);

pub const TRANSPORT_CHANNEL_CAPACITY: usize = 256;
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 64;
pub const INPUT_CHANNEL_CAPACITY: usize = 16;

// Used when RUST_LOG is unset: this crate at info, dependencies at warn.
pub const DEFAULT_LOG_FILTER: &str = "arena_sync=info,warn";
// Peers the headless renderer can represent per frame.
pub const RENDER_PEER_SLOTS: usize = 64;

pub fn local_player_id() -> u64 {
    env::var("LOCAL_PLAYER_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
}

pub fn frame_rate_hz() -> u32 {
    env::var("FRAME_RATE_HZ")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|hz| *hz > 0)
        .unwrap_or(60)
}

pub fn frame_interval() -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(frame_rate_hz()))
}

pub fn tuning_path() -> Option<PathBuf> {
    env::var_os("ARENA_TUNING_PATH").map(PathBuf::from)
}

/// File or FIFO the input collaborator writes one intent object per line to.
pub fn input_source_path() -> Option<PathBuf> {
    env::var_os("INPUT_SOURCE_PATH").map(PathBuf::from)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

pub fn log_format() -> LogFormat {
    parse_log_format(env::var("LOG_FORMAT").ok().as_deref())
}

fn parse_log_format(value: Option<&str>) -> LogFormat {
    match value {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Compact,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse tuning file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn parse_tuning(text: &str) -> Result<Tuning, ConfigError> {
    let tuning: Tuning = toml::from_str(text).map_err(ConfigError::Parse)?;
    validate(&tuning)?;
    Ok(tuning)
}

pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_tuning(&text)
}

fn validate(tuning: &Tuning) -> Result<(), ConfigError> {
    let arena = &tuning.arena;
    if arena.width <= 0.0 || arena.height <= 0.0 || arena.half_size < 0.0 {
        return Err(ConfigError::Invalid("arena dimensions must be positive".into()));
    }
    let r = &tuning.reconcile;
    if r.fine_threshold > r.snap_threshold {
        return Err(ConfigError::Invalid(
            "fine_threshold must not exceed snap_threshold".into(),
        ));
    }
    let blends = [r.fine_blend, r.coarse_blend];
    if blends.iter().any(|b| !(0.0..=1.0).contains(b)) {
        return Err(ConfigError::Invalid("blend factors must lie in 0..=1".into()));
    }
    if tuning.flashlight.ray_step <= 0.0 {
        return Err(ConfigError::Invalid("ray_step must be positive".into()));
    }
    Ok(())
}
