//! Tool configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file placed in the config directory (the
//! current directory unless `--config-dir` says otherwise).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [qr]
//! size = 256                # Side length of the QR square in pixels
//! margin = 2                # Quiet zone width in modules
//! ec_level = "M"            # Error correction: L, M, Q or H
//! dark = "#000000"
//! light = "#FFFFFF"
//!
//! [label]
//! enabled = true            # Draw the ID below the code
//! prefix = "ID: "
//! band_height = 64          # Extra canvas height reserved for the label
//! max_scale = 5             # Largest glyph scale (8px glyphs x scale)
//!
//! [limits]
//! max_id_length = 50        # Single-ID length limit
//! max_batch = 1000          # Maximum records per batch
//!
//! [workbook]
//! sheet_name = "QR Codes"
//! row_height = 140          # Data row height in points
//! image_width = 100         # Bounding box for embedded images (pixels)
//! image_height = 140
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// QR rendering settings.
    pub qr: QrConfig,
    /// ID label drawn under the code.
    pub label: LabelConfig,
    /// Input limits.
    pub limits: LimitsConfig,
    /// Excel export layout.
    pub workbook: WorkbookConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.qr.size < 21 {
            return Err(ConfigError::Validation(
                "qr.size must be at least 21 pixels".into(),
            ));
        }
        if parse_hex_color(&self.qr.dark).is_none() {
            return Err(ConfigError::Validation(format!(
                "qr.dark is not a #RRGGBB color: {}",
                self.qr.dark
            )));
        }
        if parse_hex_color(&self.qr.light).is_none() {
            return Err(ConfigError::Validation(format!(
                "qr.light is not a #RRGGBB color: {}",
                self.qr.light
            )));
        }
        if self.label.max_scale == 0 {
            return Err(ConfigError::Validation(
                "label.max_scale must be non-zero".into(),
            ));
        }
        if self.label.enabled && self.label.band_height < 8 {
            return Err(ConfigError::Validation(
                "label.band_height must be at least 8 when labels are enabled".into(),
            ));
        }
        if self.limits.max_id_length == 0 || self.limits.max_batch == 0 {
            return Err(ConfigError::Validation(
                "limits values must be non-zero".into(),
            ));
        }
        if self.workbook.sheet_name.is_empty() || self.workbook.sheet_name.chars().count() > 31 {
            return Err(ConfigError::Validation(
                "workbook.sheet_name must be 1-31 characters".into(),
            ));
        }
        if self.workbook.image_width == 0 || self.workbook.image_height == 0 {
            return Err(ConfigError::Validation(
                "workbook image box must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Dark module color as RGB. Falls back to black for unvalidated configs.
    pub fn dark_rgb(&self) -> Rgb<u8> {
        parse_hex_color(&self.qr.dark).unwrap_or(Rgb([0, 0, 0]))
    }

    /// Light module/background color as RGB. Falls back to white.
    pub fn light_rgb(&self) -> Rgb<u8> {
        parse_hex_color(&self.qr.light).unwrap_or(Rgb([255, 255, 255]))
    }
}

/// Error correction level, serialized as a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EcLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

/// QR rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrConfig {
    /// Side length of the square QR image in pixels.
    pub size: u32,
    /// Quiet zone width in modules.
    pub margin: u32,
    pub ec_level: EcLevel,
    /// Dark module color (`#RRGGBB`).
    pub dark: String,
    /// Light module and background color (`#RRGGBB`).
    pub light: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            size: 256,
            margin: 2,
            ec_level: EcLevel::M,
            dark: "#000000".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

/// Label overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub enabled: bool,
    /// Text placed before the ID.
    pub prefix: String,
    /// Height of the band added under the QR square.
    pub band_height: u32,
    /// Upper bound for the integer glyph scale.
    pub max_scale: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "ID: ".to_string(),
            band_height: 64,
            max_scale: 5,
        }
    }
}

/// Input limits applied by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_id_length: usize,
    pub max_batch: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_id_length: 50,
            max_batch: 1000,
        }
    }
}

/// Excel workbook layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkbookConfig {
    pub sheet_name: String,
    /// Data row height in points.
    pub row_height: f64,
    /// Bounding box for embedded images, in pixels. Aspect ratio is kept.
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            sheet_name: "QR Codes".to_string(),
            row_height: 140.0,
            image_width: 100,
            image_height: 140,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel rendering workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Parse `#RRGGBB` (case-insensitive, leading `#` required).
pub fn parse_hex_color(value: &str) -> Option<Rgb<u8>> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ToolConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Lay a user `config.toml` over the stock values.
///
/// Sections merge key by key, so `[qr] size = 512` keeps the other `[qr]`
/// keys. Any non-table value from the user file wins outright.
pub fn merge_toml(stock: toml::Value, user: toml::Value) -> toml::Value {
    let (mut merged, user) = match (stock, user) {
        (toml::Value::Table(stock), toml::Value::Table(user)) => (stock, user),
        (_, user) => return user,
    };
    for (key, value) in user {
        let value = match merged.remove(&key) {
            Some(stock_value) => merge_toml(stock_value, value),
            None => value,
        };
        merged.insert(key, value);
    }
    toml::Value::Table(merged)
}

/// Read `<dir>/config.toml` without interpreting it, or `None` when the
/// directory has no config file and the stock values apply.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let content = match fs::read_to_string(dir.join(CONFIG_FILENAME)) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
}

/// Produce the final [`ToolConfig`]: stock values, the user's overrides if
/// any, then [`ToolConfig::validate`].
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_some() {
        log::info!("loaded {}", dir.join(CONFIG_FILENAME).display());
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# qr-label Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# QR rendering
# ---------------------------------------------------------------------------
[qr]
# Side length of the square QR image in pixels.
size = 256

# Quiet zone around the code, in modules.
margin = 2

# Error correction level: "L", "M", "Q" or "H".
ec_level = "M"

# Module colors as #RRGGBB.
dark = "#000000"
light = "#FFFFFF"

# ---------------------------------------------------------------------------
# ID label
# ---------------------------------------------------------------------------
[label]
# Draw "<prefix><id>" in a band under the code.
enabled = true
prefix = "ID: "

# Height in pixels of the band added under the QR square.
band_height = 64

# Largest integer glyph scale. Long IDs shrink until they fit.
max_scale = 5

# ---------------------------------------------------------------------------
# Input limits
# ---------------------------------------------------------------------------
[limits]
# Maximum characters for a single ID.
max_id_length = 50

# Maximum records per batch.
max_batch = 1000

# ---------------------------------------------------------------------------
# Excel export
# ---------------------------------------------------------------------------
[workbook]
sheet_name = "QR Codes"

# Data row height in points.
row_height = 140.0

# Bounding box for embedded images in pixels (aspect ratio is kept).
image_width = 100
image_height = 140

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel rendering workers. Omit to use all CPU cores.
# max_processes = 4
"##
}
