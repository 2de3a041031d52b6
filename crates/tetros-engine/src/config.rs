//! Immutable engine configuration.
//!
//! [`EngineConfig`] replaces the global constants a game like this usually
//! carries around. It is fixed at [`Session`](crate::Session) construction and
//! can be loaded from JSON; every field has a default, so a partial document
//! only overrides what it names.
//!
//! ```
//! use tetros_engine::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "width": 10 }"#).unwrap();
//! assert_eq!(config.width, 10);
//! assert_eq!(config.height, 22);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Shape;

/// Smallest board side that still fits a 4×4 piece box.
pub const MIN_BOARD_SIDE: u16 = 4;

/// An RGB color attached to a shape.
///
/// The engine never draws anything; colors are carried through to the
/// snapshot so the renderer does not need its own shape-to-color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color of each shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub i: Color,
    pub o: Color,
    pub t: Color,
    pub s: Color,
    pub z: Color,
    pub j: Color,
    pub l: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            i: Color::rgb(0, 255, 255),
            o: Color::rgb(255, 255, 0),
            t: Color::rgb(128, 0, 128),
            s: Color::rgb(0, 128, 0),
            z: Color::rgb(255, 0, 0),
            j: Color::rgb(0, 0, 255),
            l: Color::rgb(255, 165, 0),
        }
    }
}

impl Palette {
    #[must_use]
    pub fn color(&self, shape: Shape) -> Color {
        match shape {
            Shape::I => self.i,
            Shape::O => self.o,
            Shape::T => self.t,
            Shape::S => self.s,
            Shape::Z => self.z,
            Shape::J => self.j,
            Shape::L => self.l,
        }
    }
}

/// Tick-coupled gravity parameters.
///
/// Each tick a falling piece accumulates `level / divisor`. Once the
/// accumulator exceeds the active threshold the piece moves down one row and
/// the accumulator restarts from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Gravity {
    /// Threshold under normal gravity.
    pub drop_threshold: f64,
    /// Threshold while soft drop is held or after a hard drop.
    pub fast_drop_threshold: f64,
    pub divisor: f64,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            drop_threshold: 5.0,
            fast_drop_threshold: 0.5,
            divisor: 2.0,
        }
    }
}

/// Configuration of a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Board width in cells.
    pub width: u16,
    /// Board height in cells.
    pub height: u16,
    pub gravity: Gravity,
    /// Rows to clear before the level goes up.
    pub lines_per_level: u32,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 22,
            gravity: Gravity::default(),
            lines_per_level: 10,
            palette: Palette::default(),
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width must be at least 4, got {width}")]
    BoardTooNarrow { width: u16 },
    #[display("board height must be at least 4, got {height}")]
    BoardTooShort { height: u16 },
    #[display("gravity {name} must be a positive number, got {value}")]
    InvalidGravity { name: &'static str, value: f64 },
    #[display("lines per level must be at least 1")]
    ZeroLinesPerLevel,
}

impl EngineConfig {
    /// Checks that the values describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooNarrow { width: self.width });
        }
        if self.height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooShort {
                height: self.height,
            });
        }
        let gravity = [
            ("drop_threshold", self.gravity.drop_threshold),
            ("fast_drop_threshold", self.gravity.fast_drop_threshold),
            ("divisor", self.gravity.divisor),
        ];
        for (name, value) in gravity {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidGravity { name, value });
            }
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }
}
