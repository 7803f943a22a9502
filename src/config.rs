/// Command-line configuration and its validation.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::constants::MAX_START_LEVEL;
use crate::physics::CollisionMode;

pub const MIN_TERMINAL: (u16, u16) = (40, 16);
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fps must be between 1 and 240, got {0}")]
    Fps(u32),

    #[error("start level must be between 1 and 99, got {0}")]
    StartLevel(u32),

    #[error("terminal is {width}x{height}, need at least 40x16")]
    TerminalTooSmall { width: u16, height: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CollisionFlag {
    /// Resolve horizontal motion, then vertical.
    Axis,
    /// Resolve a single combined move vertically.
    Combined,
}

impl From<CollisionFlag> for CollisionMode {
    fn from(flag: CollisionFlag) -> Self {
        match flag {
            CollisionFlag::Axis => CollisionMode::Axis,
            CollisionFlag::Combined => CollisionMode::Combined,
        }
    }
}

/// Terminal platformer: stomp the bugs, grab every item, mind the traps.
#[derive(Clone, Debug, Parser)]
#[command(name = "platformer", version, about)]
pub struct Config {
    /// Simulation ticks per second.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for level generation; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Level to begin (and restart) from, 1 to 99.
    #[arg(long, default_value_t = 1)]
    pub start_level: u32,

    /// Platform collision resolution strategy.
    #[arg(long, value_enum, default_value_t = CollisionFlag::Axis)]
    pub collision: CollisionFlag,
}

impl Default for Config {
    fn default() -> Self {
        Self { fps: 60, seed: None, start_level: 1, collision: CollisionFlag::Axis }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::Fps(self.fps));
        }
        if self.start_level == 0 || self.start_level > MAX_START_LEVEL {
            return Err(ConfigError::StartLevel(self.start_level));
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn collision_mode(&self) -> CollisionMode {
        self.collision.into()
    }
}

pub fn check_terminal(width: u16, height: u16) -> Result<(), ConfigError> {
    if width < MIN_TERMINAL.0 || height < MIN_TERMINAL.1 {
        return Err(ConfigError::TerminalTooSmall { width, height });
    }
    Ok(())
}
