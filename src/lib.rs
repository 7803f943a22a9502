pub mod ai;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod hazards;
pub mod levelgen;
pub mod particles;
pub mod physics;
pub mod player;
