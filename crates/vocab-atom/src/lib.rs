#![doc = include_str!("../README.md")]

mod config;
mod error;
mod event;
mod interval;
mod orchestrator;
mod random;
mod sampler;
mod storage;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::event::*;
pub use crate::interval::*;
pub use crate::orchestrator::*;
pub use crate::random::*;
pub use crate::sampler::*;
pub use crate::storage::*;
