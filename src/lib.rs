//! wattrack: token, energy & CO2 estimation for generative-AI usage
//!
//! The engine converts per-day usage counts into compute time, energy and
//! carbon figures under declared hardware and grid parameters. Every
//! computation is a pure function of (parameters, counts); the CLI around
//! it is a thin shell.

pub mod cli;
pub mod config;
pub mod parsers;
pub mod services;
pub mod types;
