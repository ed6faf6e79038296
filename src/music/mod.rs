//! Signal-to-parameter mapping.
//!
//! Turns the outputs of mood analysis into a bounded, deterministic bundle
//! of musical parameters. Nothing in here performs I/O or calls a model.

mod mapper;

pub use mapper::{
    base_tempo, instruments_for, key_for, map_parameters, Key, MusicalParameters,
    DEFAULT_INSTRUMENTS, DEFAULT_KEY, DEFAULT_TEMPO, MAX_TEMPO, MIN_TEMPO,
};
