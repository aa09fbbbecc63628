pub mod common;
pub mod config;
pub mod nav;
pub mod notes;
pub mod set;
pub mod timer;
