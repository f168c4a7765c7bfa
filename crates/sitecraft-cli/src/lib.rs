//! Sitecraft CLI library: logging setup, settings and the runtime wiring the
//! `sitecraft` binary drives.

pub mod logging;
pub mod settings;
pub mod studio;
