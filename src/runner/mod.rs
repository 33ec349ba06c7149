//! Runner module
//!
//! This module contains the steps that produce artifacts: discovering input
//! statements, invoking the converter and relocating its outputs.

mod converter;
mod discovery;
mod relocate;

pub use converter::{Converter, ConverterOutcome};
pub use discovery::{collect_inputs, ensure_output_dir};
pub use relocate::{find_done_files, move_if_exists, relocate_done_files};
