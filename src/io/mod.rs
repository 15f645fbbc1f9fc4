//! JSON interface: input parsing/validation and output formatting.

mod input;
mod output;

pub use input::{Defaults, Input, InputError, StopInput, VehicleDefaults, VehicleInput};
pub use output::{
    format_output, LegOut, OptionsOut, Output, ResultStats, RunStats, SolutionOut, Statistics,
    StopOut, VehicleOut, Version,
};
