// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defaults shared by the diagnostics and the application layer

pub const DEFAULT_POINTS_PER_CELL: usize = 4; // Diagnostic sample points in each spatial cell
pub const POTENTIAL_FILE: &str = "potential.dat"; // Sampled potential stream
pub const FIELD_FILE: &str = "field.dat"; // Sampled field stream
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";
