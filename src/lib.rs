//! riverine: build binary tributary trees from CSV river-network data and
//! explore them interactively.

pub mod cli;
pub mod domain;
pub mod util;
