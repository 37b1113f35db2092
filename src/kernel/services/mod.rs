//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used by the kernel.
//! - `adapters`: filesystem specific implementations (settings, paths).

pub mod adapters;
pub mod ports;
