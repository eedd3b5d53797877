pub use pgcast_core::*;
