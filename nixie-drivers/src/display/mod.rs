//! Display drivers

mod nixie;

pub use nixie::NixieDisplay;
