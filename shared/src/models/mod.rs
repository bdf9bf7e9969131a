//! Domain models for the CropAI advisory platform

mod crop;
mod flow;
mod location;
mod market;
mod prediction;
mod profile;
mod soil;
mod weather;

pub use crop::*;
pub use flow::*;
pub use location::*;
pub use market::*;
pub use prediction::*;
pub use profile::*;
pub use soil::*;
pub use weather::*;
