mod config;
mod dataset;
mod error;
mod synset;

pub use config::*;
pub use dataset::*;
pub use error::*;
pub use synset::*;
