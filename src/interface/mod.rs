mod cloner;
mod provider;
mod sleeper;
mod transport;

pub use cloner::*;
pub use provider::*;
pub use sleeper::*;
pub use transport::*;
