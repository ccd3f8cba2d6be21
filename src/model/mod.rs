mod bootstrap;
mod common;
mod entry;
mod gameweek;
mod summary;

pub use bootstrap::*;
pub use common::*;
pub use entry::*;
pub use gameweek::*;
pub use summary::*;
