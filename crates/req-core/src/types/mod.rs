mod enterprise;
mod options;
mod search;

pub use enterprise::*;
pub use options::*;
pub use search::*;
