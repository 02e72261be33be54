pub mod features;
pub mod scores;

pub use features::*;
pub use scores::*;
