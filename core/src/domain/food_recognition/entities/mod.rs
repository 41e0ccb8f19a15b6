pub mod analysis_result;
pub mod detection;
pub mod recommendation;

pub use analysis_result::*;
pub use detection::*;
pub use recommendation::*;
