mod lake;
mod link;
mod report;
mod tournament;

pub use lake::*;
pub use link::*;
pub use report::*;
pub use tournament::*;
