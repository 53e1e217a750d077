pub mod resource;
pub mod status;

pub use resource::*;
pub use status::*;
