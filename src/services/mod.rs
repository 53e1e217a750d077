pub mod service_control;
pub mod status_parser;

pub use service_control::ServiceController;
