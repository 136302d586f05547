pub mod vehicle_handler;

pub use vehicle_handler::*;
