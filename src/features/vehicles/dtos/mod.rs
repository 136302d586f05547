pub mod vehicle_dto;

pub use vehicle_dto::{UploadedImage, VehicleFields, VehicleForm};
