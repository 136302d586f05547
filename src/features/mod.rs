pub mod pages;
pub mod vehicles;
