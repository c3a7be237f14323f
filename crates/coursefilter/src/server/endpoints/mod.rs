pub mod courses;
pub mod export;
pub mod status;
