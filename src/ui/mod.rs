pub mod panels;
pub mod zone;
