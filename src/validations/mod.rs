pub mod name;
pub mod phone;
