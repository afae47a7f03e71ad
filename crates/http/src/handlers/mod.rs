pub mod admin;
pub mod cities;
