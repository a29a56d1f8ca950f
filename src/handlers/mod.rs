pub mod applications;
pub mod auth;
pub mod internships;
pub mod pages;
pub mod profile;
pub mod reports;
