pub mod admin;
pub mod advisor;
pub mod catalog;
pub mod contact;
pub mod home;
