pub mod auth_service;
pub mod google;
pub mod session;
