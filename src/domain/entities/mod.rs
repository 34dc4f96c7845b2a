pub mod domain;
pub mod service;
pub mod service_type;
pub mod token;
pub mod user;
