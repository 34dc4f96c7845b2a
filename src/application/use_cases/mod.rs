pub mod bootstrap;
pub mod catalog;
pub mod token;
pub mod user;
