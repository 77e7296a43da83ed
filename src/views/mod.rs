pub mod health;
pub mod helpers;
pub mod hub;
pub mod layout;
pub mod settings;
