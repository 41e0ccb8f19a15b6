pub mod food_recognition;
pub mod health;
pub mod server;
