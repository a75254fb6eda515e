pub mod auth;
pub mod browse;
pub mod cart;
pub mod checkout;
