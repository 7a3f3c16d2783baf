pub mod clips;
pub mod health;
