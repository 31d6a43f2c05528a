pub mod automations;
pub mod health;
