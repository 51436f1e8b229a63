pub mod catalog;
pub mod health;
pub mod predict;
pub mod rank;
