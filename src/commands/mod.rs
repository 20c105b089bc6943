pub mod generate;
pub mod inventory;
pub mod validate;
