pub mod catalog;
pub mod generate;
pub mod show;
pub mod store;
