pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod movement;
pub mod spawn;
pub mod store;
