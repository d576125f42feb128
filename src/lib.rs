pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod storage;
