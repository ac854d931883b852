pub mod catalog;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod scaling;
pub mod storage;
pub mod tui;
