pub mod app;
pub mod commands;
mod screens;
