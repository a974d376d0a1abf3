// src/lib.rs

pub mod api;
pub mod app;
pub mod chat;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod controller;
pub mod decoder;
pub mod errors;
pub mod input;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod status_indicator;
pub mod turn;
pub mod ui;
