pub mod app;
pub mod cli;
pub mod code_block;
pub mod command;
pub mod config;
pub mod content;
pub mod error;
pub mod event;
pub mod executor;
pub mod main_lib;
pub mod markdown;
pub mod nav_tree;
pub mod presenter;
pub mod screenshot;
pub mod theme;
pub mod ui;
