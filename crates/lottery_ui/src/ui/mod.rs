//! UI modules for the lottery window.

pub mod app_shell;
pub mod controls;
pub mod rendering;
