pub mod action;
pub mod app;
pub mod components;
pub mod controller;
pub mod event;
pub mod feedback;
pub mod theme;

pub use app::{App, ExitReason};
