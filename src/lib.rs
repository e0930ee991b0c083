pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod storage;
pub mod tui;

pub use error::{MonthlineError, Result};
