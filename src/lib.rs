//! Resume copilot core library
//!
//! Match scoring between a resume and a job description (embedding cosine
//! similarity with weighted section breakdown) plus the signal merge engine
//! that folds structured interview signals into a running [`session::ResumeContext`].

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod scoring;
pub mod session;

pub use config::Config;
pub use error::{Result, ResumeCopilotError};
