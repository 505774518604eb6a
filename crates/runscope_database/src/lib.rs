//! Hosted backend access for runscope.
//!
//! This crate talks to the PostgREST endpoint of the hosted backend that stores
//! search runs, their step logs, chat messages and user profiles.
//!
//! # Features
//!
//! - Layered configuration (bundled defaults, user files, environment)
//! - An explicitly constructed REST client with a static service credential
//! - A small filter/order/limit query builder
//! - [`MonitorRepository`], the data access layer used by the views and the CLI
//!
//! # Example
//!
//! ```rust,no_run
//! use runscope_core::RunFilter;
//! use runscope_database::{BackendConfig, MonitorRepository, SupabaseClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BackendConfig::load(None)?;
//! let repository = MonitorRepository::new(SupabaseClient::new(&config), &config);
//!
//! let runs = repository.list_runs(RunFilter::default(), config.run_limit).await?;
//! println!("{} runs", runs.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod query;
mod repository;

pub use client::SupabaseClient;
pub use config::{BackendConfig, TableNames};
pub use query::{Direction, TableQuery};
pub use repository::MonitorRepository;

use runscope_error::BackendError;

/// Result type for backend operations.
pub type DatabaseResult<T> = Result<T, BackendError>;
