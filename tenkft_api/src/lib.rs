//! Client for the 10,000ft resource-management API.
//!
//! ```no_run
//! # async fn run() -> Result<(), tenkft_api::Error> {
//! use tenkft_api::{Client, Environment, ListOptions};
//!
//! let client = Client::new("my-token", Environment::Staging)?.with_max_retries(3);
//! let projects = client.get_all_projects(&ListOptions::new().with_fields("tags")).await?;
//! for project in &projects {
//!     println!("{}", project.name.as_deref().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod errors;
pub mod fetch;
pub mod paginate;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::config::{Environment, RetryPolicy};
pub use self::errors::{Error, PaginationError};
pub use self::fetch::{Fetcher, RequestSpec, ResponseOutcome};
pub use self::query::ListOptions;
