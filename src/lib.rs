//! # Jobly - companies and jobs REST service
//!
//! CRUD and filtered search over companies and the jobs they post, backed by
//! parameterized PostgreSQL statements, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: entities, the `Equity` value object, authorization context
//! - **Application**: use cases, repository ports, DTOs and error taxonomy
//! - **Infrastructure**: PostgreSQL repositories and the SQL clause builders
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use jobly::{api::create_router, ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_database()
//!     .await?
//!     .with_infrastructure()?
//!     .build()?;
//! let app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, errors, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
