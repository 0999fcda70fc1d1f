//! Typed client for the DBSP pipeline manager REST API.
//!
//! For every control-plane resource (program, pipeline, connector) and
//! action (status, list, create-or-replace, delete, compile, start,
//! shutdown, UDF upload) the client offers the same operation in four
//! shapes: asynchronous or blocking, and "parsed payload only" or
//! "detailed" (full [`ResponseValue`] envelope with status, headers and raw
//! body). All four share one pure request builder and one pure response
//! parser per operation; the only difference is how the single network
//! round trip is performed.
//!
//! ```no_run
//! use dbsp_api_client::Client;
//!
//! # async fn example() -> Result<(), dbsp_api_client::Error> {
//! let client = Client::new("http://localhost:8080");
//! let program = client.program_status(None, Some("tpc-h-program")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Responses with a status the endpoint documents decode into the
//! documented model; documented error statuses surface as
//! [`Error::ErrorResponse`]; anything else is governed by the per-client
//! [`UnexpectedStatusPolicy`]. Transport failures are never conflated with
//! either.

mod api;
pub mod blocking;
mod client;
mod error;
mod request;
mod response;
pub mod types;
mod unset;

pub use client::Client;
pub use error::{Error, ResponseValue, UnexpectedStatusPolicy};
pub use unset::MaybeUnset;
