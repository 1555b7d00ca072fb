//! Rust client for the [ReliefWeb](https://reliefweb.int) API.
//!
//! Build structured queries (filters, sort, pagination, facets, field
//! selection) against resource collections such as `reports`, `jobs` or
//! `countries`, execute them over HTTP, and read the response through a
//! defensive typed accessor layer that never panics on partial or missing
//! data.
//!
//! # Quick start
//!
//! ```no_run
//! use reliefweb::{Client, Filter};
//!
//! #[tokio::main]
//! async fn main() -> reliefweb::Result<()> {
//!     let client = Client::builder().appname("my-site.example").build()?;
//!
//!     let results = client
//!         .reports()
//!         .search("earthquake")
//!         .fields(&["title", "date"], &[])
//!         .filter(&Filter::value("primary_country.iso3", "npl"))
//!         .sort("date.created", "desc")
//!         .limit(10)
//!         .execute()
//!         .await;
//!
//!     println!("{} of {} reports", results.count(), results.total());
//!     for item in results.items() {
//!         println!("{}", item["fields"]["title"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Failed calls never raise: the returned [`Results`] reads as an error
//! with zeroed and emptied accessors. Check [`Results::error`] when the
//! distinction matters.

pub mod client;
pub mod error;
pub mod facet;
pub mod filter;
pub mod query;
pub mod results;
pub mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use facet::Facet;
pub use filter::Filter;
pub use query::Query;
pub use results::{FacetResult, Results};
pub use transport::{Method, Transport};
