//! # Ambari API Client
//!
//! The request capability the poller depends on. The poller never builds HTTP
//! requests itself; it hands a fully-formed URL and credentials to an
//! [`AmbariApi`] implementation and receives the decoded JSON document.
//!
//! - [`HttpAmbariClient`] issues real `GET` requests with basic auth
//! - tests substitute a recording mock
//!
//! ```rust,no_run
//! use ambari_check::client::{AmbariApi, Credentials, HttpAmbariClient};
//!
//! # async fn example() -> ambari_check::AmbariResult<()> {
//! let client = HttpAmbariClient::new(10_000)?;
//! let auth = Credentials::new("admin", "admin");
//! let clusters = client
//!     .request("http://ambari:8080/api/v1/clusters", &auth)
//!     .await?;
//! println!("{clusters}");
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod traits;

pub use http::HttpAmbariClient;
pub use traits::{AmbariApi, Credentials};
