//! # Zeta4G Routing
//!
//! Cluster topology discovery for the [Zeta4G](https://github.com/zeta9044/zeta4g)
//! graph database driver.
//!
//! ## Features
//!
//! - **Routing procedure** - Calls `dbms.cluster.routing.getServers` on a router
//! - **Typed routing table** - Reader / writer / router addresses in reply order
//! - **Expiry** - Converts the server TTL into an absolute deadline
//! - **Normalized failures** - Non-cluster servers and malformed replies become connection errors
//!
//! ## Basic Usage
//!
//! Any session that can run one query inside a managed transaction implements
//! [`TransactionRunner`]:
//!
//! ```rust,no_run
//! use zeta4g_routing::{
//!     ClusterDiscovery, DriverResult, Query, RecordStream, RoutingContext,
//!     ServerAddress, TransactionConfig, TransactionRunner,
//! };
//!
//! struct MySession;
//!
//! #[async_trait::async_trait]
//! impl TransactionRunner for MySession {
//!     async fn run_in_transaction(
//!         &self,
//!         query: Query,
//!         config: TransactionConfig,
//!     ) -> DriverResult<RecordStream> {
//!         // BEGIN, RUN, PULL, COMMIT over Bolt
//!         # let _ = (query, config);
//!         Ok(RecordStream::empty())
//!     }
//! }
//!
//! # async fn example() -> DriverResult<()> {
//! let discovery = ClusterDiscovery::new(RoutingContext::from_uri("zeta4g://core1:7687?region=eu")?);
//! let router = ServerAddress::parse("core1:7687")?;
//!
//! let discovered = discovery.discover(&MySession, &router).await?;
//! println!("writers: {:?}", discovered.table.writers);
//! println!("expires at: {}", discovered.expires_at);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Discovery failures are [`DriverError::Routing`] and report
//! [`DriverError::is_connection_failure`]. Callers should try another router:
//!
//! ```rust
//! use zeta4g_routing::{DriverError, RoutingError, ServerAddress};
//!
//! let err: DriverError = RoutingError::NotClusterMember {
//!     router: ServerAddress::new("10.0.0.1", 7687),
//! }
//! .into();
//!
//! assert!(err.is_connection_failure());
//! ```
//!
//! ## Modules
//!
//! - [`driver`] - Values, records, errors, the session seam, and [`driver::routing`]

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod driver;

// Re-exports for convenience
pub use driver::{
    AccessMode, DriverError, DriverResult, Query, Record, RecordStream, ServerAddress,
    TransactionConfig, TransactionRunner, Value,
};

pub use driver::routing::{
    ClusterDiscovery, DiscoveredRoutingTable, ExpiryTimestamp, RoutingContext, RoutingError,
    RoutingTable, ServerRole,
};
