//! Driver Module
//!
//! 클러스터 탐색에 필요한 드라이버 타입
//!
//! - [`routing`] - 라우팅 프로시저 호출과 응답 해석 (ClusterDiscovery, RoutingTable)
//! - 세션 측 인터페이스 (TransactionRunner, Query, TransactionConfig)
//! - 값과 레코드 (Value, Record, RecordStream)
//! - 에러 (DriverError, DriverResult)

pub mod routing;
mod address;
mod error;
mod record;
mod transaction;
mod types;

// Re-exports
pub use address::{ServerAddress, DEFAULT_PORT};
pub use error::{codes, DriverError, DriverResult};
pub use record::{Record, RecordStream};
pub use transaction::{AccessMode, Query, TransactionConfig, TransactionRunner};
pub use types::Value;
