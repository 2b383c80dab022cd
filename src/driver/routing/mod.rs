//! 라우팅 모듈
//!
//! 클러스터 라우터에 토폴로지를 물어 라우팅 테이블을 얻습니다.
//!
//! # 개요
//!
//! 라우터 세션에서 `CALL dbms.cluster.routing.getServers`를 실행하고,
//! 응답의 서버 항목을 역할(READ / WRITE / ROUTE)별로 나눈 뒤
//! 상대 TTL을 절대 만료 시각으로 바꿉니다. 연결 풀, 재시도, 로드 밸런싱,
//! 테이블 캐시는 이 모듈을 호출하는 라우팅 테이블 관리자의 몫입니다.
//!
//! # 예시
//!
//! ```ignore
//! use zeta4g_routing::driver::routing::{ClusterDiscovery, RoutingContext};
//! use zeta4g_routing::driver::ServerAddress;
//!
//! let context = RoutingContext::from_uri("zeta4g://core1:7687?region=eu")?;
//! let discovery = ClusterDiscovery::new(context);
//!
//! // session은 TransactionRunner 구현체
//! let router = ServerAddress::parse("core1:7687")?;
//! let discovered = discovery.discover(&session, &router).await?;
//!
//! if discovered.table.has_writers() {
//!     // ...
//! }
//! ```

mod context;
mod discovery;
mod error;
mod table;

pub use context::{is_routing_uri, RoutingContext};
pub use discovery::{ClusterDiscovery, ServerEntry, CALL_GET_SERVERS};
pub use error::RoutingError;
pub use table::{DiscoveredRoutingTable, ExpiryTimestamp, RoutingTable, ServerRole};
