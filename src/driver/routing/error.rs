//! 라우팅 에러
//!
//! 라우터를 탐색에 쓸 수 없는 경우. 모두 연결 실패로 취급됩니다.

use thiserror::Error;

use super::super::address::ServerAddress;
use super::super::error::DriverError;
use super::super::record::Record;

/// 라우팅 탐색 에러
#[derive(Error, Debug)]
pub enum RoutingError {
    /// 라우팅 프로시저가 없는 서버 (클러스터 멤버가 아님)
    #[error(
        "Server at {router} cannot perform routing. Make sure you are connecting to a causal cluster."
    )]
    NotClusterMember {
        /// 라우터 주소
        router: ServerAddress,
    },

    /// 서버 목록 해석 실패
    #[error("Unable to parse servers entry from router {router} with record {record} ({source})")]
    UnparseableServers {
        /// 라우터 주소
        router: ServerAddress,
        /// 원본 레코드
        record: Record,
        /// 원인
        #[source]
        source: Box<DriverError>,
    },

    /// TTL 해석 실패
    #[error("Unable to parse TTL entry from router {router} with record {record} ({source})")]
    UnparseableTtl {
        /// 라우터 주소
        router: ServerAddress,
        /// 원본 레코드
        record: Record,
        /// 원인
        #[source]
        source: Box<DriverError>,
    },

    /// 프로시저가 레코드를 정확히 하나 반환하지 않음
    #[error("Routing procedure on {router} returned {count} records, expected exactly one")]
    UnexpectedRecordCount {
        /// 라우터 주소
        router: ServerAddress,
        /// 받은 레코드 수
        count: usize,
    },
}

impl RoutingError {
    /// 에러가 발생한 라우터 주소
    pub fn router(&self) -> &ServerAddress {
        match self {
            Self::NotClusterMember { router }
            | Self::UnparseableServers { router, .. }
            | Self::UnparseableTtl { router, .. }
            | Self::UnexpectedRecordCount { router, .. } => router,
        }
    }
}
