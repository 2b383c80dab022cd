//! Transaction API
//!
//! 관리형 트랜잭션 안에서 쿼리 하나를 실행하는 세션 측 인터페이스.
//! 연결, 재시도, 타임아웃은 이 트레이트의 구현체가 책임집니다.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::error::DriverResult;
use super::record::RecordStream;
use super::routing::RoutingContext;
use super::types::Value;

// ============================================================================
// AccessMode - 접근 모드
// ============================================================================

/// 접근 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// 읽기
    Read,
    /// 쓰기
    #[default]
    Write,
}

// ============================================================================
// Query - 쿼리
// ============================================================================

/// 쿼리 (텍스트 + 파라미터)
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// 쿼리 텍스트
    pub text: String,
    /// 파라미터
    pub parameters: HashMap<String, Value>,
}

impl Query {
    /// 새 쿼리 생성
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: HashMap::new(),
        }
    }

    /// 파라미터 추가
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// TransactionConfig - 트랜잭션 설정
// ============================================================================

/// 트랜잭션 설정
#[derive(Debug, Clone, Default)]
pub struct TransactionConfig {
    /// 접근 모드
    pub access_mode: AccessMode,
    /// 타임아웃 (None이면 서버 기본값)
    pub timeout: Option<Duration>,
    /// 메타데이터
    pub metadata: HashMap<String, Value>,
    /// 라우팅 컨텍스트 (해석하지 않고 서버로 그대로 전달)
    pub routing_context: Option<RoutingContext>,
}

impl TransactionConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 접근 모드 설정
    pub fn with_access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// 타임아웃 설정
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 메타데이터 추가
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// 라우팅 컨텍스트 설정
    pub fn with_routing_context(mut self, context: RoutingContext) -> Self {
        self.routing_context = Some(context);
        self
    }
}

// ============================================================================
// TransactionRunner - 트랜잭션 실행기
// ============================================================================

/// 관리형 트랜잭션 실행기
///
/// 세션이 구현합니다. 쿼리 하나를 트랜잭션 안에서 실행하고 커밋한 뒤
/// 결과 레코드를 돌려줍니다. 서버 에러는 코드가 보존된
/// [`DriverError::Query`](super::DriverError::Query) 또는
/// [`DriverError::Server`](super::DriverError::Server)로 반환해야 합니다.
#[async_trait]
pub trait TransactionRunner: Send + Sync {
    /// 트랜잭션 안에서 쿼리 실행
    async fn run_in_transaction(
        &self,
        query: Query,
        config: TransactionConfig,
    ) -> DriverResult<RecordStream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = Query::new("RETURN $x").with_param("x", 1);
        assert_eq!(query.text, "RETURN $x");
        assert_eq!(query.parameters.get("x"), Some(&Value::Integer(1)));

        let query: Query = "CALL db.labels".into();
        assert!(query.parameters.is_empty());
    }

    #[test]
    fn test_transaction_config_builder() {
        let config = TransactionConfig::new()
            .with_access_mode(AccessMode::Read)
            .with_timeout(Duration::from_secs(60))
            .with_metadata("app", "test")
            .with_routing_context(RoutingContext::new().with("region", "eu").unwrap());

        assert_eq!(config.access_mode, AccessMode::Read);
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert!(config.metadata.contains_key("app"));
        assert_eq!(
            config.routing_context.as_ref().and_then(|c| c.get("region")),
            Some("eu")
        );
    }

    #[test]
    fn test_transaction_config_default() {
        let config = TransactionConfig::default();
        assert_eq!(config.access_mode, AccessMode::Write);
        assert!(config.timeout.is_none());
        assert!(config.routing_context.is_none());
    }
}
