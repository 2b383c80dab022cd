//! 라우팅 컨텍스트
//!
//! 라우팅 URI의 쿼리 문자열로 지정되는 키-값 설정입니다.
//! 이 크레이트는 내용을 해석하지 않고 라우팅 프로시저로 그대로 전달합니다.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::super::error::{DriverError, DriverResult};
use super::super::types::Value;

/// 라우팅 URI 스킴
const ROUTING_SCHEMES: [&str; 3] = ["zeta4g://", "zeta4g+s://", "zeta4g+ssc://"];

/// 드라이버가 예약한 키
const RESERVED_KEY: &str = "address";

/// URI가 라우팅 드라이버용인지 확인
pub fn is_routing_uri(uri: &str) -> bool {
    ROUTING_SCHEMES.iter().any(|scheme| uri.starts_with(scheme))
}

/// 라우팅 컨텍스트
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingContext {
    entries: BTreeMap<String, String>,
}

impl RoutingContext {
    /// 빈 컨텍스트 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 키-값 추가
    ///
    /// 예약된 키 `address`는 거부됩니다.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> DriverResult<Self> {
        let key = key.into();
        if key == RESERVED_KEY {
            return Err(reserved_key_error());
        }
        self.entries.insert(key, value.into());
        Ok(self)
    }

    /// 맵에서 생성
    pub fn from_map(map: HashMap<String, String>) -> DriverResult<Self> {
        if map.contains_key(RESERVED_KEY) {
            return Err(reserved_key_error());
        }
        Ok(Self {
            entries: map.into_iter().collect(),
        })
    }

    /// 라우팅 URI의 쿼리 문자열에서 생성
    ///
    /// `zeta4g://host:7687?region=eu&policy=fast` → `{policy: fast, region: eu}`
    pub fn from_uri(uri: &str) -> DriverResult<Self> {
        if !is_routing_uri(uri) {
            return Err(DriverError::configuration(format!(
                "Routing context requires a routing URI, got: {}",
                uri
            )));
        }

        let without_fragment = uri.split('#').next().unwrap_or_default();
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None => return Ok(Self::new()),
        };

        let mut entries = BTreeMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                DriverError::configuration(format!("Invalid routing context parameter: {}", pair))
            })?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(DriverError::configuration(format!(
                    "Invalid routing context parameter: {}",
                    pair
                )));
            }
            if key == RESERVED_KEY {
                return Err(reserved_key_error());
            }
            if entries.insert(key.to_string(), value.to_string()).is_some() {
                return Err(DriverError::configuration(format!(
                    "Duplicated routing context key: {}",
                    key
                )));
            }
        }

        Ok(Self { entries })
    }

    /// 값 조회
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 항목 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 빈 컨텍스트 여부
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 키 순서로 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 드라이버 값(Map)으로 변환
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

fn reserved_key_error() -> DriverError {
    DriverError::configuration(format!(
        "The key '{}' is reserved for routing context",
        RESERVED_KEY
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_routing_uri() {
        assert!(is_routing_uri("zeta4g://localhost:7687"));
        assert!(is_routing_uri("zeta4g+s://localhost:7687"));
        assert!(is_routing_uri("zeta4g+ssc://localhost:7687"));
        assert!(!is_routing_uri("bolt://localhost:7687"));
        assert!(!is_routing_uri("bolt+s://localhost:7687"));
    }

    #[test]
    fn test_from_uri() {
        let ctx = RoutingContext::from_uri("zeta4g://core1:7687?region=eu&policy=fast").unwrap();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("region"), Some("eu"));
        assert_eq!(ctx.get("policy"), Some("fast"));

        let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["policy", "region"]);
    }

    #[test]
    fn test_from_uri_without_query() {
        let ctx = RoutingContext::from_uri("zeta4g://core1:7687").unwrap();
        assert!(ctx.is_empty());

        let ctx = RoutingContext::from_uri("zeta4g://core1:7687?").unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_from_uri_ignores_fragment() {
        let ctx = RoutingContext::from_uri("zeta4g://core1?region=eu#top").unwrap();
        assert_eq!(ctx.get("region"), Some("eu"));
    }

    #[test]
    fn test_from_uri_rejects_direct_scheme() {
        let err = RoutingContext::from_uri("bolt://core1:7687?region=eu").unwrap_err();
        assert!(matches!(err, DriverError::Configuration(_)));
    }

    #[test]
    fn test_from_uri_invalid_pairs() {
        assert!(RoutingContext::from_uri("zeta4g://h?region").is_err());
        assert!(RoutingContext::from_uri("zeta4g://h?=eu").is_err());
        assert!(RoutingContext::from_uri("zeta4g://h?region=").is_err());
    }

    #[test]
    fn test_from_uri_duplicate_key() {
        let err = RoutingContext::from_uri("zeta4g://h?region=eu&region=us").unwrap_err();
        assert!(err.to_string().contains("Duplicated routing context key: region"));
    }

    #[test]
    fn test_reserved_key() {
        assert!(RoutingContext::from_uri("zeta4g://h?address=x:1").is_err());

        let mut map = HashMap::new();
        map.insert("address".to_string(), "x:1".to_string());
        assert!(RoutingContext::from_map(map).is_err());

        let err = RoutingContext::new().with("address", "x:1").unwrap_err();
        assert!(matches!(err, DriverError::Configuration(_)));
    }

    #[test]
    fn test_with() {
        let ctx = RoutingContext::new()
            .with("region", "eu")
            .and_then(|ctx| ctx.with("policy", "fast"))
            .unwrap();

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("region"), Some("eu"));
        assert_eq!(ctx.get("policy"), Some("fast"));
    }

    #[test]
    fn test_from_map_and_to_value() {
        let mut map = HashMap::new();
        map.insert("region".to_string(), "eu".to_string());
        let ctx = RoutingContext::from_map(map).unwrap();

        let value = ctx.to_value();
        assert_eq!(
            value.as_map().and_then(|m| m.get("region")),
            Some(&Value::String("eu".into()))
        );
    }
}
