//! 클러스터 탐색
//!
//! 라우터에서 `dbms.cluster.routing.getServers` 프로시저를 호출하고
//! 응답 레코드를 역할별 라우팅 테이블과 만료 시각으로 변환합니다.
//!
//! 상태를 보관하지 않으므로 여러 세션에서 동시에 호출해도 됩니다.
//! 재시도와 다른 라우터로의 전환은 호출자가 담당합니다.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, trace, warn};

use super::super::address::ServerAddress;
use super::super::error::{codes, DriverError, DriverResult};
use super::super::record::Record;
use super::super::transaction::{AccessMode, Query, TransactionConfig, TransactionRunner};
use super::super::types::Value;
use super::context::RoutingContext;
use super::error::RoutingError;
use super::table::{DiscoveredRoutingTable, ExpiryTimestamp, RoutingTable, ServerRole};

/// 라우팅 프로시저 호출문 (서버와의 호환을 위해 그대로 전송)
pub const CALL_GET_SERVERS: &str = "CALL dbms.cluster.routing.getServers";

const SERVERS_FIELD: &str = "servers";
const LEGACY_SERVERS_FIELD: &str = "server";
const TTL_FIELD: &str = "ttl";
const ROLE_FIELD: &str = "role";
const ADDRESSES_FIELD: &str = "addresses";

// ============================================================================
// ServerEntry - 응답의 서버 항목
// ============================================================================

/// 라우팅 응답의 서버 항목
///
/// 역할 태그를 먼저 해석합니다. 알 수 없는 역할의 항목은 주소를 읽지 않고
/// 버려지므로, 그 주소가 어떤 형태이든 응답 전체가 실패하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    /// 역할
    pub role: ServerRole,
    /// 해당 역할을 광고하는 주소들
    pub addresses: Vec<ServerAddress>,
}

impl ServerEntry {
    /// 항목 하나 해석
    ///
    /// 역할 태그가 `READ`, `WRITE`, `ROUTE` 중 하나가 아니면 `Ok(None)`.
    pub fn decode(value: Value) -> DriverResult<Option<Self>> {
        let mut map = HashMap::<String, Value>::try_from(value)?;

        let tag = String::try_from(take_field(&mut map, ROLE_FIELD)?)?;
        let Some(role) = ServerRole::from_wire_tag(&tag) else {
            trace!(role = %tag, "Dropping server entry with unknown role");
            return Ok(None);
        };

        let addresses = Vec::<Value>::try_from(take_field(&mut map, ADDRESSES_FIELD)?)?
            .into_iter()
            .map(|address| String::try_from(address).and_then(|s| ServerAddress::parse(&s)))
            .collect::<DriverResult<Vec<_>>>()?;

        Ok(Some(Self { role, addresses }))
    }
}

fn take_field(map: &mut HashMap<String, Value>, field: &str) -> DriverResult<Value> {
    map.remove(field).ok_or_else(|| {
        DriverError::type_conversion(format!("Server entry has no '{}' field", field))
    })
}

// ============================================================================
// ClusterDiscovery - 클러스터 탐색기
// ============================================================================

/// 클러스터 탐색기
#[derive(Debug, Clone, Default)]
pub struct ClusterDiscovery {
    routing_context: RoutingContext,
}

impl ClusterDiscovery {
    /// 새 탐색기 생성
    pub fn new(routing_context: RoutingContext) -> Self {
        Self { routing_context }
    }

    /// 라우팅 컨텍스트
    pub fn routing_context(&self) -> &RoutingContext {
        &self.routing_context
    }

    /// 라우팅 프로시저 호출
    ///
    /// 프로시저가 없는 서버는 [`RoutingError::NotClusterMember`]로 바뀌고,
    /// 그 밖의 에러는 그대로 전달됩니다.
    pub async fn call_routing_procedure<R>(
        &self,
        runner: &R,
        router: &ServerAddress,
    ) -> DriverResult<Record>
    where
        R: TransactionRunner + ?Sized,
    {
        debug!(%router, "Calling routing procedure");

        let config = TransactionConfig::new()
            .with_access_mode(AccessMode::Read)
            .with_routing_context(self.routing_context.clone());

        let stream = match runner.run_in_transaction(Query::new(CALL_GET_SERVERS), config).await {
            Ok(stream) => stream,
            Err(err) if err.code() == Some(codes::PROCEDURE_NOT_FOUND) => {
                warn!(%router, "Router does not expose the routing procedure");
                return Err(RoutingError::NotClusterMember {
                    router: router.clone(),
                }
                .into());
            }
            Err(err) => return Err(err),
        };

        let count = stream.remaining();
        stream.single().map_err(|_| {
            DriverError::from(RoutingError::UnexpectedRecordCount {
                router: router.clone(),
                count,
            })
        })
    }

    /// 서버 목록을 역할별 라우팅 테이블로 변환
    pub fn parse_servers(record: &Record, router: &ServerAddress) -> DriverResult<RoutingTable> {
        let table = decode_servers(record).map_err(|source| {
            warn!(%router, error = %source, "Unable to parse servers entry");
            RoutingError::UnparseableServers {
                router: router.clone(),
                record: record.clone(),
                source: Box::new(source),
            }
        })?;

        debug!(
            %router,
            readers = table.readers.len(),
            routers = table.routers.len(),
            writers = table.writers.len(),
            "Parsed routing table"
        );

        Ok(table)
    }

    /// TTL을 현재 시각 기준 만료 시각으로 변환
    pub fn parse_ttl(record: &Record, router: &ServerAddress) -> DriverResult<ExpiryTimestamp> {
        Self::parse_ttl_at(record, router, Utc::now().timestamp_millis())
    }

    /// TTL을 주어진 시각(epoch 밀리초) 기준 만료 시각으로 변환
    pub fn parse_ttl_at(
        record: &Record,
        router: &ServerAddress,
        now_millis: i64,
    ) -> DriverResult<ExpiryTimestamp> {
        let expires_at = decode_ttl_millis(record)
            .and_then(|ttl_millis| {
                now_millis.checked_add(ttl_millis).ok_or_else(|| {
                    DriverError::type_conversion(format!(
                        "Expiry overflows: {} + {}",
                        now_millis, ttl_millis
                    ))
                })
            })
            .map_err(|source| {
                warn!(%router, error = %source, "Unable to parse TTL entry");
                RoutingError::UnparseableTtl {
                    router: router.clone(),
                    record: record.clone(),
                    source: Box::new(source),
                }
            })?;

        Ok(ExpiryTimestamp::from_millis(expires_at))
    }

    /// 프로시저 호출부터 테이블, 만료 시각 계산까지 한 번에 수행
    pub async fn discover<R>(
        &self,
        runner: &R,
        router: &ServerAddress,
    ) -> DriverResult<DiscoveredRoutingTable>
    where
        R: TransactionRunner + ?Sized,
    {
        let record = self.call_routing_procedure(runner, router).await?;
        let table = Self::parse_servers(&record, router)?;
        let expires_at = Self::parse_ttl(&record, router)?;

        Ok(DiscoveredRoutingTable { table, expires_at })
    }
}

fn decode_servers(record: &Record) -> DriverResult<RoutingTable> {
    let entries = record
        .get(SERVERS_FIELD)
        .or_else(|| record.get(LEGACY_SERVERS_FIELD))
        .cloned()
        .ok_or_else(|| {
            DriverError::type_conversion(format!("Key '{}' not found", SERVERS_FIELD))
        })?;

    let mut table = RoutingTable::new();
    for entry in Vec::<Value>::try_from(entries)? {
        if let Some(entry) = ServerEntry::decode(entry)? {
            for address in entry.addresses {
                table.add_server(entry.role, address);
            }
        }
    }

    Ok(table)
}

fn decode_ttl_millis(record: &Record) -> DriverResult<i64> {
    let ttl = record
        .get(TTL_FIELD)
        .ok_or_else(|| DriverError::type_conversion(format!("Key '{}' not found", TTL_FIELD)))?;

    let overflow = || DriverError::type_conversion(format!("TTL {} overflows milliseconds", ttl));

    let millis = match ttl {
        Value::Integer(seconds) if *seconds >= 0 => seconds.checked_mul(1000).ok_or_else(overflow)?,
        Value::Float(seconds) if seconds.is_finite() && *seconds >= 0.0 => {
            let millis = (seconds * 1000.0).round();
            if millis >= i64::MAX as f64 {
                return Err(overflow());
            }
            millis as i64
        }
        Value::Integer(_) | Value::Float(_) => {
            return Err(DriverError::type_conversion(format!(
                "TTL must be a non-negative number of seconds, got {}",
                ttl
            )))
        }
        other => {
            return Err(DriverError::type_conversion(format!(
                "Cannot convert {} to TTL seconds",
                other.type_name()
            )))
        }
    };

    Ok(millis)
}
