//! 라우팅 테이블
//!
//! 라우팅 프로시저 응답 하나에서 얻은 역할별 서버 목록과 만료 시각.

use std::fmt;

use chrono::Utc;

use super::super::address::ServerAddress;

/// 서버 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerRole {
    /// 라우팅 테이블 제공자
    Route,
    /// 쓰기 트랜잭션 처리 (리더)
    Write,
    /// 읽기 트랜잭션 처리 (팔로워)
    Read,
}

impl ServerRole {
    /// 모든 역할
    pub const ALL: [ServerRole; 3] = [Self::Read, Self::Route, Self::Write];

    /// 문자열에서 역할 파싱 (대소문자 무시)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ROUTE" => Some(Self::Route),
            "WRITE" => Some(Self::Write),
            "READ" => Some(Self::Read),
            _ => None,
        }
    }

    /// 라우팅 응답의 역할 태그 해석
    ///
    /// 서버가 보내는 태그와 정확히 일치해야 합니다. `read`, `Write` 같은
    /// 변형은 알 수 없는 역할로 취급됩니다.
    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            "ROUTE" => Some(Self::Route),
            "WRITE" => Some(Self::Write),
            "READ" => Some(Self::Read),
            _ => None,
        }
    }

    /// 역할을 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "ROUTE",
            Self::Write => "WRITE",
            Self::Read => "READ",
        }
    }
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 라우팅 테이블
///
/// 각 목록은 응답에 나타난 순서를 유지하며 중복을 제거하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    /// 리더 목록 (읽기 트랜잭션용)
    pub readers: Vec<ServerAddress>,
    /// 라우터 목록 (라우팅 테이블 조회용)
    pub routers: Vec<ServerAddress>,
    /// 라이터 목록 (쓰기 트랜잭션용)
    pub writers: Vec<ServerAddress>,
}

impl RoutingTable {
    /// 빈 라우팅 테이블 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 역할별 서버 추가
    pub fn add_server(&mut self, role: ServerRole, address: ServerAddress) {
        match role {
            ServerRole::Route => self.routers.push(address),
            ServerRole::Write => self.writers.push(address),
            ServerRole::Read => self.readers.push(address),
        }
    }

    /// 역할별 서버 목록
    pub fn servers(&self, role: ServerRole) -> &[ServerAddress] {
        match role {
            ServerRole::Route => &self.routers,
            ServerRole::Write => &self.writers,
            ServerRole::Read => &self.readers,
        }
    }

    /// 쓰기 가능한 서버가 있는지 확인
    pub fn has_writers(&self) -> bool {
        !self.writers.is_empty()
    }

    /// 읽기 가능한 서버가 있는지 확인
    pub fn has_readers(&self) -> bool {
        !self.readers.is_empty()
    }

    /// 라우터가 있는지 확인
    pub fn has_routers(&self) -> bool {
        !self.routers.is_empty()
    }

    /// 모든 목록이 비었는지 확인
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty() && self.routers.is_empty() && self.writers.is_empty()
    }

    /// 전체 주소 수 (역할 중복 포함)
    pub fn len(&self) -> usize {
        self.readers.len() + self.routers.len() + self.writers.len()
    }
}

/// 만료 시각 (epoch 기준 밀리초)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryTimestamp(i64);

impl ExpiryTimestamp {
    /// 밀리초 값으로 생성
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// 밀리초 값
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// 주어진 시각에 만료되었는지 확인
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        now_millis >= self.0
    }

    /// 현재 시각 기준 만료 여부
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    /// 주어진 시각부터 남은 밀리초 (만료되었으면 0)
    pub fn remaining_at(&self, now_millis: i64) -> i64 {
        self.0.saturating_sub(now_millis).max(0)
    }
}

impl fmt::Display for ExpiryTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// 만료 시각이 붙은 라우팅 테이블
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRoutingTable {
    /// 라우팅 테이블
    pub table: RoutingTable,
    /// 만료 시각
    pub expires_at: ExpiryTimestamp,
}

impl DiscoveredRoutingTable {
    /// 주어진 시각에 갱신이 필요한지 확인
    pub fn is_stale_at(&self, now_millis: i64) -> bool {
        self.expires_at.is_expired_at(now_millis)
    }

    /// 현재 시각 기준 갱신 필요 여부
    pub fn is_stale(&self) -> bool {
        self.expires_at.is_expired()
    }
}
