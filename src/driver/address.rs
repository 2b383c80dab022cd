//! ServerAddress - 서버 주소
//!
//! 라우팅 응답과 URI에 등장하는 `host:port` 형식의 주소

use std::fmt;
use std::str::FromStr;

use super::error::{DriverError, DriverResult};

/// Bolt 기본 포트
pub const DEFAULT_PORT: u16 = 7687;

/// 서버 주소
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    /// 호스트 (IPv6는 대괄호 없이 저장)
    pub host: String,
    /// 포트
    pub port: u16,
}

impl ServerAddress {
    /// 새 서버 주소 생성
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, `host`, `[ipv6]:port`, `[ipv6]` 형식 파싱
    pub fn parse(s: &str) -> DriverResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DriverError::configuration("Empty server address"));
        }

        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                DriverError::configuration(format!("Invalid server address: {}", s))
            })?;
            if host.is_empty() {
                return Err(DriverError::configuration(format!("Invalid server address: {}", s)));
            }
            let port = match tail {
                "" => DEFAULT_PORT,
                _ => match tail.strip_prefix(':') {
                    Some(port) => parse_port(port)?,
                    None => {
                        return Err(DriverError::configuration(format!(
                            "Invalid server address: {}",
                            s
                        )))
                    }
                },
            };
            return Ok(Self::new(host, port));
        }

        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [host] if !host.is_empty() => Ok(Self::new(*host, DEFAULT_PORT)),
            [host, port] if !host.is_empty() => Ok(Self::new(*host, parse_port(port)?)),
            _ => Err(DriverError::configuration(format!("Invalid server address: {}", s))),
        }
    }

    /// 소켓 주소로 변환
    pub fn to_socket_addr(&self) -> String {
        self.to_string()
    }
}

fn parse_port(port: &str) -> DriverResult<u16> {
    port.parse()
        .map_err(|_| DriverError::configuration(format!("Invalid port: {}", port)))
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ServerAddress {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for ServerAddress {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_PORT)
    }
}
