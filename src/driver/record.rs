//! Record - 쿼리 결과 레코드
//!
//! 이름으로 필드를 조회할 수 있는 단일 레코드와 결과 스트림

use std::collections::{HashMap, VecDeque};
use std::fmt;

use super::error::{DriverError, DriverResult};
use super::types::Value;

// ============================================================================
// Record - 단일 레코드
// ============================================================================

/// 쿼리 결과 레코드
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 컬럼 키
    keys: Vec<String>,
    /// 값들
    values: Vec<Value>,
}

impl Record {
    /// 새 레코드 생성
    ///
    /// 키와 값의 개수가 다르면 짧은 쪽에 맞춥니다.
    pub fn new(mut keys: Vec<String>, mut values: Vec<Value>) -> Self {
        let len = keys.len().min(values.len());
        keys.truncate(len);
        values.truncate(len);
        Self { keys, values }
    }

    /// 키-값 쌍으로 레코드 생성
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let (keys, values) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self { keys, values }
    }

    /// 빈 레코드 생성
    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    /// 키 목록
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 값 목록
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// 레코드 길이
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 빈 레코드 여부
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 키로 값 가져오기
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| self.values.get(i))
    }

    /// 키 존재 여부
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// 키로 타입 변환된 값 가져오기
    pub fn get_as<T>(&self, key: &str) -> DriverResult<T>
    where
        T: TryFrom<Value, Error = DriverError>,
    {
        self.get(key)
            .cloned()
            .ok_or_else(|| DriverError::type_conversion(format!("Key '{}' not found", key)))
            .and_then(T::try_from)
    }

    /// Optional 값 가져오기 (None은 Null)
    pub fn get_optional<T>(&self, key: &str) -> DriverResult<Option<T>>
    where
        T: TryFrom<Value, Error = DriverError>,
    {
        match self.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(v) => T::try_from(v.clone()).map(Some),
        }
    }

    /// Integer 값 가져오기
    pub fn get_int(&self, key: &str) -> DriverResult<i64> {
        self.get_as::<i64>(key)
    }

    /// String 값 가져오기
    pub fn get_string(&self, key: &str) -> DriverResult<String> {
        self.get_as::<String>(key)
    }

    /// List 값 가져오기
    pub fn get_list(&self, key: &str) -> DriverResult<Vec<Value>> {
        self.get_as::<Vec<Value>>(key)
    }

    /// Map으로 변환
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.keys
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .keys
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::iter::Zip<std::slice::Iter<'a, String>, std::slice::Iter<'a, Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter().zip(self.values.iter())
    }
}

// ============================================================================
// RecordStream - 레코드 스트림
// ============================================================================

/// 레코드 스트림 (결과 반복자)
#[derive(Debug, Default)]
pub struct RecordStream {
    records: VecDeque<Record>,
}

impl RecordStream {
    /// 새 스트림 생성
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// 빈 스트림 생성
    pub fn empty() -> Self {
        Self::default()
    }

    /// 남은 레코드 수
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    /// 레코드가 정확히 하나일 때만 가져오기
    pub fn single(mut self) -> DriverResult<Record> {
        if self.records.len() != 1 {
            return Err(DriverError::type_conversion(format!(
                "Expected single record, got {}",
                self.records.len()
            )));
        }
        self.records
            .pop_front()
            .ok_or_else(|| DriverError::type_conversion("Expected single record, got 0"))
    }

    /// 모든 레코드 가져오기
    pub fn collect_all(self) -> Vec<Record> {
        self.records.into()
    }
}

impl Iterator for RecordStream {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.pop_front()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> Record {
        Record::from_pairs(vec![
            ("ttl", Value::Integer(300)),
            ("servers", Value::from(vec!["10.0.0.2:7687"])),
            ("name", Value::from("router")),
        ])
    }

    #[test]
    fn test_record_creation() {
        let record = create_test_record();
        assert_eq!(record.len(), 3);
        assert!(!record.is_empty());
        assert_eq!(record.keys(), &["ttl", "servers", "name"]);
    }

    #[test]
    fn test_record_new_mismatched_lengths() {
        let record = Record::new(vec!["a".into(), "b".into()], vec![Value::Integer(1)]);
        assert_eq!(record.len(), 1);
        assert_eq!(record.keys(), &["a"]);
    }

    #[test]
    fn test_record_get() {
        let record = create_test_record();

        assert_eq!(record.get("ttl"), Some(&Value::Integer(300)));
        assert_eq!(record.get("name"), Some(&Value::String("router".into())));
        assert_eq!(record.get("unknown"), None);
        assert!(record.contains_key("servers"));
        assert!(!record.contains_key("unknown"));
    }

    #[test]
    fn test_record_get_typed() {
        let record = create_test_record();

        assert_eq!(record.get_int("ttl").unwrap(), 300);
        assert_eq!(record.get_string("name").unwrap(), "router");
        assert_eq!(record.get_list("servers").unwrap().len(), 1);
    }

    #[test]
    fn test_record_get_typed_error() {
        let record = create_test_record();

        // Wrong type
        assert!(record.get_int("name").is_err());
        assert!(record.get_list("ttl").is_err());

        // Key not found
        let err = record.get_string("unknown").unwrap_err();
        assert!(err.to_string().contains("Key 'unknown' not found"));
    }

    #[test]
    fn test_record_get_optional() {
        let record = Record::from_pairs(vec![("value", Value::Integer(42)), ("null_value", Value::Null)]);

        assert_eq!(record.get_optional::<i64>("value").unwrap(), Some(42));
        assert_eq!(record.get_optional::<i64>("null_value").unwrap(), None);
        assert_eq!(record.get_optional::<i64>("unknown").unwrap(), None);
    }

    #[test]
    fn test_record_display() {
        let record = Record::from_pairs(vec![("ttl", Value::Integer(300)), ("role", Value::from("READ"))]);
        assert_eq!(record.to_string(), "{ttl: 300, role: \"READ\"}");
    }

    #[test]
    fn test_record_to_map() {
        let map = create_test_record().to_map();
        assert_eq!(map.get("ttl"), Some(&Value::Integer(300)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_record_ref_iterator() {
        let record = create_test_record();
        let pairs: Vec<_> = (&record).into_iter().collect();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].0, "ttl");
    }

    #[test]
    fn test_record_stream() {
        let records = vec![
            Record::from_pairs(vec![("n", 1)]),
            Record::from_pairs(vec![("n", 2)]),
        ];

        let mut stream = RecordStream::new(records);

        assert_eq!(stream.remaining(), 2);
        assert_eq!(stream.next().unwrap().get_int("n").unwrap(), 1);
        assert_eq!(stream.remaining(), 1);
        assert_eq!(stream.next().unwrap().get_int("n").unwrap(), 2);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_record_stream_single() {
        let stream = RecordStream::new(vec![Record::from_pairs(vec![("n", 1)])]);
        assert_eq!(stream.single().unwrap().get_int("n").unwrap(), 1);
    }

    #[test]
    fn test_record_stream_single_error() {
        let stream = RecordStream::new(vec![
            Record::from_pairs(vec![("n", 1)]),
            Record::from_pairs(vec![("n", 2)]),
        ]);
        assert!(stream.single().is_err());
        assert!(RecordStream::empty().single().is_err());
    }

    #[test]
    fn test_record_stream_collect_all() {
        let stream = RecordStream::new(vec![Record::empty(), Record::empty()]);
        assert_eq!(stream.collect_all().len(), 2);
    }

    #[test]
    fn test_empty_record() {
        let record = Record::empty();
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert_eq!(record.to_string(), "{}");
    }
}
