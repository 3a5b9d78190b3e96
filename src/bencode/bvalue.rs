use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
    ByteString(Vec<u8>), // raw bytes, not necessarily UTF-8
    Integer(i64),
    List(Vec<BValue>),
    Dict(BDict),
}

impl BValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::ByteString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BDict> {
        match self {
            BValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Short variant name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            BValue::ByteString(_) => "byte string",
            BValue::Integer(_) => "integer",
            BValue::List(_) => "list",
            BValue::Dict(_) => "dictionary",
        }
    }
}

impl From<i64> for BValue {
    fn from(i: i64) -> Self {
        BValue::Integer(i)
    }
}

impl From<&str> for BValue {
    fn from(s: &str) -> Self {
        BValue::ByteString(s.as_bytes().to_vec())
    }
}

/// A bencode dictionary.
///
/// Keys are raw byte strings and entries keep the order in which they were
/// decoded (or inserted). The format requires sorted keys but the decoder
/// does not enforce it, so the stored order is what gets re-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BDict {
    entries: Vec<(Vec<u8>, BValue)>,
}

impl BDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`. An existing key keeps its position and
    /// has its value replaced; the old value is returned.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: BValue) -> Option<BValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<BValue> {
        let pos = self.entries.iter().position(|(k, _)| k.as_slice() == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &BValue)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Vec<u8>>> FromIterator<(K, BValue)> for BDict {
    fn from_iter<I: IntoIterator<Item = (K, BValue)>>(iter: I) -> Self {
        let mut dict = BDict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

impl fmt::Display for BValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BValue::Integer(i) => write!(f, "{}", i),
            BValue::ByteString(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => write!(f, "{:?}", s),
                Err(_) => write!(f, "<{} bytes>", bytes.len()),
            },
            BValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            BValue::Dict(dict) => {
                write!(f, "{{")?;
                for (i, (k, v)) in dict.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", String::from_utf8_lossy(k), v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut dict = BDict::new();
        dict.insert("b", BValue::Integer(1));
        dict.insert("a", BValue::Integer(2));
        let old = dict.insert("b", BValue::Integer(3));

        assert_eq!(old, Some(BValue::Integer(1)));
        assert_eq!(dict.len(), 2);
        let keys: Vec<&[u8]> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![b"b".as_slice(), b"a".as_slice()]);
        assert_eq!(dict.get(b"b"), Some(&BValue::Integer(3)));
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        let value = BValue::from("spam");
        assert_eq!(value.as_bytes(), Some(b"spam".as_slice()));
        assert_eq!(value.as_integer(), None);
        assert!(value.as_dict().is_none());
        assert_eq!(value.kind(), "byte string");
    }

    #[test]
    fn test_display() {
        let dict: BDict = vec![("k", BValue::List(vec![BValue::Integer(1), BValue::from("x")]))]
            .into_iter()
            .collect();
        assert_eq!(BValue::Dict(dict).to_string(), r#"{"k": [1, "x"]}"#);
    }
}
