use url::form_urlencoded;

/// A query parameter as it decodes from a URL: missing, given once, or repeated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Absent,
    Single(String),
    Many(Vec<String>),
}

/// Collapse a query parameter into one definite string.
///
/// Absent yields `""`, a repeated parameter yields its first value.
pub fn get_as_string(value: &QueryValue) -> String {
    match value {
        QueryValue::Absent => String::new(),
        QueryValue::Single(value) => value.clone(),
        QueryValue::Many(values) => values.first().cloned().unwrap_or_default(),
    }
}

/// Ordered query parameters, keyed by name with every value kept.
///
/// Key order is the order of first appearance, so re-encoding a query
/// after overwriting one key leaves the rest of the string untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string, with or without the leading `?`
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut params = Self::new();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            params.append(&key, &value);
        }

        params
    }

    pub fn get(&self, key: &str) -> QueryValue {
        match self.entries.iter().find(|(k, _)| k == key) {
            None => QueryValue::Absent,
            Some((_, values)) if values.len() == 1 => QueryValue::Single(values[0].clone()),
            Some((_, values)) => QueryValue::Many(values.clone()),
        }
    }

    /// Shorthand for `get_as_string(&self.get(key))`
    pub fn get_str(&self, key: &str) -> String {
        get_as_string(&self.get(key))
    }

    pub fn append(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), vec![value.to_string()])),
        }
    }

    /// Replace every value of `key`, keeping its position; new keys go last
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((key.to_string(), vec![value])),
        }
    }

    /// Keys in order of first appearance
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.entries {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}
