use crate::prelude::*;
use std::env;

const CAPACITY_VAR: &str = "KEYHEAP_INITIAL_CAPACITY";
const DEFAULT_INITIAL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapConfig {
    /// Number of entries to reserve space for when the heap is created.
    pub initial_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl HeapConfig {
    pub fn new(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Reads the configuration from `KEYHEAP_INITIAL_CAPACITY`, falling back to the default
    /// when the variable is unset or cannot be parsed.
    pub fn from_env() -> Self {
        let out = Self::from_value(env::var(CAPACITY_VAR).ok().as_deref());
        debug!("heap config: {:?}", out);
        out
    }

    fn from_value(capacity: Option<&str>) -> Self {
        let mut out = Self::default();

        if let Some(value) = capacity {
            out.initial_capacity = parse_capacity(value).unwrap_or_else(|e| {
                warn!("{}, reverting to {}", e, DEFAULT_INITIAL_CAPACITY);
                DEFAULT_INITIAL_CAPACITY
            });
        }

        out
    }
}

fn parse_capacity(value: &str) -> Result<usize> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_INITIAL_CAPACITY);
    }

    value
        .parse()
        .map_err(|_| anyhow!("invalid initial capacity {:?}", value))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("128").unwrap(), 128);
        assert_eq!(parse_capacity(" 7 \n").unwrap(), 7);
        assert_eq!(parse_capacity("").unwrap(), DEFAULT_INITIAL_CAPACITY);
        assert_eq!(parse_capacity("0").unwrap(), 0);

        parse_capacity("lots").unwrap_err();
        parse_capacity("-1").unwrap_err();
    }

    #[test]
    fn test_from_value() {
        assert_eq!(HeapConfig::from_value(None), HeapConfig::default());
        assert_eq!(HeapConfig::from_value(Some("12")), HeapConfig::new(12));
        assert_eq!(
            HeapConfig::from_value(Some("twelve")),
            HeapConfig::new(DEFAULT_INITIAL_CAPACITY)
        );
    }

    #[test]
    fn test_from_env() {
        // Only this test touches the variable.
        env::set_var(CAPACITY_VAR, "300");
        assert_eq!(HeapConfig::from_env(), HeapConfig::new(300));

        env::set_var(CAPACITY_VAR, "not a number");
        assert_eq!(HeapConfig::from_env(), HeapConfig::default());

        env::remove_var(CAPACITY_VAR);
        assert_eq!(HeapConfig::from_env(), HeapConfig::default());
    }

    #[test]
    fn test_default() {
        assert_eq!(HeapConfig::default(), HeapConfig::new(DEFAULT_INITIAL_CAPACITY));
    }
}
