//! Symbol table for one replay session

use super::value::Number;
use rustc_hash::FxHashMap;

/// Mapping from variable name to its current value.
///
/// Absent names read as `0` and are never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    values: FxHashMap<String, Number>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `name`, `0` if it was never written
    pub fn get(&self, name: &str) -> Number {
        self.values.get(name).copied().unwrap_or_default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Number>) {
        self.values.insert(name.into(), value.into());
    }

    /// Whether `name` has ever been written
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Written variables sorted by name
    pub fn entries(&self) -> Vec<(&str, Number)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_reads_zero() {
        let table = SymbolTable::new();
        assert_eq!(table.get("missing"), Number::Int(0));
        assert!(!table.contains("missing"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_and_entries() {
        let mut table = SymbolTable::new();
        table.set("b", 2);
        table.set("a", 1.5);
        table.set("b", 3);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("b"), Number::Int(3));
        assert_eq!(
            table.entries(),
            vec![("a", Number::Float(1.5)), ("b", Number::Int(3))]
        );
    }
}
