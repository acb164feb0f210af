//! Ordered registry of the tests seen in one package's output

use std::collections::HashMap;

use thiserror::Error;

use crate::report::TestRecord;

/// A test name was registered twice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Test already registered: {name}")]
pub struct DuplicateTest {
    /// The repeated test name
    pub name: String,
    /// Index of the record that already holds the name
    pub index: usize,
}

/// Test records in first-seen order with a name index
#[derive(Debug, Default)]
pub struct TestRegistry {
    records: Vec<TestRecord>,
    index: HashMap<String, usize>,
}

impl TestRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new test and return its index
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTest` if the name is already registered. The existing
    /// record is left untouched.
    pub fn register(&mut self, name: &str) -> Result<usize, DuplicateTest> {
        if let Some(&index) = self.index.get(name) {
            return Err(DuplicateTest {
                name: name.to_string(),
                index,
            });
        }

        let index = self.records.len();
        self.records.push(TestRecord::new(name));
        self.index.insert(name.to_string(), index);
        Ok(index)
    }

    /// Index of a registered test
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Mutable access by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TestRecord> {
        self.records.get_mut(index)
    }

    /// Mutable access by name
    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut TestRecord> {
        let index = self.index_of(name)?;
        self.records.get_mut(index)
    }

    /// Number of registered tests
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no test has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the registry, yielding records in registration order
    #[must_use]
    pub fn into_records(self) -> Vec<TestRecord> {
        self.records
    }
}
