use std::collections::HashMap;

use super::dataset::Dataset;
use super::error::QueryError;

/// Resolves a dataset id to a resident dataset.
///
/// `None` is a legitimate answer: the executors turn it into an empty
/// result rather than an error.
pub trait DatasetProvider {
    fn get_dataset(&self, id: &str) -> Option<&Dataset>;
}

/// In-memory dataset store keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    datasets: HashMap<String, Dataset>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, dataset: Dataset) -> Result<(), QueryError> {
        if self.datasets.contains_key(&dataset.id) {
            return Err(QueryError::DatasetAlreadyExists(dataset.id));
        }
        self.datasets.insert(dataset.id.clone(), dataset);
        Ok(())
    }

    /// Registers `dataset`, returning whatever previously lived under its id.
    pub fn replace(&mut self, dataset: Dataset) -> Option<Dataset> {
        self.datasets.insert(dataset.id.clone(), dataset)
    }

    pub fn remove(&mut self, id: &str) -> Result<Dataset, QueryError> {
        self.datasets
            .remove(id)
            .ok_or_else(|| QueryError::DatasetNotFound(id.to_string()))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Dataset> {
        self.datasets.get(id)
    }

    /// Dataset ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.datasets.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl DatasetProvider for Catalog {
    fn get_dataset(&self, id: &str) -> Option<&Dataset> {
        self.get(id)
    }
}

impl DatasetProvider for HashMap<String, Dataset> {
    fn get_dataset(&self, id: &str) -> Option<&Dataset> {
        self.get(id)
    }
}
