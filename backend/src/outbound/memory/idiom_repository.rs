//! Idiom repository backed by a map keyed on the normalised idiom text.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{IdiomRepository, IdiomRepositoryError};
use crate::domain::{Idiom, IdiomName, IdiomRecord};

/// Volatile [`IdiomRepository`].
#[derive(Debug, Default)]
pub struct InMemoryIdiomRepository {
    rows: RwLock<BTreeMap<String, Idiom>>,
}

impl InMemoryIdiomRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Major code ascending with missing codes last, then idiom text.
fn list_order(left: &Idiom, right: &Idiom) -> Ordering {
    match (&left.major_type_code, &right.major_type_code) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| left.idiom.cmp(&right.idiom))
}

#[async_trait]
impl IdiomRepository for InMemoryIdiomRepository {
    async fn list_all(&self) -> Result<Vec<Idiom>, IdiomRepositoryError> {
        let mut idioms: Vec<Idiom> = self.rows.read().await.values().cloned().collect();
        idioms.sort_by(list_order);
        Ok(idioms)
    }

    async fn find_by_name(&self, name: &IdiomName) -> Result<Option<Idiom>, IdiomRepositoryError> {
        Ok(self.rows.read().await.get(name.as_str()).cloned())
    }

    async fn exists(&self, name: &IdiomName) -> Result<bool, IdiomRepositoryError> {
        Ok(self.rows.read().await.contains_key(name.as_str()))
    }

    async fn insert(&self, record: &IdiomRecord) -> Result<(), IdiomRepositoryError> {
        let mut rows = self.rows.write().await;
        let key = record.name().as_str();
        if rows.contains_key(key) {
            return Err(IdiomRepositoryError::duplicate(key));
        }
        rows.insert(key.to_owned(), record.idiom().clone());
        Ok(())
    }

    async fn update(&self, record: &IdiomRecord) -> Result<bool, IdiomRepositoryError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(record.name().as_str()) {
            Some(row) => {
                *row = record.idiom().clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(name: &str, major: Option<&str>) -> IdiomRecord {
        IdiomRecord::new(Idiom {
            major_type_code: major.map(str::to_owned),
            minor_type_code: major.map(|_| "SUB_X".to_owned()),
            ..Idiom::new(name)
        })
        .expect("valid idiom")
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_existing_key() {
        let repo = InMemoryIdiomRepository::new();
        repo.insert(&record("一马当先", Some("DW"))).await.expect("first insert");
        let error = repo
            .insert(&record("一马当先", None))
            .await
            .expect_err("duplicate");
        assert_eq!(error, IdiomRepositoryError::duplicate("一马当先"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_every_field() {
        let repo = InMemoryIdiomRepository::new();
        repo.insert(&record("画蛇添足", Some("DW"))).await.expect("insert");
        assert!(repo.update(&record("画蛇添足", None)).await.expect("update"));
        let name = IdiomName::new("画蛇添足").expect("valid name");
        let stored = repo.find_by_name(&name).await.expect("query").expect("row");
        assert_eq!(stored.major_type_code, None);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_key_reports_no_match() {
        let repo = InMemoryIdiomRepository::new();
        assert!(!repo.update(&record("对牛弹琴", None)).await.expect("update"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_by_major_code_with_unclassified_last() {
        let repo = InMemoryIdiomRepository::new();
        for (name, major) in [("乙", None), ("甲", Some("ZR")), ("丙", Some("DW")), ("丁", Some("DW"))] {
            repo.insert(&record(name, major)).await.expect("insert");
        }
        let names: Vec<String> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|idiom| idiom.idiom)
            .collect();
        assert_eq!(names, vec!["丁", "丙", "甲", "乙"]);
    }
}
