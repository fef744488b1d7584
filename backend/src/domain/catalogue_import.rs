//! Bulk import of a catalogue export.
//!
//! An [`ImportBundle`] holds the three lists read from disk. [`ImportAnalysis`]
//! summarises it and flags dangling references before anything is written;
//! [`CatalogueImport`] then writes major types, minor types and idioms in
//! that order, one row at a time, stopping at the first failure. Category
//! codes already in the store are skipped and idioms are upserted, so a
//! re-run after a partial import converges.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::{CategoryCatalogue, IdiomCatalogue, UpsertOutcome};
use crate::domain::{Error, ErrorCode, Idiom, MajorType, MinorType, NewMajorType, NewMinorType};

/// The contents of one import directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBundle {
    /// Rows of `major_types.json`.
    pub major_types: Vec<MajorType>,
    /// Rows of `minor_types.json`.
    pub minor_types: Vec<MinorType>,
    /// Rows of `idioms.json`.
    pub idioms: Vec<Idiom>,
}

/// A minor type whose parent is not part of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanMinorType {
    /// The minor type's code.
    pub type_code: String,
    /// The missing parent code.
    pub major_type_code: String,
}

/// An idiom referencing category codes absent from the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanIdiom {
    /// The idiom text.
    pub idiom: String,
    /// Major code as given, if any.
    pub major_type_code: Option<String>,
    /// Minor code as given, if any.
    pub minor_type_code: Option<String>,
}

/// Pre-import summary of a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportAnalysis {
    /// Number of major types.
    pub major_types: usize,
    /// Number of minor types.
    pub minor_types: usize,
    /// Number of idioms.
    pub idioms: usize,
    /// Idioms carrying both category codes.
    pub classified_idioms: usize,
    /// Minor types that will be rejected for lack of a parent.
    pub orphan_minor_types: Vec<OrphanMinorType>,
    /// Classified idioms whose codes match no category in the bundle.
    pub orphan_idioms: Vec<OrphanIdiom>,
}

impl ImportAnalysis {
    /// Summarise `bundle`.
    ///
    /// # Examples
    /// ```
    /// use chengyu_backend::domain::{ImportAnalysis, ImportBundle, MinorType};
    ///
    /// let bundle = ImportBundle {
    ///     minor_types: vec![MinorType {
    ///         type_code: "SUB_MA".to_owned(),
    ///         major_type_code: "DW".to_owned(),
    ///         type_name: "马".to_owned(),
    ///         description: None,
    ///     }],
    ///     ..ImportBundle::default()
    /// };
    /// let analysis = ImportAnalysis::of(&bundle);
    /// assert_eq!(analysis.orphan_minor_types.len(), 1);
    /// assert!(!analysis.is_clean());
    /// ```
    pub fn of(bundle: &ImportBundle) -> Self {
        let major_codes: BTreeSet<&str> = bundle
            .major_types
            .iter()
            .map(|major| major.type_code.as_str())
            .collect();
        let minor_codes: BTreeSet<&str> = bundle
            .minor_types
            .iter()
            .map(|minor| minor.type_code.as_str())
            .collect();

        let orphan_minor_types = bundle
            .minor_types
            .iter()
            .filter(|minor| !major_codes.contains(minor.major_type_code.as_str()))
            .map(|minor| OrphanMinorType {
                type_code: minor.type_code.clone(),
                major_type_code: minor.major_type_code.clone(),
            })
            .collect();

        let orphan_idioms = bundle
            .idioms
            .iter()
            .filter_map(|idiom| {
                let (major, minor) = idiom.classification()?;
                let known = major_codes.contains(major) && minor_codes.contains(minor);
                (!known).then(|| OrphanIdiom {
                    idiom: idiom.idiom.clone(),
                    major_type_code: idiom.major_type_code.clone(),
                    minor_type_code: idiom.minor_type_code.clone(),
                })
            })
            .collect();

        Self {
            major_types: bundle.major_types.len(),
            minor_types: bundle.minor_types.len(),
            idioms: bundle.idioms.len(),
            classified_idioms: bundle.idioms.iter().filter(|i| i.is_classified()).count(),
            orphan_minor_types,
            orphan_idioms,
        }
    }

    /// Whether the bundle has no dangling references.
    pub fn is_clean(&self) -> bool {
        self.orphan_minor_types.is_empty() && self.orphan_idioms.is_empty()
    }
}

impl fmt::Display for ImportAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "major types:        {}", self.major_types)?;
        writeln!(f, "minor types:        {}", self.minor_types)?;
        writeln!(
            f,
            "idioms:             {} ({} classified)",
            self.idioms, self.classified_idioms
        )?;
        writeln!(f, "orphan minor types: {}", self.orphan_minor_types.len())?;
        for orphan in &self.orphan_minor_types {
            writeln!(
                f,
                "  {} -> missing major {}",
                orphan.type_code, orphan.major_type_code
            )?;
        }
        writeln!(f, "orphan idioms:      {}", self.orphan_idioms.len())?;
        for orphan in &self.orphan_idioms {
            writeln!(
                f,
                "  {} ({}/{})",
                orphan.idiom,
                orphan.major_type_code.as_deref().unwrap_or("-"),
                orphan.minor_type_code.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

/// Rows written by a completed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Major types created.
    pub major_types: usize,
    /// Major types skipped because their code was already stored.
    pub major_types_existing: usize,
    /// Minor types created.
    pub minor_types: usize,
    /// Minor types skipped because their code was already stored.
    pub minor_types_existing: usize,
    /// Idioms that did not exist before.
    pub idioms_inserted: usize,
    /// Idioms that replaced an existing row.
    pub idioms_updated: usize,
}

/// Writes an [`ImportBundle`] through the driving ports, so imported rows
/// obey the same validation as API writes.
pub struct CatalogueImport<C: ?Sized, I: ?Sized> {
    categories: Arc<C>,
    idioms: Arc<I>,
}

impl<C, I> CatalogueImport<C, I>
where
    C: CategoryCatalogue + ?Sized,
    I: IdiomCatalogue + ?Sized,
{
    /// Create an importer over the given use-cases.
    pub fn new(categories: Arc<C>, idioms: Arc<I>) -> Self {
        Self { categories, idioms }
    }

    /// Import every row, aborting on the first failure.
    ///
    /// Rows written before the failure stay written.
    pub async fn run(&self, bundle: ImportBundle) -> Result<ImportReport, Error> {
        let mut report = ImportReport::default();

        for major in bundle.major_types {
            let new = NewMajorType {
                type_code: major.type_code.trim().to_owned(),
                type_name: major.type_name.trim().to_owned(),
                description: blank_to_none(major.description),
            };
            let created = self.categories.create_major_type(new).await;
            if record_created(created, "major type", &major.type_code)? {
                report.major_types += 1;
            } else {
                report.major_types_existing += 1;
            }
        }
        info!(
            created = report.major_types,
            existing = report.major_types_existing,
            "major types imported"
        );

        for minor in bundle.minor_types {
            let new = NewMinorType {
                type_code: minor.type_code.trim().to_owned(),
                major_type_code: minor.major_type_code.trim().to_owned(),
                type_name: minor.type_name.trim().to_owned(),
                description: blank_to_none(minor.description),
            };
            let created = self.categories.create_minor_type(new).await;
            if record_created(created, "minor type", &minor.type_code)? {
                report.minor_types += 1;
            } else {
                report.minor_types_existing += 1;
            }
        }
        info!(
            created = report.minor_types,
            existing = report.minor_types_existing,
            "minor types imported"
        );

        for idiom in bundle.idioms {
            let name = idiom.idiom.clone();
            let outcome = self
                .idioms
                .upsert_idiom(idiom)
                .await
                .map_err(|error| context(error, "idiom", &name))?;
            match outcome {
                UpsertOutcome::Inserted => report.idioms_inserted += 1,
                UpsertOutcome::Updated => report.idioms_updated += 1,
            }
        }
        info!(
            inserted = report.idioms_inserted,
            updated = report.idioms_updated,
            "idioms imported"
        );

        Ok(report)
    }
}

fn blank_to_none(text: Option<String>) -> Option<String> {
    text.filter(|value| !value.trim().is_empty())
}

/// `Ok(true)` when the row was written, `Ok(false)` when its code exists.
fn record_created<T>(result: Result<T, Error>, kind: &str, code: &str) -> Result<bool, Error> {
    match result {
        Ok(_) => Ok(true),
        Err(error) if error.code() == ErrorCode::Conflict => {
            debug!(kind, code, "already stored, skipping");
            Ok(false)
        }
        Err(error) => Err(context(error, kind, code)),
    }
}

fn context(error: Error, kind: &str, key: &str) -> Error {
    let message = format!("importing {kind} '{key}' failed: {}", error.message());
    let mut wrapped = Error::new(error.code(), message);
    if let Some(details) = error.details() {
        wrapped = wrapped.with_details(details.clone());
    }
    if let Some(trace_id) = error.trace_id() {
        wrapped = wrapped.with_trace_id(trace_id.to_owned());
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCategoryCatalogue, MockIdiomCatalogue};
    use crate::domain::{CategoryService, IdiomService};
    use crate::outbound::memory::{InMemoryCategoryRepository, InMemoryIdiomRepository};
    use mockall::Sequence;
    use rstest::{fixture, rstest};

    fn major(code: &str) -> MajorType {
        MajorType {
            type_code: code.to_owned(),
            type_name: format!("name {code}"),
            description: Some(String::new()),
        }
    }

    fn minor(code: &str, parent: &str) -> MinorType {
        MinorType {
            type_code: code.to_owned(),
            major_type_code: parent.to_owned(),
            type_name: format!("name {code}"),
            description: None,
        }
    }

    fn classified(name: &str, major: &str, minor: &str) -> Idiom {
        Idiom {
            major_type_code: Some(major.to_owned()),
            minor_type_code: Some(minor.to_owned()),
            ..Idiom::new(name)
        }
    }

    #[fixture]
    fn bundle() -> ImportBundle {
        ImportBundle {
            major_types: vec![major("DW")],
            minor_types: vec![minor("SUB_MA", "DW"), minor("SUB_YU", "SW")],
            idioms: vec![
                classified("一马当先", "DW", "SUB_MA"),
                classified("如鱼得水", "SW", "SUB_YU"),
                Idiom::new("画蛇添足"),
            ],
        }
    }

    #[rstest]
    fn analysis_counts_rows_and_flags_orphans(bundle: ImportBundle) {
        let analysis = ImportAnalysis::of(&bundle);
        assert_eq!(analysis.major_types, 1);
        assert_eq!(analysis.minor_types, 2);
        assert_eq!(analysis.idioms, 3);
        assert_eq!(analysis.classified_idioms, 2);
        assert_eq!(
            analysis.orphan_minor_types,
            vec![OrphanMinorType {
                type_code: "SUB_YU".to_owned(),
                major_type_code: "SW".to_owned(),
            }]
        );
        assert_eq!(analysis.orphan_idioms.len(), 1);
        assert_eq!(analysis.orphan_idioms.first().map(|o| o.idiom.as_str()), Some("如鱼得水"));
        assert!(!analysis.is_clean());
    }

    #[rstest]
    fn analysis_report_lists_orphans(bundle: ImportBundle) {
        let text = ImportAnalysis::of(&bundle).to_string();
        assert!(text.contains("SUB_YU -> missing major SW"));
        assert!(text.contains("如鱼得水 (SW/SUB_YU)"));
    }

    #[rstest]
    #[tokio::test]
    async fn imports_in_dependency_order() {
        let mut seq = Sequence::new();
        let mut categories = MockCategoryCatalogue::new();
        let mut idioms = MockIdiomCatalogue::new();
        categories
            .expect_create_major_type()
            .withf(|new| new.type_code == "DW" && new.description.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new| Ok(new.to_entity()));
        categories
            .expect_create_minor_type()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new| Ok(new.to_entity()));
        idioms
            .expect_upsert_idiom()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|idiom| {
                Ok(if idiom.is_classified() {
                    UpsertOutcome::Inserted
                } else {
                    UpsertOutcome::Updated
                })
            });

        let importer = CatalogueImport::new(Arc::new(categories), Arc::new(idioms));
        let report = importer
            .run(ImportBundle {
                major_types: vec![major("DW")],
                minor_types: vec![minor("SUB_MA", "DW")],
                idioms: vec![classified("一马当先", "DW", "SUB_MA"), Idiom::new("画蛇添足")],
            })
            .await
            .expect("import succeeds");

        assert_eq!(
            report,
            ImportReport {
                major_types: 1,
                minor_types: 1,
                idioms_inserted: 1,
                idioms_updated: 1,
                ..ImportReport::default()
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn aborts_on_first_failure(bundle: ImportBundle) {
        let mut categories = MockCategoryCatalogue::new();
        let mut idioms = MockIdiomCatalogue::new();
        categories
            .expect_create_major_type()
            .returning(|new| Ok(new.to_entity()));
        categories
            .expect_create_minor_type()
            .times(2)
            .returning(|new| {
                if new.major_type_code == "DW" {
                    Ok(new.to_entity())
                } else {
                    Err(Error::not_found("Major type does not exist"))
                }
            });
        idioms.expect_upsert_idiom().never();

        let importer = CatalogueImport::new(Arc::new(categories), Arc::new(idioms));
        let error = importer.run(bundle).await.expect_err("import aborts");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(
            error.message(),
            "importing minor type 'SUB_YU' failed: Major type does not exist"
        );
    }

    #[rstest]
    fn wrapped_errors_keep_the_trace_id() {
        let error = Error::not_found("Major type does not exist").with_trace_id("trace-1");
        let wrapped = context(error, "minor type", "SUB_YU");
        assert_eq!(wrapped.trace_id(), Some("trace-1"));
        assert_eq!(wrapped.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn rerunning_the_same_bundle_converges() {
        let categories = Arc::new(CategoryService::new(Arc::new(
            InMemoryCategoryRepository::new(),
        )));
        let idioms = Arc::new(IdiomService::new(Arc::new(InMemoryIdiomRepository::new())));
        let importer = CatalogueImport::new(categories, Arc::clone(&idioms));
        let bundle = ImportBundle {
            major_types: vec![major("DW")],
            minor_types: vec![minor("SUB_MA", "DW")],
            idioms: vec![classified("一马当先", "DW", "SUB_MA")],
        };

        let first = importer.run(bundle.clone()).await.expect("first run");
        assert_eq!(
            first,
            ImportReport {
                major_types: 1,
                minor_types: 1,
                idioms_inserted: 1,
                ..ImportReport::default()
            }
        );

        let second = importer.run(bundle).await.expect("second run");
        assert_eq!(
            second,
            ImportReport {
                major_types_existing: 1,
                minor_types_existing: 1,
                idioms_updated: 1,
                ..ImportReport::default()
            }
        );
        let stored = idioms.list_idioms().await.expect("listed");
        assert_eq!(stored.len(), 1);
    }
}
