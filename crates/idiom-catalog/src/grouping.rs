//! Two-level category grouping and the browse order derived from it.
//!
//! Majors sort lexicographically with the unclassified bucket last. Minor
//! codes inside a major group also sort lexicographically. Idioms inside a
//! minor bucket keep the order in which they were supplied.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::Idiom;

/// Display label for idioms without a complete classification.
pub const UNCLASSIFIED_LABEL: &str = "其他";

/// Top-level grouping key.
///
/// The derived ordering places every [`MajorBucket::Major`] before
/// [`MajorBucket::Unclassified`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MajorBucket {
    /// Idioms assigned to this major code.
    Major(String),
    /// Sentinel bucket for idioms lacking a major or minor code.
    Unclassified,
}

impl MajorBucket {
    /// Code to display for this bucket.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Major(code) => code,
            Self::Unclassified => UNCLASSIFIED_LABEL,
        }
    }
}

/// Minor buckets of one major group, keyed by minor code.
pub type MinorBuckets = BTreeMap<String, Vec<Idiom>>;

/// Return the `(major, minor)` bucket an idiom belongs to.
///
/// Unclassified idioms share the single minor key [`UNCLASSIFIED_LABEL`].
#[must_use]
pub fn bucket_of(idiom: &Idiom) -> (MajorBucket, String) {
    match idiom.classification() {
        Some((major, minor)) => (MajorBucket::Major(major.to_owned()), minor.to_owned()),
        None => (MajorBucket::Unclassified, UNCLASSIFIED_LABEL.to_owned()),
    }
}

/// Full browse-order comparison.
///
/// Classified idioms come first, then major code, minor code and finally the
/// idiom text.
#[must_use]
pub fn browse_cmp(left: &Idiom, right: &Idiom) -> Ordering {
    bucket_of(left)
        .cmp(&bucket_of(right))
        .then_with(|| left.idiom.cmp(&right.idiom))
}

/// Re-sort a list in place using [`browse_cmp`].
pub fn sort_for_browse(idioms: &mut [Idiom]) {
    idioms.sort_by(browse_cmp);
}

/// Idioms grouped by major and then minor category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdiomGroups {
    buckets: BTreeMap<MajorBucket, MinorBuckets>,
}

impl IdiomGroups {
    /// Group idioms, keeping fetch order inside each minor bucket.
    pub fn from_idioms<I>(idioms: I) -> Self
    where
        I: IntoIterator<Item = Idiom>,
    {
        let mut buckets: BTreeMap<MajorBucket, MinorBuckets> = BTreeMap::new();
        for idiom in idioms {
            let (major, minor) = bucket_of(&idiom);
            buckets
                .entry(major)
                .or_default()
                .entry(minor)
                .or_default()
                .push(idiom);
        }
        Self { buckets }
    }

    /// Number of idioms across every bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Whether no idioms were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate major groups in browse order.
    pub fn majors(&self) -> impl Iterator<Item = (&MajorBucket, &MinorBuckets)> {
        self.buckets.iter()
    }

    /// Look up a single minor bucket.
    #[must_use]
    pub fn bucket(&self, major: &MajorBucket, minor: &str) -> Option<&[Idiom]> {
        self.buckets
            .get(major)
            .and_then(|minors| minors.get(minor))
            .map(Vec::as_slice)
    }

    /// Iterate idioms in browse order: bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Idiom> {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(|idioms| idioms.iter())
    }

    /// Consume the grouping and return the flattened browse order.
    #[must_use]
    pub fn into_browse_order(self) -> Vec<Idiom> {
        self.buckets
            .into_values()
            .flat_map(BTreeMap::into_values)
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn idiom(name: &str, major: Option<&str>, minor: Option<&str>) -> Idiom {
        let mut idiom = Idiom::new(name);
        idiom.major_type_code = major.map(str::to_owned);
        idiom.minor_type_code = minor.map(str::to_owned);
        idiom
    }

    fn names<'a>(idioms: impl IntoIterator<Item = &'a Idiom>) -> Vec<&'a str> {
        idioms.into_iter().map(|i| i.idiom.as_str()).collect()
    }

    #[fixture]
    fn fetched() -> Vec<Idiom> {
        vec![
            idiom("画蛇添足", None, None),
            idiom("龙马精神", Some("DW"), Some("SUB_MA")),
            idiom("守株待兔", Some("DW"), Some("SUB_TU")),
            idiom("一马当先", Some("DW"), Some("SUB_MA")),
            idiom("百花齐放", Some("ZR"), Some("SUB_HUA")),
            idiom("对牛弹琴", Some("DW"), Some("")),
        ]
    }

    #[rstest]
    fn unclassified_bucket_sorts_last(fetched: Vec<Idiom>) {
        let groups = IdiomGroups::from_idioms(fetched);
        let majors: Vec<_> = groups.majors().map(|(major, _)| major.clone()).collect();
        assert_eq!(
            majors,
            vec![
                MajorBucket::Major("DW".to_owned()),
                MajorBucket::Major("ZR".to_owned()),
                MajorBucket::Unclassified,
            ]
        );
    }

    #[rstest]
    fn minor_buckets_keep_fetch_order(fetched: Vec<Idiom>) {
        let groups = IdiomGroups::from_idioms(fetched);
        let bucket = groups
            .bucket(&MajorBucket::Major("DW".to_owned()), "SUB_MA")
            .expect("bucket exists");
        assert_eq!(names(bucket), vec!["龙马精神", "一马当先"]);
    }

    #[rstest]
    fn partially_classified_idioms_are_unclassified(fetched: Vec<Idiom>) {
        let groups = IdiomGroups::from_idioms(fetched);
        let bucket = groups
            .bucket(&MajorBucket::Unclassified, UNCLASSIFIED_LABEL)
            .expect("unclassified bucket exists");
        assert_eq!(names(bucket), vec!["画蛇添足", "对牛弹琴"]);
    }

    #[rstest]
    fn browse_order_walks_buckets(fetched: Vec<Idiom>) {
        let groups = IdiomGroups::from_idioms(fetched);
        assert_eq!(groups.len(), 6);
        assert_eq!(
            names(groups.iter()),
            vec![
                "龙马精神",
                "一马当先",
                "守株待兔",
                "百花齐放",
                "画蛇添足",
                "对牛弹琴"
            ]
        );
        let flattened = groups.clone().into_browse_order();
        assert_eq!(names(&flattened), names(groups.iter()));
    }

    #[rstest]
    fn full_sort_breaks_ties_by_name(mut fetched: Vec<Idiom>) {
        sort_for_browse(&mut fetched);
        assert_eq!(
            names(&fetched),
            vec![
                "一马当先",
                "龙马精神",
                "守株待兔",
                "百花齐放",
                "对牛弹琴",
                "画蛇添足"
            ]
        );
    }

    #[rstest]
    #[case("啊", "鼎")]
    #[case("zzz", "aaa")]
    fn classified_sorts_before_unclassified_regardless_of_name(
        #[case] classified_name: &str,
        #[case] unclassified_name: &str,
    ) {
        let classified = idiom(classified_name, Some("ZZ"), Some("SUB_ZZ"));
        let loose = idiom(unclassified_name, Some("AA"), None);
        assert_eq!(browse_cmp(&classified, &loose), Ordering::Less);
        assert_eq!(browse_cmp(&loose, &classified), Ordering::Greater);
    }

    #[rstest]
    fn empty_input_yields_empty_groups() {
        let groups = IdiomGroups::from_idioms(Vec::new());
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }
}
