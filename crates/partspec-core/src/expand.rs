//! Range expansion: specification string to partition paths
//!
//! A specification is a comma-separated list of clauses, each
//! `territory[:from[:to]]`. Expansion cross-products the selected
//! territories, the inclusive day range, and the sub-file-types, then
//! deduplicates by full path string. Clause failures are logged and
//! skipped; no clause aborts the expansion.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::date::{resolve_on, Role};
use crate::layout::PathLayout;

/// Expand a specification into the deduplicated, sorted set of partition
/// paths, resolving `C<n>` offset tokens against the local calendar date.
///
/// Returns `None` when `sub_file_types` is empty or no clause produced a
/// path. Callers treat the result as a set; the sort is for determinism.
pub fn expand_partition_paths(
    catalog: &[String],
    spec: &str,
    sub_file_types: &[String],
    layout: &PathLayout,
) -> Option<Vec<String>> {
    expand_partition_paths_on(catalog, spec, sub_file_types, layout, Local::now().date_naive())
}

/// Expand against an explicit `today` for offset tokens.
pub fn expand_partition_paths_on(
    catalog: &[String],
    spec: &str,
    sub_file_types: &[String],
    layout: &PathLayout,
    today: NaiveDate,
) -> Option<Vec<String>> {
    if sub_file_types.is_empty() {
        return None;
    }

    // Dedup by full path string: distinct clauses can land on the same
    // territory/date and must contribute a single path.
    let mut paths: BTreeMap<String, u32> = BTreeMap::new();

    for clause in spec.split(',') {
        let parts: Vec<&str> = clause.split(':').collect();

        let from = parts
            .get(1)
            .and_then(|token| resolve_on(token, Role::Start, today));
        let to = match parts.len() {
            2 => resolve_on(parts[1], Role::End, today),
            3 => resolve_on(parts[2], Role::End, today),
            _ => None,
        };

        let (Some(from), Some(to)) = (from, to) else {
            warn!(clause, "ignoring clause with invalid from/to date");
            continue;
        };

        if from > to {
            info!(clause, %from, %to, "ignoring clause with from date after to date");
            continue;
        }

        let territories: Vec<&str> = if parts[0] == "*" {
            catalog.iter().map(String::as_str).collect()
        } else {
            vec![parts[0]]
        };

        for territory in territories {
            let mut date = from;
            while date <= to {
                for sub_file_type in sub_file_types {
                    let path = layout.partition_path(sub_file_type, territory, date);
                    *paths.entry(path).or_insert(0) += 1;
                }
                match date.succ_opt() {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
    }

    if paths.is_empty() {
        None
    } else {
        Some(paths.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PathLayout {
        PathLayout::new("warehouse", "final", "landed")
    }

    fn catalog() -> Vec<String> {
        vec!["T1".to_string(), "T2".to_string()]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 15).unwrap()
    }

    fn subs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wildcard_cross_product() {
        let paths = expand_partition_paths_on(
            &catalog(),
            "*:2021-01-01:2021-01-02",
            &subs(&["sales"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(
            paths,
            vec![
                "warehouse/final/landed/sales/T1/20210101",
                "warehouse/final/landed/sales/T1/20210102",
                "warehouse/final/landed/sales/T2/20210101",
                "warehouse/final/landed/sales/T2/20210102",
            ]
        );
    }

    #[test]
    fn test_single_day_multiple_sub_file_types() {
        let paths = expand_partition_paths_on(
            &catalog(),
            "T1:2021-01-01",
            &subs(&["a", "b"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(
            paths,
            vec![
                "warehouse/final/landed/a/T1/20210101",
                "warehouse/final/landed/b/T1/20210101",
            ]
        );
    }

    #[test]
    fn test_empty_sub_file_types_is_absent() {
        assert_eq!(
            expand_partition_paths_on(&catalog(), "*:2021-01-01", &[], &layout(), today()),
            None
        );
    }

    #[test]
    fn test_reversed_range_is_skipped() {
        assert_eq!(
            expand_partition_paths_on(
                &catalog(),
                "T1:2021-01-05:2021-01-01",
                &subs(&["sales"]),
                &layout(),
                today(),
            ),
            None
        );
    }

    #[test]
    fn test_invalid_clause_does_not_abort_others() {
        let paths = expand_partition_paths_on(
            &catalog(),
            "T1:2021-02-30,T2:2021-01-01,T1",
            &subs(&["sales"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(paths, vec!["warehouse/final/landed/sales/T2/20210101"]);
    }

    #[test]
    fn test_duplicate_clauses_deduplicate() {
        let paths = expand_partition_paths_on(
            &catalog(),
            "T1:2021-01-01:2021-01-02,T1:2021-01-02",
            &subs(&["sales"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(
            paths,
            vec![
                "warehouse/final/landed/sales/T1/20210101",
                "warehouse/final/landed/sales/T1/20210102",
            ]
        );
    }

    #[test]
    fn test_literal_territory_outside_catalog() {
        // Literal codes are taken as-is; the catalog only backs `*`.
        let paths = expand_partition_paths_on(
            &catalog(),
            "T9:2021-01-01",
            &subs(&["sales"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(paths, vec!["warehouse/final/landed/sales/T9/20210101"]);
    }

    #[test]
    fn test_whole_month_clause() {
        // A bare year-month spans the full month: start day 1, end day 28.
        let paths = expand_partition_paths_on(
            &catalog(),
            "T1:2021-02",
            &subs(&["sales"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(paths.len(), 28);
        assert_eq!(paths.first().unwrap(), "warehouse/final/landed/sales/T1/20210201");
        assert_eq!(paths.last().unwrap(), "warehouse/final/landed/sales/T1/20210228");
    }

    #[test]
    fn test_offset_range() {
        let paths = expand_partition_paths_on(
            &catalog(),
            "T1:C2:C0",
            &subs(&["sales"]),
            &layout(),
            today(),
        )
        .unwrap();

        assert_eq!(
            paths,
            vec![
                "warehouse/final/landed/sales/T1/20210613",
                "warehouse/final/landed/sales/T1/20210614",
                "warehouse/final/landed/sales/T1/20210615",
            ]
        );
    }

    #[test]
    fn test_clause_without_dates_is_skipped() {
        assert_eq!(
            expand_partition_paths_on(&catalog(), "T1", &subs(&["sales"]), &layout(), today()),
            None
        );
        assert_eq!(
            expand_partition_paths_on(&catalog(), "", &subs(&["sales"]), &layout(), today()),
            None
        );
    }

    #[test]
    fn test_extra_clause_parts_invalidate_range_end() {
        assert_eq!(
            expand_partition_paths_on(
                &catalog(),
                "T1:2021-01-01:2021-01-02:extra",
                &subs(&["sales"]),
                &layout(),
                today(),
            ),
            None
        );
    }
}
