//! Partition directory layout
//!
//! All partition paths share the shape
//! `{root}/{final_sub_dir}/{file_sub_dir}/{sub_file_type}/{territory}/{YYYYMMDD}`.
//! The layout is an explicit value threaded through every call; there is no
//! process-wide storage root.

use chrono::NaiveDate;

/// The fixed directory levels above the per-partition components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    pub root: String,
    pub final_sub_dir: String,
    pub file_sub_dir: String,
}

impl PathLayout {
    pub fn new(
        root: impl Into<String>,
        final_sub_dir: impl Into<String>,
        file_sub_dir: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            final_sub_dir: final_sub_dir.into(),
            file_sub_dir: file_sub_dir.into(),
        }
    }

    /// Full path of one partition directory. The date renders compact.
    pub fn partition_path(&self, sub_file_type: &str, territory: &str, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            self.root,
            self.final_sub_dir,
            self.file_sub_dir,
            sub_file_type,
            territory,
            date.format("%Y%m%d")
        )
    }

    /// Directory whose immediate children are the known territory codes.
    ///
    /// By convention this is the first sub-file-type's directory; every
    /// territory that has ever landed data appears under it.
    pub fn catalog_path(&self, sub_file_type: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.root, self.final_sub_dir, self.file_sub_dir, sub_file_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_path_shape() {
        let layout = PathLayout::new("warehouse", "final", "landed");
        let date = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        assert_eq!(
            layout.partition_path("sales", "US", date),
            "warehouse/final/landed/sales/US/20210105"
        );
    }

    #[test]
    fn test_catalog_path_is_partition_parent() {
        let layout = PathLayout::new("warehouse", "final", "landed");
        let date = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
        let partition = layout.partition_path("sales", "US", date);
        assert!(partition.starts_with(&format!("{}/", layout.catalog_path("sales"))));
    }
}
