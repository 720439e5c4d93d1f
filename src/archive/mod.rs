//! ZIP archive extraction into an in-memory file list
//!
//! An archive becomes an ordered list of [`ExtractedFile`]s with sanitized
//! repository paths. Junk entries (directories, `__MACOSX/`, `.DS_Store`) are
//! dropped and the file count and total size are bounded before anything is
//! sent over the network.

pub mod extractor;

pub use extractor::ArchiveExtractor;

use ziplift_core::{sanitize_path, ZipliftError, ZipliftResult};

/// One archive entry ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Sanitized, non-empty, repository-relative path
    pub path: String,
    pub bytes: Vec<u8>,
    pub size: u64,
}

impl ExtractedFile {
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            path: path.into(),
            bytes,
            size,
        }
    }
}

/// Upper bounds enforced while collecting entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLimits {
    pub max_files: usize,
    pub max_total_bytes: u64,
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self {
            max_files: 2000,
            max_total_bytes: 60 * 1024 * 1024,
        }
    }
}

/// Result of extracting one archive
#[derive(Debug, Clone, Default)]
pub struct ExtractedArchive {
    pub files: Vec<ExtractedFile>,
    pub total_bytes: u64,
    /// Entries dropped by the junk filter
    pub skipped: usize,
}

/// Sanitized path for a raw entry name, or `None` if the entry is not uploaded
pub fn admit_entry(raw_path: &str) -> Option<String> {
    if raw_path.ends_with('/') || raw_path.ends_with('\\') {
        return None;
    }
    let clean = sanitize_path(raw_path);
    if clean.is_empty() || clean.ends_with('/') {
        return None;
    }
    if clean.starts_with("__MACOSX/") {
        return None;
    }
    if clean.rsplit('/').next() == Some(".DS_Store") {
        return None;
    }
    Some(clean)
}

/// Accumulates admitted entries while enforcing [`ArchiveLimits`]
#[derive(Debug)]
pub struct EntryCollector {
    limits: ArchiveLimits,
    archive: ExtractedArchive,
}

impl EntryCollector {
    pub fn new(limits: ArchiveLimits) -> Self {
        Self {
            limits,
            archive: ExtractedArchive::default(),
        }
    }

    /// Sanitize `raw_path`, counting it as skipped when it is filtered out
    pub fn admit(&mut self, raw_path: &str) -> Option<String> {
        let admitted = admit_entry(raw_path);
        if admitted.is_none() {
            self.archive.skipped += 1;
        }
        admitted
    }

    /// Fail early if an entry of `size` bytes would break the limits
    pub fn check_next(&self, size: u64) -> ZipliftResult<()> {
        let count = self.archive.files.len() + 1;
        if count > self.limits.max_files {
            return Err(ZipliftError::Validation(format!(
                "Too many files (> {})",
                self.limits.max_files
            )));
        }
        if self.archive.total_bytes.saturating_add(size) > self.limits.max_total_bytes {
            return Err(ZipliftError::Validation(format!(
                "Total extracted size too large (> {})",
                format_bytes(self.limits.max_total_bytes)
            )));
        }
        Ok(())
    }

    /// Add an admitted entry
    pub fn push(&mut self, path: String, bytes: Vec<u8>) -> ZipliftResult<()> {
        let file = ExtractedFile::new(path, bytes);
        self.check_next(file.size)?;
        self.archive.total_bytes += file.size;
        self.archive.files.push(file);
        Ok(())
    }

    /// Finish collecting; an archive with nothing to upload is an error
    pub fn finish(self) -> ZipliftResult<ExtractedArchive> {
        if self.archive.files.is_empty() {
            return Err(ZipliftError::Validation(
                "Archive is empty or has no uploadable files".to_string(),
            ));
        }
        Ok(self.archive)
    }
}

/// Filter and bound an already-decompressed `path -> bytes` listing
pub fn collect_entries<I>(entries: I, limits: ArchiveLimits) -> ZipliftResult<ExtractedArchive>
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    let mut collector = EntryCollector::new(limits);
    for (raw_path, bytes) in entries {
        if let Some(path) = collector.admit(&raw_path) {
            collector.push(path, bytes)?;
        }
    }
    collector.finish()
}

/// Re-check a file list against `limits`, returning the total size
pub fn check_limits(files: &[ExtractedFile], limits: ArchiveLimits) -> ZipliftResult<u64> {
    if files.is_empty() {
        return Err(ZipliftError::Validation(
            "Nothing to upload: no files extracted".to_string(),
        ));
    }
    if files.len() > limits.max_files {
        return Err(ZipliftError::Validation(format!(
            "Too many files ({} > {})",
            files.len(),
            limits.max_files
        )));
    }
    let total: u64 = files.iter().map(|f| f.size).sum();
    if total > limits.max_total_bytes {
        return Err(ZipliftError::Validation(format!(
            "Total extracted size too large ({} > {})",
            format_bytes(total),
            format_bytes(limits.max_total_bytes)
        )));
    }
    Ok(total)
}

/// Human-readable byte count (`B`, `KB`, `MB`, `GB`)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &[(&str, &[u8])]) -> Vec<(String, Vec<u8>)> {
        list.iter()
            .map(|(p, b)| (p.to_string(), b.to_vec()))
            .collect()
    }

    #[test]
    fn test_junk_entries_filtered() {
        let archive = collect_entries(
            entries(&[("src/a.js", b"x"), ("__MACOSX/foo", b"y"), ("dir/", b"")]),
            ArchiveLimits::default(),
        )
        .unwrap();

        assert_eq!(archive.files.len(), 1);
        assert_eq!(archive.files[0].path, "src/a.js");
        assert_eq!(archive.files[0].size, 1);
        assert_eq!(archive.skipped, 2);
    }

    #[test]
    fn test_ds_store_filtered_anywhere() {
        assert_eq!(admit_entry(".DS_Store"), None);
        assert_eq!(admit_entry("docs/.DS_Store"), None);
        assert_eq!(admit_entry("docs/x.DS_Store.txt").as_deref(), Some("docs/x.DS_Store.txt"));
    }

    #[test]
    fn test_paths_sanitized_on_admit() {
        assert_eq!(admit_entry("./a//b.txt").as_deref(), Some("a/b.txt"));
        assert_eq!(admit_entry("../../etc/passwd").as_deref(), Some("etc/passwd"));
        assert_eq!(admit_entry("..").as_deref(), None);
        assert_eq!(admit_entry("sub\\dir\\").as_deref(), None);
    }

    #[test]
    fn test_archive_order_preserved() {
        let archive = collect_entries(
            entries(&[("z.txt", b"1"), ("a.txt", b"2"), ("m/n.txt", b"3")]),
            ArchiveLimits::default(),
        )
        .unwrap();
        let paths: Vec<_> = archive.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["z.txt", "a.txt", "m/n.txt"]);
        assert_eq!(archive.total_bytes, 3);
    }

    #[test]
    fn test_too_many_files() {
        let limits = ArchiveLimits {
            max_files: 2,
            ..Default::default()
        };
        let result = collect_entries(
            entries(&[("a", b"1"), ("b", b"2"), ("c", b"3")]),
            limits,
        );
        match result {
            Err(ZipliftError::Validation(msg)) => assert!(msg.contains("Too many files")),
            other => panic!("expected validation error, got {:?}", other.map(|a| a.files.len())),
        }
    }

    #[test]
    fn test_junk_does_not_count_toward_limit() {
        let limits = ArchiveLimits {
            max_files: 1,
            ..Default::default()
        };
        let archive = collect_entries(
            entries(&[("__MACOSX/a", b"1"), ("b", b"2"), ("c/", b"")]),
            limits,
        )
        .unwrap();
        assert_eq!(archive.files.len(), 1);
    }

    #[test]
    fn test_total_size_limit() {
        let limits = ArchiveLimits {
            max_total_bytes: 4,
            ..Default::default()
        };
        let result = collect_entries(entries(&[("a", b"123"), ("b", b"45")]), limits);
        assert!(matches!(result, Err(ZipliftError::Validation(_))));
    }

    #[test]
    fn test_empty_archive_rejected() {
        let result = collect_entries(
            entries(&[("__MACOSX/x", b"1"), (".DS_Store", b"2")]),
            ArchiveLimits::default(),
        );
        match result {
            Err(ZipliftError::Validation(msg)) => assert!(msg.contains("empty")),
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_check_limits() {
        let files = vec![ExtractedFile::new("a", vec![0; 10])];
        assert_eq!(check_limits(&files, ArchiveLimits::default()).unwrap(), 10);

        let limits = ArchiveLimits {
            max_files: 2000,
            max_total_bytes: 9,
        };
        assert!(check_limits(&files, limits).is_err());
        assert!(check_limits(&[], ArchiveLimits::default()).is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(60 * 1024 * 1024), "60.0 MB");
    }
}
