use crate::archive::{ArchiveLimits, EntryCollector, ExtractedArchive};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;
use ziplift_core::{ZipliftError, ZipliftResult};

/// Extracts ZIP archives fully into memory
pub struct ArchiveExtractor {
    limits: ArchiveLimits,
}

impl ArchiveExtractor {
    /// Create a new ArchiveExtractor
    pub fn new(limits: ArchiveLimits) -> Self {
        Self { limits }
    }

    /// Extract an archive file from disk
    pub fn extract(&self, archive_path: &Path) -> ZipliftResult<ExtractedArchive> {
        let file = File::open(archive_path).map_err(|e| {
            ZipliftError::Validation(format!(
                "Cannot open archive {}: {}",
                archive_path.display(),
                e
            ))
        })?;
        self.extract_reader(file)
    }

    /// Extract an archive already held in memory
    pub fn extract_bytes(&self, bytes: &[u8]) -> ZipliftResult<ExtractedArchive> {
        self.extract_reader(std::io::Cursor::new(bytes))
    }

    fn extract_reader<R: Read + Seek>(&self, reader: R) -> ZipliftResult<ExtractedArchive> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| ZipliftError::Validation(format!("Invalid zip: {}", e)))?;

        let mut collector = EntryCollector::new(self.limits);
        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| ZipliftError::Validation(format!("Invalid zip entry: {}", e)))?;

            if entry.is_dir() {
                collector.admit(&format!("{}/", entry.name().trim_end_matches('/')));
                continue;
            }
            let Some(path) = collector.admit(entry.name()) else {
                debug!(entry = entry.name(), "skipping archive entry");
                continue;
            };

            // Reject on the declared size before inflating anything
            collector.check_next(entry.size())?;

            // Headers can lie about the size; never inflate past the limit
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            let read = entry
                .by_ref()
                .take(self.limits.max_total_bytes.saturating_add(1))
                .read_to_end(&mut bytes);
            read.map_err(|e| {
                ZipliftError::Validation(format!("Failed to read {}: {}", entry.name(), e))
            })?;
            collector.push(path, bytes)?;
        }

        collector.finish()
    }
}
