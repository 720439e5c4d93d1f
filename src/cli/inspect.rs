use std::path::Path;
use ziplift::archive::{format_bytes, ArchiveExtractor};
use ziplift::core::ZipliftResult;

/// List what an upload of `archive` would push, without touching GitHub
pub fn run(config_path: Option<&Path>, archive: &Path) -> ZipliftResult<()> {
    let config = super::load_config(config_path)?;
    let extracted = ArchiveExtractor::new(config.archive_limits()).extract(archive)?;

    for file in &extracted.files {
        println!("{:>10}  {}", format_bytes(file.size), file.path);
    }
    println!();
    println!(
        "{} files, {} total ({} skipped)",
        extracted.files.len(),
        format_bytes(extracted.total_bytes),
        extracted.skipped
    );
    Ok(())
}
