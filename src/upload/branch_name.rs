use chrono::NaiveDate;
use regex::Regex;
use ziplift_core::{ZipliftError, ZipliftResult};

/// `upload-YYYY-MM-DD`
pub fn default_branch_name(date: NaiveDate) -> String {
    format!("upload-{}", date.format("%Y-%m-%d"))
}

/// Replace every character outside `[A-Za-z0-9._-/]` with `-`
pub fn clean_branch_name(name: &str) -> ZipliftResult<String> {
    let re = Regex::new(r"[^a-zA-Z0-9._\-/]")
        .map_err(|e| ZipliftError::Config(format!("Invalid regex: {}", e)))?;
    Ok(re.replace_all(name, "-").into_owned())
}

/// Branch name for a new-branch upload: the requested one, or a date stamp
pub fn resolve_branch_name(requested: Option<&str>, today: NaiveDate) -> ZipliftResult<String> {
    match requested.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => clean_branch_name(name),
        None => Ok(default_branch_name(today)),
    }
}
