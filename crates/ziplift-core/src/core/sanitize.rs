//! Archive path sanitizing.
//!
//! Archive entry names are attacker-controlled. Before one is used as a
//! repository path it goes through [`sanitize_path`], which never fails: the
//! worst case is an empty string, which callers treat as "skip this entry".

/// Normalize an archive-relative path into a safe repository-relative path.
///
/// Backslashes become `/`, null bytes are dropped, a leading `./` or `../` is
/// stripped, runs of `/` collapse and a leading `/` is removed. Finally every
/// `../` and a trailing `..` is cut out wherever it appears. The pass repeats
/// until the output stops changing, so the result is a fixed point:
/// `sanitize_path(&sanitize_path(p)) == sanitize_path(p)`.
pub fn sanitize_path(raw: &str) -> String {
    let mut current = sanitize_once(raw);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(raw: &str) -> String {
    let mut s: String = raw
        .chars()
        .filter(|&c| c != '\0')
        .map(|c| if c == '\\' { '/' } else { c })
        .collect();

    // Leading "./", "../" (or any run of dots followed by a slash), once
    let dots = s.bytes().take_while(|&b| b == b'.').count();
    if dots > 0 && s.as_bytes().get(dots) == Some(&b'/') {
        s.drain(..=dots);
    }

    let mut collapsed = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }

    let mut out = collapsed
        .strip_prefix('/')
        .unwrap_or(&collapsed)
        .replace("../", "");
    if out.ends_with("..") {
        out.truncate(out.len() - 2);
    }
    out
}
