//! Local filenames for saved bodies (`bfetch fetch --output-dir`).

use url::Url;

const DEFAULT_FILENAME: &str = "download.bin";
const NAME_MAX: usize = 255;

/// Replaces `/`, `\`, NUL, whitespace and control characters with `_`,
/// collapses repeats, trims dots and underscores, and caps the length.
fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let bad = c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if bad || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }
    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

/// `<seq>-<last path segment>`; `seq` is the completion index, which keeps
/// names unique when several URLs end in the same segment.
pub(super) fn output_filename(seq: usize, url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segs| segs.next_back())
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    format!("{:04}-{}", seq, last)
}
