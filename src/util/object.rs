use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;

// 1. length: 6-63;
// 2. lowercase letters, digits and hyphen;
// 3. starts and ends with letter or digit.
static BUCKET_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z\d][a-z\d-]{4,61}[a-z\d]$").expect("bucket name regex must compile")
});

pub fn is_bucket_name_valid(s: &str) -> bool {
    BUCKET_NAME_REGEX.is_match(s)
}

/// Work dir must start with exactly one "/" and end with exactly one "/".
pub fn is_work_dir_valid(wd: &str) -> bool {
    wd.starts_with('/') && wd.ends_with('/') && !wd.starts_with("//") && !wd.ends_with("//")
}

/// 0 is the service's "unknown" sentinel and maps to the zero time (`None`).
pub fn convert_unix_timestamp_to_time(v: i64) -> Option<OffsetDateTime> {
    if v == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(v).ok()
}
