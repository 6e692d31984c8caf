use std::{
    collections::HashSet,
    fs::OpenOptions,
    io::Write,
    path::Path,
};

use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::FormatItem, macros::format_description,
};

use super::ReviewError;

const LOG_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Read the persisted cursor.
///
/// Returns `None` when the file is missing or does not hold a non-negative
/// integer; callers fall back to the first sample.
pub fn read_progress(path: &Path) -> Option<usize> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!("Failed to read progress {}: {err}", path.display());
            return None;
        }
    };
    match text.trim().parse::<usize>() {
        Ok(index) => Some(index),
        Err(err) => {
            tracing::warn!(
                "Ignoring corrupt progress {} ({:?}): {err}",
                path.display(),
                text.trim()
            );
            None
        }
    }
}

/// Replace the progress file with `cursor` as decimal text.
pub fn write_progress(path: &Path, cursor: usize) -> Result<(), ReviewError> {
    std::fs::write(path, cursor.to_string()).map_err(|source| ReviewError::storage(path, source))
}

/// Format one error-log line, including the trailing newline.
pub fn format_log_line(at: OffsetDateTime, identifier: &str) -> Result<String, ReviewError> {
    let stamp = at.format(LOG_TIME_FORMAT)?;
    Ok(format!("{stamp} {identifier}\n"))
}

/// Append a flag entry for `identifier` stamped with `at`.
pub fn append_error_entry(
    path: &Path,
    identifier: &str,
    at: OffsetDateTime,
) -> Result<(), ReviewError> {
    let line = format_log_line(at, identifier)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ReviewError::storage(path, source))?;
    file.write_all(line.as_bytes())
        .map_err(|source| ReviewError::storage(path, source))
}

/// Collect every identifier recorded in the error log.
///
/// A missing log yields an empty set. Lines without a valid timestamp prefix
/// are skipped.
pub fn read_flagged(path: &Path) -> Result<HashSet<String>, ReviewError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(source) => return Err(ReviewError::storage(path, source)),
    };
    Ok(text.lines().filter_map(parse_log_line).collect())
}

fn parse_log_line(line: &str) -> Option<String> {
    let mut parts = line.splitn(3, ' ');
    let date = parts.next()?;
    let clock = parts.next()?;
    let identifier = parts.next()?.trim_end_matches('\r');
    if identifier.is_empty() {
        return None;
    }
    PrimitiveDateTime::parse(&format!("{date} {clock}"), LOG_TIME_FORMAT).ok()?;
    Some(identifier.to_string())
}

/// Current local time, falling back to UTC when the offset is unknown.
pub(crate) fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_line_uses_second_precision_timestamp() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            format_log_line(fixed, "tile_07.png").unwrap(),
            "2023-11-14 22:13:20 tile_07.png\n"
        );
    }

    #[test]
    fn progress_missing_or_corrupt_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        assert_eq!(read_progress(&path), None);
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(read_progress(&path), None);
        std::fs::write(&path, "-3").unwrap();
        assert_eq!(read_progress(&path), None);
        std::fs::write(&path, " 12\n").unwrap();
        assert_eq!(read_progress(&path), Some(12));
    }

    #[test]
    fn write_progress_replaces_previous_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        write_progress(&path, 40).unwrap();
        write_progress(&path, 5).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "5");
    }

    #[test]
    fn appended_entries_replay_into_flagged_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("error_log.txt");
        let at = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        append_error_entry(&path, "a.png", at).unwrap();
        append_error_entry(&path, "with space.png", at).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"garbage line\n\n2023-11-14 22:13:20 \n").unwrap();

        let flagged = read_flagged(&path).unwrap();
        assert_eq!(flagged.len(), 2);
        assert!(flagged.contains("a.png"));
        assert!(flagged.contains("with space.png"));
    }

    #[test]
    fn missing_log_replays_empty() {
        let dir = tempdir().unwrap();
        assert!(read_flagged(&dir.path().join("error_log.txt")).unwrap().is_empty());
    }
}
