//! Backup file naming
//!
//! Backups are named `florisboard_settings_<YYYY>-<MM>-<DD>_<HH>-<mm>-<ss>.json`
//! after the local time they were taken, so names sort chronologically.

use chrono::NaiveDateTime;

use crate::environment::Clock;

pub const BACKUP_FILE_PREFIX: &str = "florisboard_settings_";
pub const BACKUP_FILE_SUFFIX: &str = ".json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File name for a backup taken at the clock's current local time
pub fn generate_backup_file_name(clock: &dyn Clock) -> String {
    format_backup_file_name(clock.now_local())
}

/// File name for a backup taken at `at`
pub fn format_backup_file_name(at: NaiveDateTime) -> String {
    format!(
        "{}{}{}",
        BACKUP_FILE_PREFIX,
        at.format(TIMESTAMP_FORMAT),
        BACKUP_FILE_SUFFIX
    )
}

/// Recover the timestamp from a generated backup file name
pub fn parse_backup_file_name(name: &str) -> Option<NaiveDateTime> {
    let stamp = name
        .strip_prefix(BACKUP_FILE_PREFIX)?
        .strip_suffix(BACKUP_FILE_SUFFIX)?;

    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::FixedClock;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_generate_with_fixed_clock() {
        let clock = FixedClock(at(3, 4, 5));
        assert_eq!(
            generate_backup_file_name(&clock),
            "florisboard_settings_2024-01-02_03-04-05.json"
        );
    }

    #[test]
    fn test_same_second_same_name() {
        let clock = FixedClock(at(23, 59, 59));
        assert_eq!(
            generate_backup_file_name(&clock),
            generate_backup_file_name(&clock)
        );
    }

    #[test]
    fn test_ignores_subsecond_precision() {
        let with_millis = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 999)
            .unwrap();
        assert_eq!(
            format_backup_file_name(with_millis),
            format_backup_file_name(at(3, 4, 5))
        );
    }

    #[test]
    fn test_parse_generated_name() {
        let name = format_backup_file_name(at(13, 14, 15));
        assert_eq!(parse_backup_file_name(&name), Some(at(13, 14, 15)));
    }

    #[test]
    fn test_parse_rejects_foreign_names() {
        assert!(parse_backup_file_name("backup-20240102-030405.json").is_none());
        assert!(parse_backup_file_name("florisboard_settings_garbage.json").is_none());
        assert!(parse_backup_file_name("florisboard_settings_2024-01-02_03-04-05.yaml").is_none());
    }
}
