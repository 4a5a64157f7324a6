use time;

#[macro_use]
pub mod macros;
pub mod logger;

/// Milliseconds since the unix epoch
pub fn now_millis() -> i64 {
    let now = time::get_time();
    (now.sec * 1000) + i64::from(now.nsec / 1_000_000)
}

/// The current UTC time as an ISO-8601 string
pub fn now_iso() -> String {
    format!("{}", time::now_utc().rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn iso_timestamps() {
        let stamp = now_iso();
        assert_eq!(stamp.len(), 20);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], "T");
        assert!(stamp.ends_with("Z"));
    }

    #[test]
    fn millis_move_forward() {
        let first = now_millis();
        thread::sleep(Duration::from_millis(2));
        assert!(now_millis() > first);
    }
}
