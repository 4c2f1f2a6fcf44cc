#[cfg(test)]
mod tests {
    use tessel_macros::test_traced;
    use tracing::{debug, error, info, trace, warn};

    #[test_traced("INFO")]
    fn test_info_level() {
        info!("This is an info log");
        debug!("This is a debug log (won't be shown)");
        assert_eq!(2 + 2, 4);
    }

    #[test_traced]
    fn test_default_level() {
        debug!("This is a debug log");
        trace!("This is a trace log (won't be shown)");
        assert_eq!(3 * 3, 9);
    }

    #[test_traced("warn")]
    fn test_lowercase_level() {
        warn!(slots = 4, "This is a warn log");
        assert_eq!(10 - 4, 6);
    }

    #[test_traced("ERROR")]
    fn test_error_level() {
        error!("This is an error log");
        assert_eq!(5 * 2, 10);
    }

    #[test_traced("TRACE")]
    #[should_panic(expected = "boom")]
    fn test_panic_propagates() {
        trace!("about to panic");
        panic!("boom");
    }
}
