/// Panics in debug builds only, for states that should be impossible but are
/// survivable in release
#[macro_export]
macro_rules! debug_panic {
    ($($arg:tt)+) => {
        if cfg!(debug_assertions) && $crate::const_config::PANIC_ON_RARE_ERR {
            panic!("unexpected state: {}", format!($($arg)+))
        }
    };
}

/// Logs the error with its location and returns the text to show the user
#[macro_export]
macro_rules! internal_error {
    ($err: expr) => {{
        let msg = format!(
            "Unexpected internal error ({}:{}): {}",
            file!(),
            line!(),
            $err
        );
        tracing::error!(%msg);
        msg
    }};
}

/// For failures that can happen in normal operation and only need to be seen
/// in the logs
#[macro_export]
macro_rules! log_err_as_warn {
    ($result: expr) => {
        if let Err(mishap) = $result {
            tracing::warn!(?mishap);
        }
    };
}
