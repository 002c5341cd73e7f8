/// Similar to `info!` macro in tracing.
/// You can pass in the starting time and it will log how long it took from starting time to now
/// as a `runtime_secs` field.
/// ```
/// use chrono::Local;
/// use station_scrap::info_time;
///
/// info_time!("str {}, {}", 1, 2);
/// let time = Local::now();
/// info_time!(time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        ::tracing::info!($strfm $(, $arg)*);
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let run_time = $crate::elapsed_secs($time);
        ::tracing::info!(runtime_secs = run_time, $strfm $(, $arg)*);
    }};
}
