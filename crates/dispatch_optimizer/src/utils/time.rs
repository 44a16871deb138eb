/// Evaluates `$block` and logs how long it took at debug level.
#[macro_export]
macro_rules! timer_debug {
    ($msg:expr, $block:expr) => {{
        let started_at = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(started_at);

        tracing::debug!("{}: took {:?}", $msg, elapsed);

        result
    }};
}

pub(crate) fn elapsed_since(started_at: jiff::Timestamp) -> jiff::SignedDuration {
    jiff::Timestamp::now().duration_since(started_at)
}
