use std::fmt::Debug;

// Usable on any Result whose error can be printed, notably eyre and the metadata errors.
pub trait ForwardRefToTracing<T, E> {
    fn trace_err(self) -> Result<T, E>;
    fn trace_err_ok(self) -> Option<T>;
    /// Same as `trace_err_ok`, for failures that are expected and only worth a warning
    /// (a broken upload, a user with DMs closed).
    fn trace_warn_ok(self) -> Option<T>;
}

impl<T, E> ForwardRefToTracing<T, E> for Result<T, E>
where
    E: Debug,
{
    fn trace_err(self) -> Result<T, E> {
        self.map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })
    }

    fn trace_err_ok(self) -> Option<T> {
        self.trace_err().ok()
    }

    fn trace_warn_ok(self) -> Option<T> {
        self.map_err(|e| tracing::warn!("{:?}", e)).ok()
    }
}
