/// Errors a session store can report.
///
/// A missing key is NOT an error; it is `Ok(None)`. Every variant here
/// means the store failed to give an answer at all.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached, or the connection dropped mid-call.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// The store client gave up waiting for a reply.
    #[error("store request timed out")]
    Timeout,

    /// The store answered with an error of its own.
    #[error("store backend error: {0}")]
    Backend(String),
}
