//! Global async runtime management.
//!
//! Courier performs its network transfers on a shared tokio runtime so that
//! blocking callers and fire-and-forget callers use the same worker pool.
//! The runtime is created lazily on first use; applications that want to
//! initialize it eagerly (e.g. during startup) can call [`init`].

use std::sync::OnceLock;

use tokio::runtime::Runtime;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Initialize the async runtime.
///
/// Typically called early in the application. If not called explicitly, a
/// runtime is created on first use.
pub fn init() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("courier-async")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Get a reference to the async runtime, initializing it if needed.
pub fn get() -> &'static Runtime {
    init()
}

/// Block the current thread on a future using the global runtime.
///
/// # Warning
///
/// Do not call this from within an async context: blocking a runtime worker
/// on the runtime itself deadlocks. The blocking API in `courier-http` is
/// built on this and inherits the same restriction.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    get().block_on(future)
}

/// Spawn a future on the global runtime.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    get().spawn(future)
}
