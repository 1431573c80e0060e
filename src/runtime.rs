//! Runtime abstraction layer for async operations
//!
//! Searches are resolved on whatever executor the host runs. Tokio is used by
//! default; other executors plug in through [`init_runtime`].

use crate::{
    prelude::{Future, Pin},
    Error, Result,
};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Result<Box<dyn AsyncHandle>>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Spawn a future on the global runtime
pub fn spawn<F>(future: F) -> Result<Box<dyn AsyncHandle>>
where
    F: Future<Output = ()> + Send + 'static,
{
    match runtime() {
        Some(spawner) => spawner.spawn_boxed(Box::pin(future)),
        None => Err(Error::Runtime(
            "no async runtime available; enable 'tokio-runtime' or call init_runtime".to_string(),
        )),
    }
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::{runtime::Handle, task::JoinHandle};

        /// Tokio-based async spawner. Spawns onto the runtime of the calling
        /// thread.
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Result<Box<dyn AsyncHandle>> {
                let handle = Handle::try_current()
                    .map_err(|e| Error::Runtime(format!("not inside a tokio runtime: {}", e)))?;
                Ok(Box::new(TokioHandle(handle.spawn(future))))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner. Only the first call wins.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) -> bool {
    RUNTIME.set(spawner).is_ok()
}

/// Get the global runtime spawner
pub fn runtime() -> Option<&'static dyn AsyncSpawner> {
    #[cfg(feature = "tokio-runtime")]
    {
        Some(
            RUNTIME
                .get_or_init(|| Box::new(spawners::tokio_impl::TokioSpawner))
                .as_ref(),
        )
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        RUNTIME.get().map(|spawner| spawner.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test]
    async fn test_tokio_spawner() {
        let handle = spawn(async {
            ::tokio::time::sleep(::tokio::time::Duration::from_millis(10)).await;
        })
        .unwrap();

        // Should not be finished immediately
        assert!(!handle.is_finished());

        // Wait a bit and check again
        ::tokio::time::sleep(::tokio::time::Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }

    #[cfg(feature = "tokio-runtime")]
    #[test]
    fn test_spawn_outside_runtime_fails() {
        assert!(matches!(spawn(async {}), Err(Error::Runtime(_))));
    }
}
