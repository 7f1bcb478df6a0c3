//! Lazily loaded, process-wide model instances.
//!
//! Each handle loads its model at most once. Concurrent first callers block
//! on the single in-flight load instead of starting their own. A failed load
//! is remembered and never retried for the life of the handle.

use crate::generation::TextGenerator;
use crate::panic_message;
use anyhow::Result;
use prose_types::ModelState;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Builds a generator. Called at most once per handle.
pub type ModelLoader = Box<dyn Fn() -> Result<Arc<dyn TextGenerator>> + Send + Sync>;

pub struct ModelHandle {
    name: String,
    loader: ModelLoader,
    /// `Some(None)` records a failed load.
    slot: OnceLock<Option<Arc<dyn TextGenerator>>>,
    loading: AtomicBool,
}

impl ModelHandle {
    pub fn new(name: impl Into<String>, loader: ModelLoader) -> Self {
        Self {
            name: name.into(),
            loader,
            slot: OnceLock::new(),
            loading: AtomicBool::new(false),
        }
    }

    /// Handle wrapping an already constructed generator.
    pub fn ready(name: impl Into<String>, generator: Arc<dyn TextGenerator>) -> Self {
        let handle = Self::new(name, Box::new(|| -> Result<Arc<dyn TextGenerator>> {
            anyhow::bail!("model already loaded")
        }));
        let _ = handle.slot.set(Some(generator));
        handle
    }

    /// Handle whose model is known to be unavailable.
    pub fn unavailable(name: impl Into<String>) -> Self {
        let handle = Self::new(name, Box::new(|| -> Result<Arc<dyn TextGenerator>> {
            anyhow::bail!("model unavailable")
        }));
        let _ = handle.slot.set(None);
        handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the model, loading it on first use.
    ///
    /// Returns `None` if the model failed to load, now or earlier.
    pub fn get(&self) -> Option<Arc<dyn TextGenerator>> {
        self.slot.get_or_init(|| self.load()).clone()
    }

    pub fn state(&self) -> ModelState {
        match self.slot.get() {
            Some(Some(_)) => ModelState::Ready,
            Some(None) => ModelState::Failed,
            None if self.loading.load(Ordering::Acquire) => ModelState::Loading,
            None => ModelState::Uninitialized,
        }
    }

    fn load(&self) -> Option<Arc<dyn TextGenerator>> {
        let _loading = LoadingFlag::raise(&self.loading);
        info!("Loading {} model...", self.name);

        match panic::catch_unwind(AssertUnwindSafe(|| (self.loader)())) {
            Ok(Ok(generator)) => {
                info!("✓ {} model loaded", self.name);
                Some(generator)
            }
            Ok(Err(e)) => {
                warn!("{} model failed to load: {:#}", self.name, e);
                None
            }
            Err(payload) => {
                warn!(
                    "{} model loader panicked: {}",
                    self.name,
                    panic_message(payload.as_ref())
                );
                None
            }
        }
    }
}

/// Holds `loading` high until dropped.
struct LoadingFlag<'a>(&'a AtomicBool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}
