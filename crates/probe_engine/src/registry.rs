use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use agent_logging::agent_debug;
use probe_core::RegistrationId;
use tokio::task::JoinHandle;

use crate::{ProbeWorker, RegistryError, WorkerRegistry};

/// In-process worker registration set.
///
/// `register` spawns the worker's activation onto the runtime; `unregister`
/// removes the registration entry but never cancels a running pass, matching
/// the no-cancellation model. `await_idle` lets the host drain spawned
/// passes before exit.
pub struct InProcessRegistry {
    worker: Arc<ProbeWorker>,
    registrations: Mutex<Vec<RegistrationId>>,
    next_id: AtomicU64,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl InProcessRegistry {
    pub fn new(worker: Arc<ProbeWorker>) -> Self {
        Self {
            worker,
            registrations: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Await every activation spawned so far.
    pub async fn await_idle(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut tasks = self.tasks.lock().expect("registry task lock");
            tasks.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}

#[async_trait::async_trait]
impl WorkerRegistry for InProcessRegistry {
    fn available(&self) -> bool {
        true
    }

    async fn registrations(&self) -> Result<Vec<RegistrationId>, RegistryError> {
        let registrations = self.registrations.lock().expect("registry lock");
        Ok(registrations.clone())
    }

    async fn unregister(&self, id: RegistrationId) -> Result<(), RegistryError> {
        let mut registrations = self.registrations.lock().expect("registry lock");
        let before = registrations.len();
        registrations.retain(|&r| r != id);
        if registrations.len() == before {
            return Err(RegistryError::RegistrationNotFound(id));
        }
        agent_debug!("Unregistered worker registration {}", id);
        Ok(())
    }

    async fn register(&self, script_url: &str) -> Result<(), RegistryError> {
        url::Url::parse(script_url)
            .map_err(|_| RegistryError::InvalidScriptUrl(script_url.to_string()))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.registrations
            .lock()
            .expect("registry lock")
            .push(id);
        agent_debug!("Registered worker {} from {}", id, script_url);

        let worker = self.worker.clone();
        let handle = tokio::spawn(async move {
            worker.activate().await;
        });
        self.tasks.lock().expect("registry task lock").push(handle);
        Ok(())
    }
}
