use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::engine::{EngineSettings, WeatherEngine};

/// One engine per monitored context (event, location, ...).
///
/// Each context gets its own `Mutex`, so a read-compare-write pass on one
/// context never interleaves with another pass on the same context, while
/// separate contexts proceed independently.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    settings: EngineSettings,
    engines: RwLock<HashMap<String, Arc<Mutex<WeatherEngine>>>>,
}

impl ContextRegistry {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            engines: RwLock::new(HashMap::new()),
        }
    }

    /// Engine for `context_id`, created on first use.
    pub fn engine(&self, context_id: &str) -> Arc<Mutex<WeatherEngine>> {
        if let Some(engine) = self
            .engines
            .read()
            .expect("context registry lock poisoned")
            .get(context_id)
        {
            return Arc::clone(engine);
        }

        let mut engines = self
            .engines
            .write()
            .expect("context registry lock poisoned");
        let engine = engines.entry(context_id.to_string()).or_insert_with(|| {
            tracing::info!(context_id, "monitoring new context");
            Arc::new(Mutex::new(WeatherEngine::new(self.settings.clone())))
        });
        Arc::clone(engine)
    }

    pub fn contexts(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .engines
            .read()
            .expect("context registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}
