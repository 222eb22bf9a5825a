use crate::core::{Driver, LapTiming, Race, SessionKey};
use crate::domain::ports::MotorsportDataProvider;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Schedule(i32),
    Drivers(SessionKey),
    /// Driver codes are stored upper-cased.
    Laps(SessionKey, String),
}

impl CacheKey {
    fn year(&self) -> i32 {
        match self {
            Self::Schedule(year) => *year,
            Self::Drivers(session) | Self::Laps(session, _) => session.year,
        }
    }
}

#[derive(Debug, Clone)]
enum CachedValue {
    Schedule(Vec<Race>),
    Drivers(Vec<Driver>),
    Laps(Vec<LapTiming>),
}

struct Entry {
    value: CachedValue,
    stored_at: Instant,
}

type Slot = Arc<tokio::sync::Mutex<Option<Entry>>>;

/// Keyed read-through store with a fixed time-to-live.
///
/// Every key owns its own async lock, so concurrent misses on one key reach
/// the loader once while other keys proceed independently. The index lock is
/// only held to look up or insert a slot, never across an await.
pub struct SessionCache {
    ttl: Duration,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up the slot for `key`, creating it on first use. Creating a slot
    /// also sweeps out expired and empty slots nobody else is holding.
    fn slot(&self, key: &CacheKey) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = slots.get(key) {
            return slot.clone();
        }

        let ttl = self.ttl;
        slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(entry) => entry
                    .as_ref()
                    .is_some_and(|cached| cached.stored_at.elapsed() < ttl),
                Err(_) => true,
            }
        });

        slots.entry(key.clone()).or_default().clone()
    }

    /// Removes the slot of a failed load unless another caller is waiting on it.
    fn forget(&self, key: &CacheKey, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let unused = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(current) <= 2);
        if unused {
            slots.remove(key);
        }
    }

    async fn get_or_load<F, Fut>(&self, key: CacheKey, load: F) -> Result<CachedValue>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedValue>>,
    {
        let slot = self.slot(&key);
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.stored_at.elapsed() < self.ttl {
                tracing::debug!(?key, "Cache hit");
                return Ok(cached.value.clone());
            }
        }

        tracing::debug!(?key, "Cache miss");
        match load().await {
            Ok(value) => {
                *entry = Some(Entry {
                    value: value.clone(),
                    stored_at: Instant::now(),
                });
                Ok(value)
            }
            Err(e) => {
                // 失敗的結果不寫入快取
                *entry = None;
                drop(entry);
                self.forget(&key, &slot);
                Err(e)
            }
        }
    }

    /// Drops every entry belonging to `year`. Returns how many keys were removed.
    pub fn invalidate_season(&self, year: i32) -> usize {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let before = slots.len();
        slots.retain(|key, _| key.year() != year);
        let removed = before - slots.len();
        tracing::info!(year, removed, "Invalidated cached season");
        removed
    }

    pub fn clear(&self) {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Number of tracked keys. Expired keys count until the next sweep.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wraps any provider with a [`SessionCache`].
pub struct CachedProvider<P: MotorsportDataProvider> {
    inner: P,
    cache: SessionCache,
}

impl<P: MotorsportDataProvider> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            cache: SessionCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

fn unexpected(key: &CacheKey) -> GatewayError {
    GatewayError::internal(format!("cache slot {:?} holds a value of another kind", key))
}

#[async_trait]
impl<P: MotorsportDataProvider> MotorsportDataProvider for CachedProvider<P> {
    async fn event_schedule(&self, year: i32) -> Result<Vec<Race>> {
        let key = CacheKey::Schedule(year);
        let value = self
            .cache
            .get_or_load(key.clone(), || async {
                self.inner.event_schedule(year).await.map(CachedValue::Schedule)
            })
            .await?;

        match value {
            CachedValue::Schedule(races) => Ok(races),
            _ => Err(unexpected(&key)),
        }
    }

    async fn session_drivers(&self, session: SessionKey) -> Result<Vec<Driver>> {
        let key = CacheKey::Drivers(session);
        let value = self
            .cache
            .get_or_load(key.clone(), || async {
                self.inner.session_drivers(session).await.map(CachedValue::Drivers)
            })
            .await?;

        match value {
            CachedValue::Drivers(drivers) => Ok(drivers),
            _ => Err(unexpected(&key)),
        }
    }

    async fn driver_laps(&self, session: SessionKey, code: &str) -> Result<Vec<LapTiming>> {
        let key = CacheKey::Laps(session, code.to_ascii_uppercase());
        let value = self
            .cache
            .get_or_load(key.clone(), || async {
                self.inner.driver_laps(session, code).await.map(CachedValue::Laps)
            })
            .await?;

        match value {
            CachedValue::Laps(laps) => Ok(laps),
            _ => Err(unexpected(&key)),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
