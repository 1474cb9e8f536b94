use crate::core::mutations::Mutation;
use crate::core::queries::Query;
use crate::core::query_key::QueryKey;
use crate::domain::ports::CampaignApi;
use crate::utils::error::{ClientError, Result};
use dashmap::DashMap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OnceCell, RwLock};

type CachedValue = Arc<dyn Any + Send + Sync>;

struct CacheEntry {
    data: CachedValue,
    updated_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn is_stale(&self, stale_time: Duration) -> bool {
        self.invalidated || self.updated_at.elapsed() >= stale_time
    }
}

/// 同一個 key 正在進行中的請求；結果（含錯誤）由所有等待者共用
#[derive(Default)]
struct InFlight {
    result: OnceCell<std::result::Result<CachedValue, Arc<ClientError>>>,
    invalidated: AtomicBool,
}

/// 查詢結果來源
#[derive(Debug)]
pub enum QueryOutcome<T> {
    /// 查詢被停用，沒有發出請求
    Disabled,
    /// 直接取自快取
    Cached(Arc<T>),
    /// 剛從後端取得並寫入快取
    Fetched(Arc<T>),
}

impl<T> QueryOutcome<T> {
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            QueryOutcome::Disabled => None,
            QueryOutcome::Cached(data) | QueryOutcome::Fetched(data) => Some(data),
        }
    }

    pub fn into_data(self) -> Option<Arc<T>> {
        match self {
            QueryOutcome::Disabled => None,
            QueryOutcome::Cached(data) | QueryOutcome::Fetched(data) => Some(data),
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, QueryOutcome::Cached(_))
    }
}

/// Keyed cache for query results.
///
/// Fresh entries are served without a request. Concurrent fetches of the
/// same key join one in-flight request and all receive its result, success
/// or error. An invalidation that lands while a request is in flight marks
/// the value it stores as stale.
pub struct QueryClient {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
    in_flight: DashMap<QueryKey, Arc<InFlight>>,
    stale_time: Duration,
}

impl QueryClient {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            in_flight: DashMap::new(),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    pub async fn fetch_query<Q: Query>(
        &self,
        api: &dyn CampaignApi,
        query: &Q,
    ) -> Result<QueryOutcome<Q::Output>> {
        let key = query.key();
        if !query.enabled() {
            tracing::debug!("🗂️ Query {} is disabled, skipping", key);
            return Ok(QueryOutcome::Disabled);
        }

        if let Some(data) = self.fresh(&key).await {
            tracing::debug!("🗂️ Cache hit for {}", key);
            return downcast(&key, data).map(QueryOutcome::Cached);
        }

        let flight = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(InFlight::default()))
            .clone();

        let fetched = AtomicBool::new(false);
        let result = {
            let (key, fetched, flight) = (&key, &fetched, &flight);
            flight
                .result
                .get_or_init(|| async move {
                    // 前一個請求可能剛寫入快取
                    if let Some(data) = self.fresh(key).await {
                        return Ok(data);
                    }

                    tracing::debug!("🗂️ Cache miss for {}, fetching", key);
                    fetched.store(true, Ordering::SeqCst);
                    match query.fetch(api).await {
                        Ok(data) => {
                            let data: CachedValue = Arc::new(data);
                            self.store(key.clone(), data.clone(), Some(&**flight)).await;
                            Ok(data)
                        }
                        Err(e) => {
                            tracing::warn!("🗂️ Query {} failed: {}", key, e);
                            Err(Arc::new(e))
                        }
                    }
                })
                .await
                .clone()
        };

        self.in_flight
            .remove_if(&key, |_, current| Arc::ptr_eq(current, &flight));
        // 釋放共用結果，最後一個持有者才能取回原始錯誤
        drop(flight);

        match result {
            Ok(data) => {
                let data = downcast(&key, data)?;
                if fetched.load(Ordering::SeqCst) {
                    Ok(QueryOutcome::Fetched(data))
                } else {
                    tracing::debug!("🗂️ Joined in-flight result for {}", key);
                    Ok(QueryOutcome::Cached(data))
                }
            }
            Err(e) => Err(ClientError::from_shared(e)),
        }
    }

    /// 執行變更；成功後讓相關查詢失效，失敗時快取不變
    pub async fn mutate<M: Mutation>(
        &self,
        api: &dyn CampaignApi,
        mutation: &M,
        input: M::Input,
    ) -> Result<M::Output> {
        let output = mutation.mutate(api, input).await?;

        for prefix in mutation.invalidates() {
            self.invalidate_queries(&prefix).await;
        }

        Ok(output)
    }

    /// 將所有以 prefix 開頭的查詢標為過期（包含進行中的請求），回傳受影響的快取筆數
    pub async fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        for flight in self.in_flight.iter() {
            if flight.key().starts_with(prefix) {
                flight.value().invalidated.store(true, Ordering::SeqCst);
            }
        }
        tracing::debug!("🗂️ Invalidated {} queries under {}", count, prefix);
        count
    }

    pub async fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// 讀取快取值，不論是否過期
    pub async fn get_query_data<T: Send + Sync + 'static>(
        &self,
        key: &QueryKey,
    ) -> Result<Option<Arc<T>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => downcast(key, entry.data.clone()).map(Some),
            None => Ok(None),
        }
    }

    pub async fn set_query_data<T: Send + Sync + 'static>(&self, key: QueryKey, data: T) {
        self.store(key, Arc::new(data), None).await;
    }

    pub async fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.is_stale(self.stale_time))
    }

    async fn fresh(&self, key: &QueryKey) -> Option<CachedValue> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_stale(self.stale_time))
            .map(|entry| entry.data.clone())
    }

    /// 在寫鎖內讀取進行中請求的失效旗標，與 invalidate_queries 互斥
    async fn store(&self, key: QueryKey, data: CachedValue, flight: Option<&InFlight>) {
        let mut entries = self.entries.write().await;
        let invalidated = flight.is_some_and(|f| f.invalidated.load(Ordering::SeqCst));
        entries.insert(
            key,
            CacheEntry {
                data,
                updated_at: Instant::now(),
                invalidated,
            },
        );
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, data: CachedValue) -> Result<Arc<T>> {
    data.downcast::<T>().map_err(|_| ClientError::CacheError {
        message: format!(
            "cached value for {} is not a {}",
            key,
            std::any::type_name::<T>()
        ),
    })
}
