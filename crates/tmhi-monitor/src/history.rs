use std::collections::VecDeque;
use tmhi_types::Reading;
use tokio::sync::RwLock;

/// 历史容量：每分钟一条，保留 24 小时
pub const HISTORY_CAPACITY: usize = 60 * 24;

/// 有界历史记录
///
/// 单写多读。按插入顺序保存，超过容量时淘汰最旧的一条。
/// 读取总是返回副本，调用方修改不会影响存储。
pub struct HistoryStore {
    entries: RwLock<VecDeque<Reading>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.saturating_add(1))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 追加一条记录，超出容量时淘汰最旧的记录
    pub async fn append(&self, reading: Reading) {
        let mut entries = self.entries.write().await;
        entries.push_back(reading);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// 全量快照，按时间从旧到新
    pub async fn snapshot(&self) -> Vec<Reading> {
        let entries = self.entries.read().await;
        entries.iter().cloned().collect()
    }

    /// 最近 `n` 条记录，按时间从旧到新
    pub async fn recent(&self, n: usize) -> Vec<Reading> {
        let entries = self.entries.read().await;
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use tmhi_types::{FiveGSignal, SignalInfo};

    /// 用 `cid` 作为插入序号
    fn reading(seq: i64) -> Reading {
        let signal = SignalInfo {
            five_g: FiveGSignal {
                cid: seq,
                bars: 3.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Reading::with_time(signal, base + Duration::minutes(seq))
    }

    fn seqs(readings: &[Reading]) -> Vec<i64> {
        readings.iter().map(|r| r.signal.five_g.cid).collect()
    }

    #[tokio::test]
    async fn test_append_never_exceeds_capacity() {
        let store = HistoryStore::new(10);

        for i in 0..35 {
            store.append(reading(i)).await;
            let snapshot = store.snapshot().await;
            assert!(snapshot.len() <= 10);

            let order = seqs(&snapshot);
            let mut sorted = order.clone();
            sorted.sort();
            assert_eq!(order, sorted);
        }

        assert_eq!(store.len().await, 10);
        assert_eq!(seqs(&store.snapshot().await), (25..35).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_eviction_boundary() {
        let store = HistoryStore::default();
        let capacity = store.capacity() as i64;

        for i in 0..=capacity {
            store.append(reading(i)).await;
        }

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), HISTORY_CAPACITY);
        assert_eq!(snapshot.first().unwrap().signal.five_g.cid, 1);
        assert_eq!(snapshot.last().unwrap().signal.five_g.cid, capacity);
        assert_eq!(seqs(&snapshot), (1..=capacity).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_recent_matches_snapshot_tail() {
        let store = HistoryStore::new(8);
        for i in 0..6 {
            store.append(reading(i)).await;
        }

        let snapshot = store.snapshot().await;
        for n in 0..=snapshot.len() {
            let recent = store.recent(n).await;
            assert_eq!(recent, snapshot[snapshot.len() - n..].to_vec());
        }

        // n 大于长度时返回全部
        assert_eq!(store.recent(100).await, snapshot);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let store = HistoryStore::new(4);
        store.append(reading(1)).await;
        store.append(reading(2)).await;

        let first = store.snapshot().await;
        let second = store.snapshot().await;
        assert_eq!(first, second);

        let mut mutated = store.snapshot().await;
        mutated[0].signal.five_g.bars = 0.0;
        mutated.clear();

        assert_eq!(store.snapshot().await, first);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = HistoryStore::new(3);

        assert!(store.is_empty().await);
        assert!(store.snapshot().await.is_empty());
        assert!(store.recent(5).await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_readers_see_consistent_state() {
        let store = Arc::new(HistoryStore::new(50));

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..500 {
                    store.append(reading(i)).await;
                    if i % 50 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    let snapshot = store.snapshot().await;
                    assert!(snapshot.len() <= 50);

                    // 快照内必须连续且有序
                    let order = seqs(&snapshot);
                    for pair in order.windows(2) {
                        assert_eq!(pair[1], pair[0] + 1);
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }

        assert_eq!(seqs(&store.snapshot().await), (450..500).collect::<Vec<_>>());
    }
}
