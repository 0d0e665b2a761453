//! Relay worker
//!
//! Drains the relay queue and runs one dispatch per notice, at most
//! `max_jobs` at a time. Exits once every queue sender is dropped and the
//! in-flight dispatches have finished.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::Instrument;

use fleetban_core::BanCreatedNotice;

use crate::dispatcher::NotificationDispatcher;

pub struct RelayWorker {
    receiver: mpsc::Receiver<BanCreatedNotice>,
    dispatcher: Arc<NotificationDispatcher>,
    jobs: Arc<Semaphore>,
    max_jobs: u32,
}

impl RelayWorker {
    pub fn new(
        receiver: mpsc::Receiver<BanCreatedNotice>,
        dispatcher: Arc<NotificationDispatcher>,
        max_jobs: usize,
    ) -> Self {
        let max_jobs = u32::try_from(max_jobs.max(1)).unwrap_or(u32::MAX);
        Self {
            receiver,
            dispatcher,
            jobs: Arc::new(Semaphore::new(max_jobs as usize)),
            max_jobs,
        }
    }

    /// Run the worker on its own task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        tracing::info!(max_jobs = self.max_jobs, "Relay worker started");

        while let Some(notice) = self.receiver.recv().await {
            let Ok(permit) = Arc::clone(&self.jobs).acquire_owned().await else {
                break;
            };

            let dispatcher = Arc::clone(&self.dispatcher);
            let span = tracing::info_span!("relay_dispatch", ban_id = %notice.ban_id);
            tokio::spawn(
                async move {
                    let report = dispatcher.dispatch(&notice).await;
                    report.log();
                    drop(permit);
                }
                .instrument(span),
            );
        }

        // Wait for in-flight dispatches
        let _ = self.jobs.acquire_many(self.max_jobs).await;
        tracing::info!("Relay worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;

    use fleetban_core::{
        Ban, BanTerms, BotChannel, BotExport, FleetEvent, FleetRelay, Identity, Node,
        NodeRepository, RelayResult, RepoResult, Snowflake,
    };

    use super::*;
    use crate::policy::DeliveryPolicy;
    use crate::queue::RelayQueue;

    #[derive(Default)]
    struct SlowBot {
        running: AtomicUsize,
        peak: AtomicUsize,
        exported: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BotChannel for SlowBot {
        async fn export(&self, payload: &BotExport) -> RelayResult {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.running.fetch_sub(1, Ordering::SeqCst);

            let BotExport::Ban(export) = payload;
            self.exported.lock().push(export.key2.clone());
            Ok(())
        }
    }

    struct NoFleet;

    #[async_trait]
    impl FleetRelay for NoFleet {
        async fn send_to_node(&self, _node_id: Snowflake, _event: &FleetEvent) -> RelayResult {
            Ok(())
        }
    }

    #[async_trait]
    impl NodeRepository for NoFleet {
        async fn find_by_id(&self, _id: Snowflake) -> RepoResult<Option<Node>> {
            Ok(None)
        }

        async fn list_active(&self) -> RepoResult<Vec<Node>> {
            Ok(Vec::new())
        }
    }

    fn notice(id: i64) -> BanCreatedNotice {
        let ban = Ban::new(
            Snowflake::new(id),
            Snowflake::new(1),
            BanTerms {
                target_node_id: None,
                reason: "spam".to_string(),
                duration: 0,
                expires_at: None,
                requires_appeal: false,
            },
            Utc::now(),
        );
        let handle = format!("player{id}");
        BanCreatedNotice::new(
            &ban,
            Identity::new(Some(handle.as_str()), None, None).unwrap(),
            "admin",
        )
    }

    fn worker(bot: Arc<SlowBot>, receiver: mpsc::Receiver<BanCreatedNotice>, jobs: usize) -> RelayWorker {
        let dispatcher = NotificationDispatcher::new(
            bot,
            Arc::new(NoFleet),
            Arc::new(NoFleet),
            DeliveryPolicy::default(),
        );
        RelayWorker::new(receiver, Arc::new(dispatcher), jobs)
    }

    #[tokio::test]
    async fn test_worker_drains_queue_before_exit() {
        let bot = Arc::new(SlowBot::default());
        let (queue, rx) = RelayQueue::bounded(16);
        let handle = worker(bot.clone(), rx, 4).spawn();

        for id in 1..=6 {
            assert!(queue.enqueue(notice(id)));
        }
        drop(queue);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not stop")
            .unwrap();

        assert_eq!(bot.exported.lock().len(), 6);
    }

    #[tokio::test]
    async fn test_worker_bounds_concurrency() {
        let bot = Arc::new(SlowBot::default());
        let (queue, rx) = RelayQueue::bounded(16);
        let handle = worker(bot.clone(), rx, 2).spawn();

        for id in 1..=8 {
            queue.enqueue(notice(id));
        }
        drop(queue);
        handle.await.unwrap();

        assert!(bot.peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(bot.exported.lock().len(), 8);
    }
}
