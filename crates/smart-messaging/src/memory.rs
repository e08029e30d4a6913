/*!
* 文件名: memory
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: tokio, dashmap, async-trait
* 描述: 内存回环消息处理器 / In-memory loopback message handler
*/

use crate::bucket::BucketId;
use crate::error::{MessagingError, Result};
use crate::handler::{to_document, MessageHandler, RecordedMessage};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use smart_core::Document;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

type BucketStore = Arc<DashMap<BucketId, Vec<RecordedMessage>>>;

/// 待投递消息及其发送时刻 / Pending message with its send instant
type Pending = (Instant, RecordedMessage);

/// 内存回环消息处理器 / In-memory loopback message handler
///
/// 发送的消息进入通道，由独立的投递任务（可选延迟后）追加到所有正在录制的桶中。
/// Sent messages go through a channel; an independent delivery task appends
/// them, after an optional delay, to every bucket that is recording.
///
/// 必须在Tokio运行时内创建。Must be created inside a Tokio runtime.
pub struct InMemoryMessageHandler {
    name: String,
    buckets: BucketStore,
    sender: RwLock<Option<mpsc::UnboundedSender<Pending>>>,
    delivery: JoinHandle<()>,
}

impl InMemoryMessageHandler {
    /// 创建无延迟的处理器 / Create a handler that delivers immediately
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_delivery_delay(name, Duration::ZERO)
    }

    /// 创建带投递延迟的处理器 / Create a handler with a delivery delay
    pub fn with_delivery_delay(name: impl Into<String>, delay: Duration) -> Self {
        let name = name.into();
        let buckets: BucketStore = Arc::new(DashMap::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let delivery = tokio::spawn(deliver(name.clone(), rx, Arc::clone(&buckets), delay));

        Self {
            name,
            buckets,
            sender: RwLock::new(Some(tx)),
            delivery,
        }
    }

    /// 模拟被测系统发来的消息，立即录制 / Record inbound traffic immediately
    pub fn inject(&self, content: &str, content_type: &str, aux_type: Option<&str>) {
        record(
            &self.buckets,
            RecordedMessage::new(content, content_type, aux_type),
        );
    }

    /// 关闭传输，之后的发送都会失败 / Close the transport; later sends fail
    pub async fn close(&self) {
        if self.sender.write().await.take().is_some() {
            info!("Closed in-memory transport {}", self.name);
        }
    }

    /// 正在录制的桶数量 / Number of recording buckets
    pub fn recording_buckets(&self) -> usize {
        self.buckets.len()
    }
}

impl Drop for InMemoryMessageHandler {
    fn drop(&mut self) {
        self.delivery.abort();
    }
}

impl std::fmt::Debug for InMemoryMessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMessageHandler")
            .field("name", &self.name)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

#[async_trait]
impl MessageHandler for InMemoryMessageHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_message(
        &self,
        content: &str,
        content_type: &str,
        aux_type: Option<&str>,
    ) -> Result<()> {
        let sender = self.sender.read().await;
        let sender = sender
            .as_ref()
            .ok_or_else(|| MessagingError::delivery(&self.name, "transport is closed"))?;
        let message = RecordedMessage::new(content, content_type, aux_type);
        sender
            .send((Instant::now(), message))
            .map_err(|_| MessagingError::delivery(&self.name, "delivery task has stopped"))?;
        debug!("Handler {} accepted {} message", self.name, content_type);
        Ok(())
    }

    async fn start_recording(&self, bucket: &BucketId) -> Result<()> {
        self.buckets.entry(bucket.clone()).or_default();
        Ok(())
    }

    async fn snapshot(&self, bucket: &BucketId) -> Result<Document> {
        // 在分片读锁内整体克隆 / clone the whole bucket under its shard lock
        let messages = self
            .buckets
            .get(bucket)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MessagingError::UnknownBucket {
                handler: self.name.clone(),
                bucket: bucket.to_string(),
            })?;
        to_document(&messages)
    }

    async fn stop_recording(&self, bucket: &BucketId) -> Result<()> {
        if self.buckets.remove(bucket).is_some() {
            debug!("Handler {} stopped recording bucket {}", self.name, bucket);
        }
        Ok(())
    }
}

async fn deliver(
    name: String,
    mut rx: mpsc::UnboundedReceiver<Pending>,
    buckets: BucketStore,
    delay: Duration,
) {
    // 每条消息在各自发送时刻之后延迟投递，延迟不累加
    while let Some((sent_at, message)) = rx.recv().await {
        if !delay.is_zero() {
            tokio::time::sleep_until(sent_at + delay).await;
        }
        record(&buckets, message);
    }
    debug!("Delivery task for {} finished", name);
}

/// 追加到所有录制中的桶，接收时间取投递时刻 / Append to every recording bucket, stamped on arrival
fn record(buckets: &DashMap<BucketId, Vec<RecordedMessage>>, mut message: RecordedMessage) {
    message.received_at = Utc::now();
    for mut entry in buckets.iter_mut() {
        entry.value_mut().push(message.clone());
    }
}
