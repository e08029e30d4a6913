//! Common test utilities for cross-crate integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use smart_bdd::smart_messaging::{
    handler::to_document, BucketId, MessageHandler, MessagingError, RecordedMessage, Result,
};
use smart_bdd::Document;
use std::collections::HashMap;
use std::sync::Mutex;

/// Install a test subscriber once
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

/// Synchronous loopback handler: a sent message is recorded before `send_message` returns
#[derive(Debug)]
pub struct SyncLoopbackHandler {
    name: String,
    buckets: Mutex<HashMap<BucketId, Vec<RecordedMessage>>>,
}

impl SyncLoopbackHandler {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            buckets: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MessageHandler for SyncLoopbackHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_message(
        &self,
        content: &str,
        content_type: &str,
        aux_type: Option<&str>,
    ) -> Result<()> {
        let mut buckets = self.buckets.lock().unwrap();
        for messages in buckets.values_mut() {
            messages.push(RecordedMessage::new(content, content_type, aux_type));
        }
        Ok(())
    }

    async fn start_recording(&self, bucket: &BucketId) -> Result<()> {
        self.buckets
            .lock()
            .unwrap()
            .insert(bucket.clone(), Vec::new());
        Ok(())
    }

    async fn snapshot(&self, bucket: &BucketId) -> Result<Document> {
        let buckets = self.buckets.lock().unwrap();
        let messages = buckets.get(bucket).ok_or_else(|| MessagingError::UnknownBucket {
            handler: self.name.clone(),
            bucket: bucket.to_string(),
        })?;
        to_document(messages)
    }
}
