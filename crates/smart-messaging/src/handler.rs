/*!
* 文件名: handler
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: async-trait, serde, chrono, uuid
* 描述: 消息处理器trait与录制消息模型 / Message handler trait and recorded message model
*/

use crate::bucket::BucketId;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smart_core::Document;

/// 录制的消息 / Recorded message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMessage {
    /// 消息ID / Message id
    pub id: String,
    /// 消息内容 / Payload
    pub message: Value,
    /// 内容类型 / Content type
    pub content_type: String,
    /// 辅助类型 / Auxiliary type
    pub aux_type: Option<String>,
    /// 接收时间 / Receive time
    pub received_at: DateTime<Utc>,
}

impl RecordedMessage {
    /// 创建新的录制消息 / Create a recorded message
    ///
    /// JSON内容类型的消息会被解析为结构化值。
    /// Payloads with a JSON content type are parsed into structured values.
    pub fn new(content: &str, content_type: &str, aux_type: Option<&str>) -> Self {
        let message = if content_type.to_ascii_lowercase().contains("json") {
            serde_json::from_str(content).unwrap_or_else(|_| Value::String(content.to_string()))
        } else {
            Value::String(content.to_string())
        };

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            message,
            content_type: content_type.to_string(),
            aux_type: aux_type.map(str::to_string),
            received_at: Utc::now(),
        }
    }
}

/// 将消息列表转为文档 / Turn recorded messages into a document
pub fn to_document(messages: &[RecordedMessage]) -> Result<Document> {
    Ok(serde_json::to_value(messages)?)
}

/// 消息处理器trait / Message handler trait
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// 处理器名称 / Handler name
    fn name(&self) -> &str;

    /// 发送消息 / Send a message
    async fn send_message(
        &self,
        content: &str,
        content_type: &str,
        aux_type: Option<&str>,
    ) -> Result<()>;

    /// 开始录制，对同一个桶幂等 / Start recording, idempotent per bucket
    async fn start_recording(&self, bucket: &BucketId) -> Result<()>;

    /// 获取桶的当前快照 / Current snapshot of a bucket
    async fn snapshot(&self, bucket: &BucketId) -> Result<Document>;

    /// 停止录制 / Stop recording
    async fn stop_recording(&self, bucket: &BucketId) -> Result<()> {
        tracing::debug!("Handler {} keeps bucket {} until teardown", self.name(), bucket);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_payload_is_parsed() {
        let message = RecordedMessage::new(r#"{"orderId": 7}"#, "application/json", None);
        assert_eq!(message.message, json!({"orderId": 7}));
    }

    #[test]
    fn test_invalid_json_payload_stays_text() {
        let message = RecordedMessage::new("{oops", "application/json", Some("ORDER"));
        assert_eq!(message.message, json!("{oops"));
        assert_eq!(message.aux_type.as_deref(), Some("ORDER"));
    }

    #[test]
    fn test_document_shape() {
        let messages = vec![RecordedMessage::new("Hello World!!", "text/plain", None)];
        let doc = to_document(&messages).unwrap();
        assert_eq!(doc[0]["message"], json!("Hello World!!"));
        assert_eq!(doc[0]["contentType"], json!("text/plain"));
        assert_eq!(doc[0]["auxType"], Value::Null);
        assert!(doc[0]["receivedAt"].is_string());
    }
}
