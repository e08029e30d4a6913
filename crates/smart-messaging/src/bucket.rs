/*!
* 文件名: bucket
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: serde
* 描述: 消息桶与桶注册表 / Message buckets and the bucket registry
*/

use crate::error::Result;
use crate::handler::MessageHandler;
use serde::{Deserialize, Serialize};
use smart_core::VariableStore;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// 桶ID分隔符 / Bucket id separator
pub const BUCKET_ID_SEPARATOR: &str = "-#-";

/// 桶ID / Bucket id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketId(pub String);

impl BucketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 变量名前缀 / Variable name prefix
    pub fn variable(&self) -> &str {
        self.0
            .rsplit_once(BUCKET_ID_SEPARATOR)
            .map(|(prefix, _)| prefix)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BucketId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 录制会话 / Recording session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// 桶ID / Bucket id
    pub id: BucketId,
    /// 场景变量名 / Scenario variable name
    pub variable: String,
    /// 所属处理器 / Owning handler
    pub handler: String,
}

/// 桶注册表 / Bucket registry
///
/// 序列号在整个进程内共享，由注入的单个实例持有。
#[derive(Debug)]
pub struct BucketRegistry {
    sequence: AtomicU64,
}

impl BucketRegistry {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }

    /// 下一个序列号 / Next sequence number
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 生成桶ID / Generate a bucket id
    pub fn generate_bucket_id(&self, variable: &str) -> BucketId {
        BucketId(format!(
            "{}{}{}",
            variable,
            BUCKET_ID_SEPARATOR,
            self.next_sequence()
        ))
    }

    /// 开始录制 / Start recording into a fresh bucket
    ///
    /// 生成ID、通知处理器开始录制，并将 `variable -> id` 写入变量存储。
    pub async fn start<S>(
        &self,
        variable: &str,
        handler: &dyn MessageHandler,
        variables: &S,
    ) -> Result<Bucket>
    where
        S: VariableStore + ?Sized,
    {
        let id = self.generate_bucket_id(variable);
        handler.start_recording(&id).await?;
        variables.set(variable, id.to_string());
        info!(
            "Started recording bucket {} on handler {}",
            id,
            handler.name()
        );
        Ok(Bucket {
            id,
            variable: variable.to_string(),
            handler: handler.name().to_string(),
        })
    }
}

impl Default for BucketRegistry {
    fn default() -> Self {
        Self::new()
    }
}
