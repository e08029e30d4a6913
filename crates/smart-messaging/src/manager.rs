/*!
* 文件名: manager
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: dashmap, tracing
* 描述: 消息管理器，组合处理器、桶注册表与轮询验证器 / Messaging manager composing handlers, buckets and the verifier
*/

use crate::bucket::{Bucket, BucketId, BucketRegistry};
use crate::config::MessagingConfig;
use crate::error::{MessagingError, Result};
use crate::handler::MessageHandler;
use crate::handlers::MessageHandlerRegistry;
use crate::verifier::{Expectation, PollingVerifier, Verification};
use dashmap::DashMap;
use serde_json::Value;
use smart_core::{
    evaluate_path, Criterion, Document, SizeCheck, ValueMatchOperator, VariableRender,
    VariableStore,
};
use std::sync::Arc;
use tracing::{info, warn};

/// 消息管理器 / Messaging manager
pub struct MessagingManager {
    /// 处理器注册表 / Handler registry
    handlers: Arc<MessageHandlerRegistry>,
    /// 桶注册表（进程内共享）/ Bucket registry, shared process-wide
    buckets: Arc<BucketRegistry>,
    /// 桶到处理器的映射 / Bucket to handler mapping
    owners: DashMap<BucketId, String>,
    /// 轮询验证器 / Polling verifier
    verifier: PollingVerifier,
    /// 变量渲染器 / Variable renderer
    render: VariableRender,
}

impl MessagingManager {
    /// 创建新的管理器 / Create a new manager
    pub fn new(
        handlers: Arc<MessageHandlerRegistry>,
        buckets: Arc<BucketRegistry>,
        config: &MessagingConfig,
    ) -> Self {
        Self {
            handlers,
            buckets,
            owners: DashMap::new(),
            verifier: PollingVerifier::new(config.poll_interval()),
            render: VariableRender::new(),
        }
    }

    /// 根据配置创建 / Build from configuration
    ///
    /// 必须在Tokio运行时内调用。Must run inside a Tokio runtime.
    pub fn from_config(config: &MessagingConfig, buckets: Arc<BucketRegistry>) -> Result<Self> {
        let handlers = Arc::new(MessageHandlerRegistry::from_config(config)?);
        Ok(Self::new(handlers, buckets, config))
    }

    /// 处理器注册表 / Handler registry
    pub fn handlers(&self) -> &MessageHandlerRegistry {
        &self.handlers
    }

    /// 轮询验证器 / Polling verifier
    pub fn verifier(&self) -> &PollingVerifier {
        &self.verifier
    }

    /// 开始录制 / Start recording messages into a bucket bound to `variable`
    pub async fn start_recording<S>(
        &self,
        handler: &str,
        variable: &str,
        variables: &S,
    ) -> Result<Bucket>
    where
        S: VariableStore + ?Sized,
    {
        let handler = self.handlers.get(handler)?;
        let bucket = self
            .buckets
            .start(variable, handler.as_ref(), variables)
            .await?;
        self.owners.insert(bucket.id.clone(), bucket.handler.clone());
        Ok(bucket)
    }

    /// 发送消息，内容中的占位符会先被渲染 / Send a message after rendering placeholders
    pub async fn send_message<S>(
        &self,
        handler: &str,
        content: &str,
        content_type: &str,
        aux_type: Option<&str>,
        variables: &S,
    ) -> Result<()>
    where
        S: VariableStore + ?Sized,
    {
        let handler = self.handlers.get(handler)?;
        let content = self.render.render(content, variables);
        handler
            .send_message(&content, content_type, aux_type)
            .await
    }

    /// 解析变量对应的桶 / Resolve the bucket bound to a variable
    fn resolve<S>(
        &self,
        variable: &str,
        variables: &S,
    ) -> Result<(BucketId, Arc<dyn MessageHandler>)>
    where
        S: VariableStore + ?Sized,
    {
        let id = variables
            .get(variable)
            .map(BucketId)
            .ok_or_else(|| MessagingError::bucket_not_started(variable))?;
        let owner = self
            .owners
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MessagingError::bucket_not_started(variable))?;
        Ok((id, self.handlers.get(&owner)?))
    }

    /// 验证桶的大小 / Verify the size of a bucket
    pub async fn assert_size<S>(
        &self,
        variable: &str,
        operator: ValueMatchOperator,
        expected: i64,
        max_wait_secs: u64,
        variables: &S,
    ) -> Result<Verification>
    where
        S: VariableStore + ?Sized,
    {
        let (bucket, handler) = self.resolve(variable, variables)?;
        let expectation = Expectation::Size(SizeCheck::root(operator, expected)?);
        self.verifier
            .verify(handler.as_ref(), &bucket, max_wait_secs, &expectation)
            .await
    }

    /// 验证桶满足所有条件 / Verify a bucket against every criterion
    ///
    /// 期望值在轮询之前渲染一次。Expected values are rendered once, before polling.
    pub async fn assert_criteria<S>(
        &self,
        variable: &str,
        criteria: Vec<Criterion>,
        max_wait_secs: u64,
        variables: &S,
    ) -> Result<Verification>
    where
        S: VariableStore + ?Sized,
    {
        let (bucket, handler) = self.resolve(variable, variables)?;
        let criteria = criteria
            .into_iter()
            .map(|c| Criterion {
                expected: self.render.render(&c.expected, variables),
                path: self.render.render(&c.path, variables),
                operator: c.operator,
            })
            .collect();
        self.verifier
            .verify(
                handler.as_ref(),
                &bucket,
                max_wait_secs,
                &Expectation::Criteria(criteria),
            )
            .await
    }

    /// 获取桶的当前文档 / Current document of a bucket
    pub async fn bucket_document<S>(&self, variable: &str, variables: &S) -> Result<Document>
    where
        S: VariableStore + ?Sized,
    {
        let (bucket, handler) = self.resolve(variable, variables)?;
        handler.snapshot(&bucket).await
    }

    /// 从桶的当前文档中选取值 / Select a value from the current bucket document
    pub async fn select_from_bucket<S>(
        &self,
        variable: &str,
        path: &str,
        variables: &S,
    ) -> Result<Value>
    where
        S: VariableStore + ?Sized,
    {
        let document = self.bucket_document(variable, variables).await?;
        Ok(evaluate_path(&document, path)?.into_value())
    }

    /// 停止所有录制 / Stop every recording started through this manager
    pub async fn stop_all(&self) -> Result<()> {
        let owned: Vec<(BucketId, String)> = self
            .owners
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        for (bucket, owner) in owned {
            match self.handlers.get(&owner) {
                Ok(handler) => handler.stop_recording(&bucket).await?,
                Err(err) => warn!("Cannot stop bucket {}: {}", bucket, err),
            }
            self.owners.remove(&bucket);
        }
        info!("Stopped all recordings");
        Ok(())
    }
}

impl std::fmt::Debug for MessagingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingManager")
            .field("handlers", &self.handlers)
            .field("buckets", &self.owners.len())
            .field("verifier", &self.verifier)
            .finish()
    }
}
