/*!
* 文件名: verifier
* 作者: JQQ
* 创建日期: 2026/10/19
* 最后修改日期: 2026/10/19
* 版权: 2023 JQQ. All rights reserved.
* 依赖: tokio, tracing
* 描述: 消息桶轮询验证器 / Polling verifier for message buckets
*/

use crate::bucket::BucketId;
use crate::error::{MessagingError, Result};
use crate::handler::MessageHandler;
use smart_core::{
    evaluate_all, CoreError, CoreResult, Criterion, Document, Outcome, PollPlan, SizeCheck,
    DEFAULT_POLL_INTERVAL_SECS,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// 验证期望 / Verification expectation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// 数量检查 / Size check
    Size(SizeCheck),
    /// 全部条件必须通过 / Every criterion must pass
    Criteria(Vec<Criterion>),
}

impl Expectation {
    /// 轮询前的校验 / Validation before any attempt
    fn validate(&self) -> CoreResult<()> {
        match self {
            Expectation::Size(check) if !check.operator.is_numeric_comparison() => Err(
                CoreError::unsupported_operator(check.operator.symbol()),
            ),
            Expectation::Criteria(criteria) if criteria.is_empty() => {
                warn!("Empty criteria list passes without checking anything");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// 在单个快照上求值 / Evaluate against one snapshot
    pub fn evaluate(&self, document: &Document) -> CoreResult<Outcome> {
        match self {
            Expectation::Size(check) => check.evaluate(document),
            Expectation::Criteria(criteria) => evaluate_all(document, criteria),
        }
    }
}

/// 验证成功报告 / Successful verification report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// 成功时的尝试次数 / Attempt on which the expectation held
    pub attempts: u32,
}

/// 轮询验证器 / Polling verifier
#[derive(Debug, Clone, Copy)]
pub struct PollingVerifier {
    interval: Duration,
}

impl PollingVerifier {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// 计算轮询计划 / Compute the polling plan
    pub fn plan(&self, max_wait_secs: u64) -> PollPlan {
        PollPlan::with_interval(max_wait_secs, self.interval)
    }

    /// 轮询验证桶 / Poll a bucket until the expectation holds or attempts run out
    ///
    /// 每次尝试都使用新的快照，所有条件都在同一快照上求值。
    /// 快照失败立即返回；最后一次尝试的求值错误原样返回。
    pub async fn verify(
        &self,
        handler: &dyn MessageHandler,
        bucket: &BucketId,
        max_wait_secs: u64,
        expectation: &Expectation,
    ) -> Result<Verification> {
        expectation.validate()?;
        let plan = self.plan(max_wait_secs);
        let mut last_reason = String::new();

        for attempt in 1..=plan.attempts() {
            let document = handler.snapshot(bucket).await?;
            match expectation.evaluate(&document) {
                Ok(Outcome::Passed) => {
                    info!("Bucket {} verified on attempt {}", bucket, attempt);
                    return Ok(Verification { attempts: attempt });
                }
                Ok(Outcome::Failed { reason }) => {
                    debug!(
                        "Bucket {} attempt {}/{} failed: {}",
                        bucket,
                        attempt,
                        plan.attempts(),
                        reason
                    );
                    last_reason = reason;
                }
                Err(err) if plan.is_last(attempt) => return Err(err.into()),
                Err(err) => {
                    warn!(
                        "Bucket {} attempt {}/{} errored: {}",
                        bucket,
                        attempt,
                        plan.attempts(),
                        err
                    );
                    last_reason = err.to_string();
                }
            }

            if !plan.is_last(attempt) {
                tokio::time::sleep(plan.interval()).await;
            }
        }

        Err(MessagingError::VerificationTimeout {
            bucket: bucket.to_string(),
            attempts: plan.attempts(),
            reason: last_reason,
        })
    }
}

impl Default for PollingVerifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS))
    }
}
