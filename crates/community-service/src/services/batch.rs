//! Per-member batch processing
//!
//! Members are independent, so they are processed with bounded concurrency.
//! A failure is recorded against its member and never stops the batch.

use std::future::Future;

use community_core::MemberId;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A member whose processing failed
#[derive(Debug)]
pub struct MemberFailure {
    pub member_id: MemberId,
    pub error: ServiceError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub failures: Vec<MemberFailure>,
}

impl BatchReport {
    /// True when every member succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run `task` for every member. Only failing to list members is an error.
pub(crate) async fn for_each_member<F, Fut>(
    ctx: &ServiceContext,
    operation: &'static str,
    task: F,
) -> ServiceResult<BatchReport>
where
    F: Fn(MemberId) -> Fut,
    Fut: Future<Output = ServiceResult<()>>,
{
    let member_ids = ctx.member_repo().list_ids().await?;
    info!(operation, members = member_ids.len(), "Batch started");

    let results: Vec<(MemberId, ServiceResult<()>)> = stream::iter(member_ids)
        .map(|member_id| {
            let fut = task(member_id);
            async move { (member_id, fut.await) }
        })
        .buffer_unordered(ctx.batch_concurrency())
        .collect()
        .await;

    let mut report = BatchReport::default();
    for (member_id, result) in results {
        report.processed += 1;
        match result {
            Ok(()) => report.succeeded += 1,
            Err(error) => {
                warn!(
                    operation,
                    member_id = %member_id,
                    code = error.error_code(),
                    error = %error,
                    "Batch item failed"
                );
                report.failures.push(MemberFailure { member_id, error });
            }
        }
    }

    info!(
        operation,
        processed = report.processed,
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "Batch finished"
    );
    Ok(report)
}
