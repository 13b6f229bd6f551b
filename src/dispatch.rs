//! Bounded concurrent fan-out over the host list.
//!
//! One task per host, gated by a semaphore so at most `ceiling` sessions are
//! in flight at once. Outcomes are collected by a single loop in completion
//! order; that loop is the one serialization point between the workers and
//! the batch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use log::info;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};

use crate::worker::HostOutcome;

/// Default ceiling on concurrently active sessions.
pub const DEFAULT_CEILING: usize = 32;

/// Run `job` once per host with at most `ceiling` jobs in flight, and return
/// exactly one outcome per host in completion order.
///
/// A job that panics still yields a failure outcome for its host, so the
/// result length always equals the host list length. No host is retried.
pub async fn dispatch<F, Fut>(hosts: Vec<String>, ceiling: usize, job: F) -> Vec<HostOutcome>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = HostOutcome> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(ceiling.max(1)));
    let mut tasks = JoinSet::new();
    let mut owners: HashMap<Id, String> = HashMap::with_capacity(hosts.len());

    for host in hosts {
        let semaphore = Arc::clone(&semaphore);
        let fut = job(host.clone());
        let handle = tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("dispatch semaphore is never closed");
            fut.await
        });
        owners.insert(handle.id(), host);
    }

    let mut outcomes = Vec::with_capacity(owners.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        let outcome = match joined {
            Ok((id, outcome)) => {
                owners.remove(&id);
                outcome
            }
            Err(err) => {
                let host = owners
                    .remove(&err.id())
                    .unwrap_or_else(|| "<unknown host>".to_owned());
                HostOutcome::failure(host, format!("worker aborted: {err}"))
            }
        };
        info!("{outcome}");
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn hosts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("10.0.0.{i}")).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn one_outcome_per_host() {
        let outcomes = dispatch(hosts(5), 2, |host| async move {
            HostOutcome::success(host, Vec::new())
        })
        .await;

        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(HostOutcome::is_success));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_host_list_yields_no_outcomes() {
        let outcomes = dispatch(Vec::new(), 4, |host| async move {
            HostOutcome::success(host, Vec::new())
        })
        .await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrency_never_exceeds_ceiling() {
        const CEILING: usize = 3;
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let outcomes = dispatch(hosts(10), CEILING, {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            move |host| {
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    HostOutcome::success(host, Vec::new())
                }
            }
        })
        .await;

        assert_eq!(outcomes.len(), 10);
        assert!(peak.load(Ordering::SeqCst) <= CEILING);
        assert!(peak.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn outcomes_arrive_in_completion_order() {
        let outcomes = dispatch(
            vec!["slow".to_owned(), "fast".to_owned()],
            2,
            |host| async move {
                let delay = if host == "slow" { 500 } else { 10 };
                tokio::time::sleep(Duration::from_millis(delay)).await;
                HostOutcome::success(host, Vec::new())
            },
        )
        .await;

        let order: Vec<&str> = outcomes.iter().map(|o| o.host.as_str()).collect();
        assert_eq!(order, vec!["fast", "slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_does_not_disturb_others() {
        let outcomes = dispatch(hosts(3), 2, |host| async move {
            if host.ends_with(".1") {
                HostOutcome::failure(host, "connection refused")
            } else {
                HostOutcome::success(host, Vec::new())
            }
        })
        .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 2);
        let failed = outcomes.iter().find(|o| !o.is_success()).unwrap();
        assert_eq!(failed.host, "10.0.0.1");
    }

    #[tokio::test(start_paused = true)]
    async fn panicked_job_becomes_failure_outcome() {
        let outcomes = dispatch(hosts(2), 2, |host| async move {
            if host.ends_with(".0") {
                panic!("boom");
            }
            HostOutcome::success(host, Vec::new())
        })
        .await;

        assert_eq!(outcomes.len(), 2);
        let failed = outcomes.iter().find(|o| !o.is_success()).unwrap();
        assert_eq!(failed.host, "10.0.0.0");
        assert!(matches!(
            &failed.outcome,
            crate::worker::Outcome::Failure { cause } if !cause.is_empty()
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ceiling_is_clamped() {
        let outcomes = dispatch(hosts(2), 0, |host| async move {
            HostOutcome::success(host, Vec::new())
        })
        .await;
        assert_eq!(outcomes.len(), 2);
    }
}
