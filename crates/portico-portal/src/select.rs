//! Race-based host selection
//!
//! Fan-out/first-success: every candidate's invocation is spawned as an
//! independently cancellable task feeding a single completion channel.
//! The first successful value consumed wins; sibling tasks are aborted
//! and any result that still arrives is discarded. Losers are never
//! exposed to the caller.
//!
//! The selector is quality-blind: first success by completion order, not
//! by host identity. Callers needing a sticky host must cache the winner
//! themselves. Because losing invocations may still have executed on the
//! remote side, only idempotent reads should be raced.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, instrument};

use portico_directory::HostRecord;

use crate::error::{GatewayError, HostFailure, SelectError};

/// Selector configuration
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Default per-candidate deadline in milliseconds.
    pub call_timeout_ms: u64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 10_000,
        }
    }
}

/// Race `call` across every candidate, returning the first success.
///
/// Each candidate gets its own independent `timeout`; the race as a
/// whole therefore never outlives the slowest raced candidate. If every
/// candidate fails or times out, the aggregate verdict is
/// [`SelectError::AllHostsUnreachable`], produced only once all
/// candidates have concluded. A non-liveness failure (permission denial,
/// remote execution error) is logged at debug level and changes the
/// verdict only when its host was the sole candidate.
#[instrument(skip_all, fields(candidates = candidates.len(), timeout_ms = timeout.as_millis() as u64))]
pub async fn select_and_call<T, F, Fut>(
    candidates: Vec<HostRecord>,
    timeout: Duration,
    call: F,
) -> Result<T, SelectError>
where
    T: Send + 'static,
    F: Fn(HostRecord) -> Fut,
    Fut: Future<Output = Result<T, GatewayError>> + Send + 'static,
{
    let count = candidates.len();
    if count == 0 {
        return Err(SelectError::AllHostsUnreachable {
            count: 0,
            failures: Vec::new(),
        });
    }

    let timeout_ms = timeout.as_millis() as u64;
    let (tx, mut rx) = mpsc::channel(count);
    let mut handles = Vec::with_capacity(count);

    for record in candidates {
        let peer = record.peer;
        let fut = call(record);
        let tx = tx.clone();
        handles.push(tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, fut).await {
                Err(_) => Err(GatewayError::Timeout(timeout_ms)),
                Ok(result) => result,
            };
            // The receiver is gone once a winner was consumed; a loser's
            // late result is dropped here without side effects.
            let _ = tx.send((peer, outcome)).await;
        }));
    }
    drop(tx);

    let mut failures = Vec::with_capacity(count);
    let mut sole_error = None;

    while let Some((peer, outcome)) = rx.recv().await {
        match outcome {
            Ok(value) => {
                debug!(winner = %peer.short_id(), "Race won");
                for handle in &handles {
                    handle.abort();
                }
                return Ok(value);
            }
            Err(err) => {
                let liveness = err.is_liveness_failure();
                if !liveness {
                    debug!(peer = %peer.short_id(), error = %err, "Candidate failed for a non-liveness reason");
                }
                failures.push(HostFailure {
                    peer,
                    error: err.to_string(),
                    liveness,
                });
                if count == 1 && !liveness {
                    sole_error = Some(err);
                }
            }
        }
    }

    // A permission or execution problem from the only candidate is more
    // useful to the caller than an unreachability verdict.
    if let Some(err) = sole_error {
        return Err(SelectError::Call(err));
    }

    Err(SelectError::AllHostsUnreachable { count, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Instant;

    use portico_core::{InstanceId, PeerId};
    use portico_directory::CapabilityGrant;

    fn record() -> HostRecord {
        HostRecord {
            peer: PeerId::random(),
            instance: InstanceId::new([0u8; 32]),
            grant: CapabilityGrant::Unrestricted,
            registered_at: 0,
            updated_at: 0,
            metadata: BTreeMap::new(),
        }
    }

    fn records(n: usize) -> Vec<HostRecord> {
        (0..n).map(|_| record()).collect()
    }

    #[tokio::test]
    async fn test_empty_candidates_is_all_unreachable() {
        let result: Result<u32, _> = select_and_call(
            Vec::new(),
            Duration::from_millis(100),
            |_| async { Ok(1) },
        )
        .await;

        assert!(matches!(
            result,
            Err(SelectError::AllHostsUnreachable { count: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_single_success() {
        let result = select_and_call(records(1), Duration::from_millis(100), |host| async move {
            Ok(host.peer)
        })
        .await
        .unwrap();

        // The winner is whichever candidate was raced.
        let _ = result;
    }

    #[tokio::test]
    async fn test_fast_success_beats_slow_success() {
        let candidates = records(2);
        let fast = candidates[1].peer;

        let winner = select_and_call(
            candidates.clone(),
            Duration::from_millis(1_000),
            move |host| {
                let slow = candidates[0].peer;
                async move {
                    if host.peer == slow {
                        tokio::time::sleep(Duration::from_millis(200)).await;
                    } else {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                    Ok(host.peer)
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(winner, fast);
    }

    #[tokio::test]
    async fn test_success_wins_despite_other_failures() {
        let candidates = records(3);
        let healthy = candidates[2].peer;

        let winner = select_and_call(candidates, Duration::from_millis(500), move |host| {
            async move {
                if host.peer == healthy {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(host.peer)
                } else {
                    Err(GatewayError::Offline("down".into()))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(winner, healthy);
    }

    #[tokio::test]
    async fn test_slow_candidate_is_timed_out_not_awaited() {
        // One candidate answers in 50ms, the other would take 5s with a
        // 1s per-candidate timeout. The 50ms answer must win and the
        // call must return well before the slow candidate would finish.
        let candidates = records(2);
        let fast = candidates[0].peer;

        let start = Instant::now();
        let winner = select_and_call(candidates, Duration::from_millis(1_000), move |host| {
            async move {
                if host.peer == fast {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                } else {
                    tokio::time::sleep(Duration::from_millis(5_000)).await;
                }
                Ok(host.peer)
            }
        })
        .await
        .unwrap();

        assert_eq!(winner, fast);
        assert!(start.elapsed() < Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn test_all_fail_aggregates_after_every_candidate_concludes() {
        // Stagger failures via registered_at; the verdict must wait for
        // the slowest one.
        let candidates: Vec<HostRecord> = (0..3)
            .map(|i| HostRecord {
                registered_at: i,
                ..record()
            })
            .collect();

        let start = Instant::now();
        let result: Result<(), _> =
            select_and_call(candidates, Duration::from_millis(500), |host| async move {
                let delay = host.registered_at as u64 * 30 + 20;
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Err(GatewayError::Offline("down".into()))
            })
            .await;

        match result {
            Err(SelectError::AllHostsUnreachable { count, failures }) => {
                assert_eq!(count, 3);
                assert_eq!(failures.len(), 3);
                assert!(failures.iter().all(|f| f.liveness));
            }
            other => panic!("expected AllHostsUnreachable, got {:?}", other.err()),
        }
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_all_timeout_respects_candidate_deadline() {
        let start = Instant::now();
        let result: Result<(), _> =
            select_and_call(records(2), Duration::from_millis(100), |_| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;

        assert!(matches!(
            result,
            Err(SelectError::AllHostsUnreachable { count: 2, .. })
        ));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn test_sole_candidate_permission_failure_surfaces_directly() {
        let result: Result<(), _> =
            select_and_call(records(1), Duration::from_millis(100), |_| async {
                Err(GatewayError::ConditionalAccessDenied)
            })
            .await;

        assert!(matches!(
            result,
            Err(SelectError::Call(GatewayError::ConditionalAccessDenied))
        ));
    }

    #[tokio::test]
    async fn test_permission_failure_among_many_keeps_aggregate_verdict() {
        let candidates = records(2);
        let denied = candidates[0].peer;

        let result: Result<(), _> =
            select_and_call(candidates, Duration::from_millis(100), move |host| {
                async move {
                    if host.peer == denied {
                        Err(GatewayError::CapabilityDenied {
                            target: ("lib", "fn").into(),
                        })
                    } else {
                        Err(GatewayError::Offline("down".into()))
                    }
                }
            })
            .await;

        match result {
            Err(SelectError::AllHostsUnreachable { count: 2, failures }) => {
                assert!(failures.iter().any(|f| !f.liveness));
                assert!(failures.iter().any(|f| f.liveness));
            }
            other => panic!("expected AllHostsUnreachable, got {:?}", other.err()),
        }
    }
}
