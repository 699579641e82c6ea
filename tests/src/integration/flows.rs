//! # Integration Test Flows
//!
//! The verifier as an off-ramp sees it: behind the proxy, with governance
//! changing config, curses and the implementation underneath.
//!
//! ## Flows Tested:
//!
//! 1. **Proxy → Remote**: verify and curse checks forward to the current implementation
//! 2. **Implementation swap**: signatures bound to the old verifier address stop verifying
//! 3. **Event stream**: broadcast subscribers see committed mutations in order
//! 4. **Concurrent readers**: verification keeps working while config rotates

#[cfg(test)]
mod tests {
    use super::super::support::*;
    use rmn_remote::{
        BroadcastEventSink, FanOutEventSink, InMemoryEventLog, Rmn, RmnError, RmnEvent,
        RmnProxy, RmnRemoteApi, Subject, TracingEventSink, GLOBAL_CURSE_SUBJECT,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    const REMOTE_V1: [u8; 20] = [0xA1; 20];
    const REMOTE_V2: [u8; 20] = [0xA2; 20];
    const CONFIG_DIGEST: [u8; 32] = [0x55; 32];

    // =========================================================================
    // PROXY → REMOTE
    // =========================================================================

    #[test]
    fn test_offramp_verifies_through_proxy() {
        let committee = Committee::new(4);
        let remote = Arc::new(
            configured_remote(
                REMOTE_V1,
                &committee,
                1,
                CONFIG_DIGEST,
                Arc::new(InMemoryEventLog::new()),
            )
            .unwrap(),
        );
        let proxy =
            RmnProxy::new(OWNER, REMOTE_V1, remote.clone(), Arc::new(InMemoryEventLog::new()))
                .unwrap();

        let roots = roots(3);
        let ctx = context(REMOTE_V1, OFFRAMP, CONFIG_DIGEST);
        assert_eq!(
            proxy.verify(OFFRAMP, &roots, &committee.sign(&ctx, &roots, 2)),
            Ok(())
        );
        assert_eq!(
            proxy.verify(OFFRAMP, &roots, &committee.sign(&ctx, &roots, 1)),
            Err(RmnError::ThresholdNotMet)
        );

        // Curses placed on the remote are visible through the proxy
        let lane = Subject::from_chain_selector(1000);
        assert!(!proxy.is_cursed(&lane));
        remote.curse(OWNER, lane).unwrap();
        assert!(proxy.is_cursed(&lane));
        assert!(!proxy.is_globally_cursed());

        remote.curse(OWNER, GLOBAL_CURSE_SUBJECT).unwrap();
        assert!(proxy.is_cursed(&Subject::from_chain_selector(2000)));
        assert!(proxy.is_globally_cursed());

        assert_eq!(
            proxy.is_blessed(&rmn_remote::TaggedRoot {
                commit_store: [1; 20],
                root: [2; 32],
            }),
            Err(RmnError::IsBlessedNotAvailable)
        );
    }

    // =========================================================================
    // IMPLEMENTATION SWAP
    // =========================================================================

    #[test]
    fn test_swap_invalidates_old_signatures() {
        let committee = Committee::new(3);
        let v1 = configured_remote(
            REMOTE_V1,
            &committee,
            1,
            CONFIG_DIGEST,
            Arc::new(InMemoryEventLog::new()),
        )
        .unwrap();
        let v2 = configured_remote(
            REMOTE_V2,
            &committee,
            1,
            CONFIG_DIGEST,
            Arc::new(InMemoryEventLog::new()),
        )
        .unwrap();

        let proxy_events = Arc::new(InMemoryEventLog::new());
        let proxy = RmnProxy::new(OWNER, REMOTE_V1, Arc::new(v1), proxy_events.clone()).unwrap();

        let roots = roots(1);
        let signed_for_v1 = committee.sign(&context(REMOTE_V1, OFFRAMP, CONFIG_DIGEST), &roots, 2);
        assert_eq!(proxy.verify(OFFRAMP, &roots, &signed_for_v1), Ok(()));

        proxy.set_arm(OWNER, REMOTE_V2, Arc::new(v2)).unwrap();
        assert_eq!(proxy.get_arm(), REMOTE_V2);

        // The digest binds the verifier address, so v1 signatures no longer count
        assert!(proxy.verify(OFFRAMP, &roots, &signed_for_v1).is_err());
        let signed_for_v2 = committee.sign(&context(REMOTE_V2, OFFRAMP, CONFIG_DIGEST), &roots, 2);
        assert_eq!(proxy.verify(OFFRAMP, &roots, &signed_for_v2), Ok(()));

        assert_eq!(
            proxy_events.events(),
            vec![
                RmnEvent::ArmSet { arm: REMOTE_V1 },
                RmnEvent::ArmSet { arm: REMOTE_V2 }
            ]
        );
    }

    // =========================================================================
    // EVENT STREAM
    // =========================================================================

    #[tokio::test]
    async fn test_broadcast_subscriber_sees_commit_order() {
        let committee = Committee::new(3);
        let broadcast = Arc::new(BroadcastEventSink::default());
        let mut receiver = broadcast.subscribe();
        let history = Arc::new(InMemoryEventLog::new());

        let sinks: Vec<Arc<dyn rmn_remote::EventSink>> =
            vec![broadcast.clone(), history.clone(), Arc::new(TracingEventSink)];
        let remote = configured_remote(
            REMOTE_V1,
            &committee,
            1,
            CONFIG_DIGEST,
            Arc::new(FanOutEventSink::new(sinks)),
        )
        .unwrap();

        let lane = Subject::from_chain_selector(7);
        remote.curse(OWNER, lane).unwrap();
        // Rejected: publishes nothing
        assert!(remote.curse(OWNER, lane).is_err());
        remote.uncurse(OWNER, lane).unwrap();
        remote.transfer_ownership(OWNER, [0x11; 20]).unwrap();

        let mut names = Vec::new();
        for _ in 0..4 {
            let event = timeout(Duration::from_secs(1), receiver.recv())
                .await
                .expect("event before timeout")
                .expect("channel open");
            names.push(event.name());
        }
        assert_eq!(
            names,
            vec![
                "ConfigSet",
                "Cursed",
                "Uncursed",
                "OwnershipTransferRequested"
            ]
        );
        assert_eq!(history.len(), 4);
        assert_eq!(history.config_history()[0].version, 1);
    }

    // =========================================================================
    // CONCURRENT READERS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_verification_during_config_rotation() {
        let committee = Committee::new(5);
        let remote = Arc::new(
            configured_remote(
                REMOTE_V1,
                &committee,
                2,
                CONFIG_DIGEST,
                Arc::new(InMemoryEventLog::new()),
            )
            .unwrap(),
        );

        let roots = roots(2);
        let signatures = committee.sign(&context(REMOTE_V1, OFFRAMP, CONFIG_DIGEST), &roots, 3);

        let rotator = {
            let remote = remote.clone();
            let config = committee.config(2, CONFIG_DIGEST);
            tokio::task::spawn_blocking(move || {
                for _ in 0..100 {
                    remote.set_config(OWNER, config.clone()).unwrap();
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let remote = remote.clone();
            let roots = roots.clone();
            let signatures = signatures.clone();
            readers.push(tokio::task::spawn_blocking(move || {
                for _ in 0..25 {
                    // Same digest under every rotation, so always valid
                    assert_eq!(remote.verify(OFFRAMP, &roots, &signatures), Ok(()));
                }
            }));
        }

        rotator.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
        assert_eq!(remote.get_versioned_config().version, 101);
    }
}
