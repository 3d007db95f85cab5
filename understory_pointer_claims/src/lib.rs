// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pointer_claims --heading-base-level=0

//! Understory Pointer Claims: exclusive ownership of touch pointers.
//!
//! ## Overview
//!
//! When a virtual control (a button, a joystick, a touch pad) takes a finger, nothing else
//! should see that finger: not the downstream engine's raw touch stream, and not another
//! widget. [`PointerClaims`] is the ledger those widgets write to.
//!
//! - [`PointerClaims::claim`] records that a pointer id is taken.
//! - [`PointerClaims::release`] gives it back.
//! - [`PointerClaims::is_claimed`] is what the touch bridge asks before publishing a sample.
//!
//! The ledger does not own the claims. Whoever called `claim` must call `release`, however the
//! gesture ended; a cancelled gesture does not release anything by itself.
//! [`PointerClaims::claim_scoped`] returns a [`ClaimGuard`] for owners that prefer releasing on drop.
//!
//! ## Engine mirror
//!
//! Every change is mirrored to the engine through a
//! [`GuardedBridge`](understory_engine_bridge::GuardedBridge) as a best-effort hint for engines
//! that keep their own side table. The local set is the source of truth: a missing or failing
//! bridge never prevents a claim or release from taking effect.
//!
//! ## Threads
//!
//! All methods take `&self` and lock internally, so one registry can be shared (typically in an
//! `Arc`) between the UI thread and an engine thread.
//!
//! Bridge notifications are sent while the lock is held, so the engine sees the claims and
//! releases of a pointer in the order they took effect, and a touch frame published inside
//! [`PointerClaims::with_claimed`] is ordered against them too. An [`EngineBridge`] must not call
//! back into the registry.
//!
//! [`EngineBridge`]: understory_engine_bridge::EngineBridge
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_engine_bridge::{GuardedBridge, NullBridge};
//! use understory_pointer_claims::PointerClaims;
//!
//! // No engine attached: claims still work locally.
//! let claims = PointerClaims::new(GuardedBridge::new(Arc::new(NullBridge)));
//!
//! assert!(claims.claim(5));
//! assert!(!claims.claim(5)); // already claimed
//! assert!(claims.is_claimed(5));
//!
//! {
//!     let _guard = claims.claim_scoped(7);
//!     assert_eq!(claims.count(), 2);
//! }
//! assert!(!claims.is_claimed(7));
//!
//! claims.clear_all();
//! assert_eq!(claims.count(), 0);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use hashbrown::HashMap;
use understory_engine_bridge::{GuardedBridge, PointerId};

/// A recorded claim.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerClaim {
    /// The claimed pointer.
    pub pointer_id: PointerId,
    /// When the claim was first made.
    pub claimed_at: Instant,
}

/// Ledger of pointer ids claimed for exclusive use.
///
/// See the [crate docs](crate) for the ownership model.
#[derive(Debug)]
pub struct PointerClaims {
    claims: Mutex<HashMap<PointerId, Instant>>,
    bridge: GuardedBridge,
}

impl PointerClaims {
    /// Create an empty ledger that mirrors changes through `bridge`.
    pub fn new(bridge: GuardedBridge) -> Self {
        Self {
            claims: Mutex::new(HashMap::new()),
            bridge,
        }
    }

    /// Claim `pointer_id`.
    ///
    /// Returns `true` if the pointer was not claimed before. Claiming twice is harmless; the
    /// original timestamp is kept and the engine is only notified once.
    pub fn claim(&self, pointer_id: PointerId) -> bool {
        let mut claims = self.lock();
        if claims.contains_key(&pointer_id) {
            return false;
        }
        claims.insert(pointer_id, Instant::now());
        log::debug!("pointer {pointer_id} claimed");
        self.bridge.notify_claim(pointer_id);
        true
    }

    /// Claim `pointer_id` and release it when the returned guard drops.
    ///
    /// If the pointer was already claimed, the guard still releases it on drop.
    pub fn claim_scoped(&self, pointer_id: PointerId) -> ClaimGuard<'_> {
        self.claim(pointer_id);
        ClaimGuard {
            claims: self,
            pointer_id,
        }
    }

    /// Release `pointer_id`.
    ///
    /// Returns `true` if it was claimed. Releasing an unclaimed pointer does nothing and does
    /// not notify the engine.
    pub fn release(&self, pointer_id: PointerId) -> bool {
        let mut claims = self.lock();
        if claims.remove(&pointer_id).is_none() {
            return false;
        }
        log::debug!("pointer {pointer_id} released");
        self.bridge.notify_release(pointer_id);
        true
    }

    /// Whether `pointer_id` is currently claimed.
    pub fn is_claimed(&self, pointer_id: PointerId) -> bool {
        self.lock().contains_key(&pointer_id)
    }

    /// Drop every claim.
    ///
    /// Called when the UI layer that owns the claims is torn down. The engine is notified
    /// once, even when the ledger was already empty.
    pub fn clear_all(&self) {
        let mut claims = self.lock();
        log::debug!("cleared {} pointer claims", claims.len());
        claims.clear();
        self.bridge.notify_clear();
    }

    /// Number of claimed pointers.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Snapshot of all claims, ordered by pointer id.
    pub fn claims(&self) -> Vec<PointerClaim> {
        let mut out: Vec<PointerClaim> = self
            .lock()
            .iter()
            .map(|(&pointer_id, &claimed_at)| PointerClaim {
                pointer_id,
                claimed_at,
            })
            .collect();
        out.sort_by_key(|c| c.pointer_id);
        out
    }

    /// Run `f` against a consistent view of the claim set.
    ///
    /// The lock is held for the duration of `f`, so every lookup inside it sees the same set and
    /// no claim or release lands until `f` returns.
    /// Keep `f` short and do not call back into this registry from it.
    pub fn with_claimed<R>(&self, f: impl FnOnce(ClaimedSet<'_>) -> R) -> R {
        let claims = self.lock();
        f(ClaimedSet { claims: &*claims })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PointerId, Instant>> {
        // The map stays consistent across a panic in another holder, so keep using it.
        self.claims.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read-only view of the claim set, see [`PointerClaims::with_claimed`].
#[derive(Copy, Clone, Debug)]
pub struct ClaimedSet<'a> {
    claims: &'a HashMap<PointerId, Instant>,
}

impl ClaimedSet<'_> {
    /// Whether `pointer_id` is claimed.
    pub fn contains(&self, pointer_id: PointerId) -> bool {
        self.claims.contains_key(&pointer_id)
    }

    /// Number of claimed pointers.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// True when nothing is claimed.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Releases its pointer when dropped. See [`PointerClaims::claim_scoped`].
#[derive(Debug)]
#[must_use = "dropping the guard releases the claim immediately"]
pub struct ClaimGuard<'a> {
    claims: &'a PointerClaims,
    pointer_id: PointerId,
}

impl ClaimGuard<'_> {
    /// The guarded pointer.
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }
}

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        self.claims.release(self.pointer_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use understory_engine_bridge::{Operations, Record, RecordingBridge};

    fn recorded() -> (PointerClaims, Arc<RecordingBridge>) {
        let recording = Arc::new(RecordingBridge::new());
        let claims = PointerClaims::new(GuardedBridge::new(recording.clone()));
        (claims, recording)
    }

    #[test]
    fn claim_is_idempotent_and_notifies_once() {
        let (claims, recording) = recorded();
        assert!(claims.claim(3));
        assert!(!claims.claim(3));
        assert!(claims.is_claimed(3));
        assert_eq!(claims.count(), 1);
        assert_eq!(recording.records(), vec![Record::Claim(3)]);
    }

    #[test]
    fn repeated_claim_keeps_original_timestamp() {
        let (claims, _) = recorded();
        claims.claim(3);
        let first = claims.claims()[0].claimed_at;
        claims.claim(3);
        assert_eq!(claims.claims()[0].claimed_at, first);
    }

    #[test]
    fn release_of_unclaimed_pointer_is_a_no_op() {
        let (claims, recording) = recorded();
        assert!(!claims.release(9));
        assert!(recording.records().is_empty());

        claims.claim(9);
        assert!(claims.release(9));
        assert!(!claims.is_claimed(9));
        assert_eq!(recording.records(), vec![Record::Claim(9), Record::Release(9)]);
    }

    #[test]
    fn clear_all_empties_and_notifies_once() {
        let (claims, recording) = recorded();
        claims.claim(1);
        claims.claim(2);
        recording.take();

        claims.clear_all();
        assert_eq!(claims.count(), 0);
        assert!(!claims.is_claimed(1));
        assert_eq!(recording.records(), vec![Record::Clear]);
    }

    #[test]
    fn claims_snapshot_is_sorted_by_id() {
        let (claims, _) = recorded();
        for id in [7, 2, 5] {
            claims.claim(id);
        }
        let ids: Vec<PointerId> = claims.claims().iter().map(|c| c.pointer_id).collect();
        assert_eq!(ids, vec![2, 5, 7]);
    }

    #[test]
    fn claim_survives_unavailable_bridge() {
        let recording = Arc::new(RecordingBridge::unavailable());
        let claims = PointerClaims::new(GuardedBridge::new(recording.clone()));

        assert!(claims.claim(5));
        assert!(claims.is_claimed(5));
        assert!(recording.records().is_empty());
    }

    #[test]
    fn claim_survives_failing_notifications() {
        let recording = Arc::new(RecordingBridge::failing(
            Operations::NOTIFY_CLAIM | Operations::NOTIFY_RELEASE,
        ));
        let claims = PointerClaims::new(GuardedBridge::new(recording));

        assert!(claims.claim(5));
        assert!(claims.is_claimed(5));
        assert!(claims.release(5));
        assert!(!claims.is_claimed(5));
    }

    #[test]
    fn scoped_claim_releases_on_drop() {
        let (claims, recording) = recorded();
        {
            let guard = claims.claim_scoped(4);
            assert_eq!(guard.pointer_id(), 4);
            assert!(claims.is_claimed(4));
        }
        assert!(!claims.is_claimed(4));
        assert_eq!(recording.records(), vec![Record::Claim(4), Record::Release(4)]);
    }

    #[test]
    fn claimed_set_reflects_claims() {
        let (claims, _) = recorded();
        claims.claim(1);
        claims.claim(3);
        let visible: Vec<PointerId> =
            claims.with_claimed(|set| (0..5).filter(|&id| !set.contains(id)).collect());
        assert_eq!(visible, vec![0, 2, 4]);
    }

    #[test]
    fn concurrent_claims_from_several_threads() {
        let claims = Arc::new(PointerClaims::new(GuardedBridge::new(Arc::new(
            RecordingBridge::new(),
        ))));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let claims = Arc::clone(&claims);
                thread::spawn(move || {
                    for i in 0..50 {
                        let id = t * 100 + i;
                        claims.claim(id);
                        if i % 2 == 0 {
                            claims.release(id);
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker thread panicked");
        }

        assert_eq!(claims.count(), 4 * 25);
        assert!(claims.is_claimed(101));
        assert!(!claims.is_claimed(100));
    }

    #[test]
    fn engine_sees_racing_claims_in_order() {
        let recording = Arc::new(RecordingBridge::new());
        let claims = Arc::new(PointerClaims::new(GuardedBridge::new(recording.clone())));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let claims = Arc::clone(&claims);
                thread::spawn(move || {
                    for _ in 0..500 {
                        claims.claim(0);
                        claims.release(0);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker thread panicked");
        }

        let mut mirrored = false;
        for record in recording.records() {
            match record {
                Record::Claim(0) => {
                    assert!(!mirrored, "claim sent for a pointer the engine holds");
                    mirrored = true;
                }
                Record::Release(0) => {
                    assert!(mirrored, "release sent before its claim");
                    mirrored = false;
                }
                other => panic!("unexpected record {other:?}"),
            }
        }
        assert_eq!(mirrored, claims.is_claimed(0));
    }
}
