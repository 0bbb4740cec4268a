//! Disk-space governor.
//!
//! Each update pass compares the free/total ratio of every torrent's
//! save-path volume against the configured percentage floor and asks for a
//! pause when the ratio falls strictly below it. A pause is requested once
//! per low-space episode: the mark set here survives until the torrent is
//! observed downloading again after its pause took effect, so the user
//! resuming a still-starved torrent starts a fresh episode (new pause, new
//! notification) while in-flight pauses never repeat.

use std::collections::HashMap;
use std::path::Path;

use ebbtide_config::DiskSpaceLimit;
use ebbtide_events::{InfoHash, TorrentState};
use ebbtide_torrent_core::{DiskSpaceProbe, TorrentHandle};
use tracing::{debug, info};

/// A torrent the governor wants paused, with its name for the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseRequest {
    pub hash: InfoHash,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Episode {
    /// Pause requested; the engine may not have applied it yet.
    Armed,
    /// The torrent was seen in a non-downloading state after the pause.
    PauseObserved,
}

/// Per-hash low-space episode tracking.
#[derive(Debug, Default)]
pub struct DiskSpaceGovernor {
    episodes: HashMap<InfoHash, Episode>,
}

impl DiskSpaceGovernor {
    /// Evaluate a batch of refreshed handles against the configured limit.
    ///
    /// Probe failures and volumes reporting zero total size skip the torrent
    /// for this pass without disturbing episode state.
    pub fn evaluate(
        &mut self,
        handles: &[TorrentHandle],
        limit: &DiskSpaceLimit,
        probe: &dyn DiskSpaceProbe,
    ) -> Vec<PauseRequest> {
        let mut requests = Vec::new();
        if !limit.enabled {
            return requests;
        }
        let floor = f64::from(limit.percent) / 100.0;

        for handle in handles {
            let downloading = handle.state == TorrentState::Downloading;
            match self.episodes.get(&handle.info_hash) {
                Some(Episode::Armed) => {
                    if !downloading {
                        self.episodes
                            .insert(handle.info_hash, Episode::PauseObserved);
                    }
                    continue;
                }
                Some(Episode::PauseObserved) => {
                    if !downloading {
                        continue;
                    }
                    // Resumed after the pause: the episode is over.
                    self.episodes.remove(&handle.info_hash);
                }
                None => {}
            }

            let usage = match probe.probe(Path::new(&handle.save_path)) {
                Ok(usage) => usage,
                Err(err) => {
                    debug!(
                        hash = %handle.info_hash,
                        save_path = %handle.save_path,
                        error = %err,
                        "disk-space probe failed; skipping"
                    );
                    continue;
                }
            };
            if usage.total_bytes == 0 {
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let ratio = usage.free_bytes as f64 / usage.total_bytes as f64;
            if ratio < floor {
                info!(
                    hash = %handle.info_hash,
                    name = %handle.name,
                    free_bytes = usage.free_bytes,
                    total_bytes = usage.total_bytes,
                    percent = limit.percent,
                    "free space under limit; pausing torrent"
                );
                self.episodes.insert(handle.info_hash, Episode::Armed);
                requests.push(PauseRequest {
                    hash: handle.info_hash,
                    name: handle.name.clone(),
                });
            }
        }

        requests
    }

    /// Forget any episode state for a removed torrent.
    pub fn forget(&mut self, hash: InfoHash) {
        self.episodes.remove(&hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebbtide_test_support::fixtures::{handle, hash};
    use ebbtide_test_support::mocks::FixedProbe;

    fn limit(percent: u8) -> DiskSpaceLimit {
        DiskSpaceLimit {
            enabled: true,
            percent,
        }
    }

    #[test]
    fn ratio_at_the_floor_does_not_pause() {
        let probe = FixedProbe::default();
        probe.set("/dl", 50, 100);
        let mut governor = DiskSpaceGovernor::default();

        let requests = governor.evaluate(&[handle(1, "exact", "/dl")], &limit(50), &probe);
        assert!(requests.is_empty());
    }

    #[test]
    fn ratio_below_the_floor_pauses_once_per_episode() {
        let probe = FixedProbe::default();
        probe.set("/dl", 49, 100);
        let mut governor = DiskSpaceGovernor::default();
        let low = limit(50);

        let first = governor.evaluate(&[handle(1, "starved", "/dl")], &low, &probe);
        assert_eq!(
            first,
            vec![PauseRequest {
                hash: hash(1),
                name: "starved".to_string(),
            }]
        );

        // The engine has not applied the pause yet; the handle still reads
        // as downloading. No second request.
        let lagging = governor.evaluate(&[handle(1, "starved", "/dl")], &low, &probe);
        assert!(lagging.is_empty());

        // Pause applied.
        let mut paused = handle(1, "starved", "/dl");
        paused.state = TorrentState::Paused;
        assert!(governor.evaluate(&[paused.clone()], &low, &probe).is_empty());
        assert!(governor.evaluate(&[paused], &low, &probe).is_empty());

        // User resumes while space is still low: a new episode begins.
        let resumed = governor.evaluate(&[handle(1, "starved", "/dl")], &low, &probe);
        assert_eq!(resumed.len(), 1);
    }

    #[test]
    fn episode_clears_when_space_recovers_before_resume() {
        let probe = FixedProbe::default();
        probe.set("/dl", 10, 100);
        let mut governor = DiskSpaceGovernor::default();
        let low = limit(50);

        assert_eq!(
            governor
                .evaluate(&[handle(1, "tight", "/dl")], &low, &probe)
                .len(),
            1
        );
        let mut paused = handle(1, "tight", "/dl");
        paused.state = TorrentState::Paused;
        assert!(governor.evaluate(&[paused], &low, &probe).is_empty());

        probe.set("/dl", 90, 100);
        assert!(
            governor
                .evaluate(&[handle(1, "tight", "/dl")], &low, &probe)
                .is_empty()
        );
    }

    #[test]
    fn probe_failure_and_zero_total_skip_the_torrent() {
        let probe = FixedProbe::default();
        probe.set("/zero", 0, 0);
        let mut governor = DiskSpaceGovernor::default();

        let requests = governor.evaluate(
            &[handle(1, "unknown", "/missing"), handle(2, "odd", "/zero")],
            &limit(50),
            &probe,
        );
        assert!(requests.is_empty());
    }

    #[test]
    fn disabled_limit_never_pauses() {
        let probe = FixedProbe::default();
        probe.set("/dl", 0, 100);
        let mut governor = DiskSpaceGovernor::default();

        let disabled = DiskSpaceLimit {
            enabled: false,
            percent: 50,
        };
        assert!(
            governor
                .evaluate(&[handle(1, "dry", "/dl")], &disabled, &probe)
                .is_empty()
        );
    }

    #[test]
    fn forget_drops_episode_state() {
        let probe = FixedProbe::default();
        probe.set("/dl", 1, 100);
        let mut governor = DiskSpaceGovernor::default();
        let low = limit(50);

        assert_eq!(
            governor
                .evaluate(&[handle(1, "gone", "/dl")], &low, &probe)
                .len(),
            1
        );
        governor.forget(hash(1));
        assert_eq!(
            governor
                .evaluate(&[handle(1, "gone", "/dl")], &low, &probe)
                .len(),
            1
        );
    }
}
