#![allow(clippy::redundant_pub_crate)]

use std::path::PathBuf;
use std::sync::Arc;

use ebbtide_config::SettingsService;
use ebbtide_events::{Event, EventBus};
use ebbtide_intake::{classify, descriptors_from_files, descriptors_from_magnets};
use ebbtide_torrent_core::{SessionEvent, TorrentHandle, TorrentInfo};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::SessionDeps;
use crate::command::SessionMessage;
use crate::governor::DiskSpaceGovernor;
use crate::registry::MetadataRegistry;
use crate::selection::SelectionTracker;

pub(crate) fn spawn(
    events: EventBus,
    settings: SettingsService,
    deps: SessionDeps,
    mut commands: mpsc::Receiver<SessionMessage>,
) {
    tokio::spawn(async move {
        let mut worker = Worker::new(events, settings, deps);
        while let Some(message) = commands.recv().await {
            worker.handle(message).await;
        }
        debug!("session worker stopped: command channel closed");
    });
}

struct Worker {
    events: EventBus,
    settings: SettingsService,
    deps: SessionDeps,
    selection: SelectionTracker,
    registry: MetadataRegistry,
    governor: DiskSpaceGovernor,
}

impl Worker {
    fn new(events: EventBus, settings: SettingsService, deps: SessionDeps) -> Self {
        Self {
            events,
            settings,
            deps,
            selection: SelectionTracker::default(),
            registry: MetadataRegistry::default(),
            governor: DiskSpaceGovernor::default(),
        }
    }

    async fn handle(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Engine(event) => self.handle_engine_event(event).await,
            SessionMessage::Intake { files, magnets } => {
                self.handle_intake(files, magnets).await;
            }
            SessionMessage::SetSelection { items } => self.handle_set_selection(items),
            SessionMessage::SubscribeMetadata { hash, respond_to } => {
                let _ = respond_to.send(self.registry.subscribe(hash));
            }
            SessionMessage::Snapshot { respond_to } => {
                let _ = respond_to.send(crate::SessionSnapshot {
                    selected: self.selection.selected(),
                    visible: self.selection.visible(),
                    pending_metadata: self.registry.pending_count(),
                });
            }
        }
    }

    async fn handle_engine_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Added { handle } => {
                info!(hash = %handle.info_hash, name = %handle.name, "torrent added");
                let visible = self.selection.on_added();
                self.events.publish(Event::TorrentAdded {
                    hash: handle.info_hash,
                    name: handle.name,
                });
                self.events.publish(Event::TorrentCount { visible });
            }
            SessionEvent::Removed { hash } => {
                info!(hash = %hash, "torrent removed");
                let outcome = self.selection.on_removed(hash);
                self.registry.remove(hash);
                self.governor.forget(hash);
                self.events.publish(Event::TorrentRemoved { hash });
                self.events.publish(Event::TorrentCount {
                    visible: self.selection.visible(),
                });
                if outcome.selection_now_empty {
                    self.events.publish(Event::SelectionReset);
                }
            }
            SessionEvent::Updated { handles } => {
                let refreshed = self.selection.on_updated(&handles);
                if !refreshed.is_empty() {
                    self.events.publish(Event::DetailRefresh { hashes: refreshed });
                }
                self.enforce_disk_space(&handles).await;
            }
            SessionEvent::Stats { stats } => {
                self.events.publish(Event::TransferRates {
                    download_bps: stats.payload_download_rate,
                    upload_bps: stats.payload_upload_rate,
                });
            }
            SessionEvent::MetadataFound { hash, info } => {
                if self.registry.resolve(hash, &info) {
                    self.events.publish(Event::MetadataFound { hash });
                } else {
                    debug!(hash = %hash, "metadata for unregistered hash ignored");
                }
            }
        }
    }

    async fn enforce_disk_space(&mut self, handles: &[TorrentHandle]) {
        let limit = self.settings.snapshot().disk_space;
        let requests = self
            .governor
            .evaluate(handles, &limit, self.deps.probe.as_ref());
        for request in requests {
            if let Err(err) = self.deps.engine.pause_torrent(request.hash).await {
                warn!(hash = %request.hash, error = %err, "low-space pause failed");
                continue;
            }
            self.deps
                .notifier
                .notify("Low disk space", &request.name);
            self.events.publish(Event::LowDiskSpace {
                hash: request.hash,
                name: request.name,
            });
        }
    }

    async fn handle_intake(&mut self, files: Vec<PathBuf>, magnets: Vec<String>) {
        let mut batch = descriptors_from_files(self.deps.decoder.as_ref(), &files);
        batch.extend(descriptors_from_magnets(&magnets));
        if batch.is_empty() {
            debug!("intake produced no descriptors");
            return;
        }

        let settings = self.settings.snapshot();
        let classification = classify(batch, &settings);

        if !classification.pending.is_empty() {
            self.registry.register(&classification.pending);
            if let Err(err) = self
                .deps
                .engine
                .request_metadata(classification.pending.clone())
                .await
            {
                warn!(
                    count = classification.pending.len(),
                    error = %err,
                    "metadata request failed"
                );
            }
        }

        if settings.skip_add_review {
            for descriptor in classification.ready {
                let name = descriptor.derived_name().to_string();
                if let Err(err) = self.deps.engine.add_torrent(descriptor).await {
                    warn!(name = %name, error = %err, "add torrent failed");
                }
            }
        } else {
            self.deps.review.review(classification.ready);
        }
    }

    fn handle_set_selection(&mut self, items: Vec<TorrentHandle>) {
        self.selection.set_selection(items);
        if self.selection.is_empty() {
            self.events.publish(Event::SelectionReset);
        } else {
            self.events.publish(Event::SelectionChanged {
                hashes: self.selection.selected_hashes(),
            });
        }
    }

    /// Subscribe directly to metadata resolution; test seam mirroring the
    /// `SubscribeMetadata` message.
    #[cfg(test)]
    fn subscribe_metadata(&mut self, hash: ebbtide_events::InfoHash) -> mpsc::UnboundedReceiver<TorrentInfo> {
        self.registry.subscribe(hash)
    }
}
