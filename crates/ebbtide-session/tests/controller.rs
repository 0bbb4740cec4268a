//! End-to-end exercises of the session controller over its command channel.

use std::sync::Arc;
use std::time::Duration;

use ebbtide_config::{Settings, SettingsService};
use ebbtide_events::{Event, EventBus, EventStream};
use ebbtide_intake::{DecodedMetainfo, MetainfoDecoder};
use ebbtide_session::{SessionController, SessionDeps};
use ebbtide_test_support::fixtures::{handle, hash};
use ebbtide_test_support::mocks::{
    FixedProbe, RecordingEngine, RecordingNotifier, RecordingReviewSink,
};
use ebbtide_torrent_core::{SessionEvent, TorrentInfo};
use tokio::time::timeout;

const EVENT_TIMEOUT: Duration = Duration::from_secs(1);

struct BailDecoder;

impl MetainfoDecoder for BailDecoder {
    fn decode(&self, _bytes: &[u8]) -> anyhow::Result<DecodedMetainfo> {
        anyhow::bail!("no torrent files in these tests")
    }
}

struct Fixture {
    controller: SessionController,
    stream: EventStream,
    engine: Arc<RecordingEngine>,
}

fn fixture(settings: Settings) -> Fixture {
    let events = EventBus::with_capacity(64);
    let stream = events.subscribe(None);
    let engine = Arc::new(RecordingEngine::default());
    let deps = SessionDeps {
        engine: engine.clone(),
        probe: Arc::new(FixedProbe::default()),
        notifier: Arc::new(RecordingNotifier::default()),
        review: Arc::new(RecordingReviewSink::default()),
        decoder: Arc::new(BailDecoder),
    };
    let settings = SettingsService::new(settings).expect("valid settings");
    let controller = SessionController::spawn(events, settings, deps);
    Fixture {
        controller,
        stream,
        engine,
    }
}

async fn next_event(stream: &mut EventStream) -> Event {
    timeout(EVENT_TIMEOUT, stream.next())
        .await
        .expect("event timed out")
        .expect("bus closed")
        .event
}

#[tokio::test]
async fn magnet_intake_reaches_the_engine_when_review_is_skipped() {
    let fx = fixture(Settings {
        skip_add_review: true,
        ..Settings::default()
    });

    let magnet = format!("magnet:?xt=urn:btih:{}&dn=Fedora.Workstation", "0a".repeat(20));
    fx.controller
        .intake(Vec::new(), vec![magnet])
        .await
        .expect("intake accepted");

    // Commands are processed in order; a snapshot response means the intake
    // batch has been fully handled.
    let snapshot = fx.controller.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.pending_metadata, 1);

    let added = fx.engine.added();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].name.as_deref(), Some("Fedora.Workstation"));
    assert_eq!(fx.engine.metadata_requests().len(), 1);
}

#[tokio::test]
async fn engine_events_surface_on_the_bus() {
    let mut fx = fixture(Settings::default());

    fx.controller
        .deliver_event(SessionEvent::Added {
            handle: handle(1, "one", "/dl"),
        })
        .await
        .expect("event accepted");

    assert!(matches!(
        next_event(&mut fx.stream).await,
        Event::TorrentAdded { name, .. } if name == "one"
    ));
    assert!(matches!(
        next_event(&mut fx.stream).await,
        Event::TorrentCount { visible: 1 }
    ));

    let snapshot = fx.controller.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.visible, 1);
    assert!(snapshot.selected.is_empty());
}

#[tokio::test]
async fn metadata_subscription_survives_the_command_channel() {
    let fx = fixture(Settings::default());
    let mut subscriber = fx
        .controller
        .subscribe_metadata(hash(9))
        .await
        .expect("subscription");

    let info = TorrentInfo {
        name: "discovered".to_string(),
        total_size: 2_048,
        files: vec!["a.iso".to_string()],
    };
    fx.controller
        .deliver_event(SessionEvent::MetadataFound {
            hash: hash(9),
            info: info.clone(),
        })
        .await
        .expect("event accepted");

    let delivered = timeout(EVENT_TIMEOUT, subscriber.recv())
        .await
        .expect("delivery timed out")
        .expect("channel open");
    assert_eq!(delivered, info);
}

#[tokio::test]
async fn selection_round_trips_through_snapshots() {
    let fx = fixture(Settings::default());

    fx.controller
        .set_selection(vec![handle(1, "one", "/dl"), handle(2, "two", "/dl")])
        .await
        .expect("selection accepted");
    let snapshot = fx.controller.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.selected.len(), 2);

    fx.controller
        .set_selection(Vec::new())
        .await
        .expect("selection accepted");
    let snapshot = fx.controller.snapshot().await.expect("snapshot");
    assert!(snapshot.selected.is_empty());
}
