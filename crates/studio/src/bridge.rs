use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use editor::{Command, Editor, EditorErrorEvent, Event, MediaBackend};

/// Channel-backed bridge between shell state and the editor worker.
///
/// Commands serialize through the worker thread, which is what makes split
/// and save mutually exclusive across the process; the editor's activity
/// guard additionally rejects out-of-order requests.
#[derive(Debug)]
pub struct EditorBridge {
    command_tx: Sender<Command>,
    event_rx: Receiver<Event>,
}

impl EditorBridge {
    /// Creates a bridge from command sender and event receiver.
    pub fn new(command_tx: Sender<Command>, event_rx: Receiver<Event>) -> Self {
        Self {
            command_tx,
            event_rx,
        }
    }

    /// Sends one command to the editor worker.
    pub fn send_command(&self, command: Command) -> Result<(), BridgeError> {
        self.command_tx
            .send(command)
            .map_err(|_| BridgeError::Disconnected)
    }

    /// Receives all currently queued events without blocking.
    pub fn drain_events(&self) -> Result<Vec<Event>, BridgeError> {
        let mut events = Vec::new();
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) => return Err(BridgeError::Disconnected),
            }
        }
    }
}

/// Error raised by the shell-editor bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    Disconnected,
}

/// Spawns an editor worker thread and returns the connected bridge.
///
/// Command failures are mapped into [`Event::Error`] so the shell can
/// surface them as alerts.
pub fn spawn_editor_worker<M>(media: M) -> EditorBridge
where
    M: MediaBackend + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<Command>();
    let (event_tx, event_rx) = mpsc::channel::<Event>();

    thread::spawn(move || {
        let mut editor = Editor::new(media);
        while let Ok(command) = command_rx.recv() {
            let events = match editor.handle_command(command) {
                Ok(events) => events,
                Err(error) => vec![Event::Error(EditorErrorEvent::from_error(&error))],
            };
            for event in events {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
    });

    EditorBridge::new(command_tx, event_rx)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use editor::{
        Command, EditPlan, EditorErrorKind, Event, MediaBackend, ProbedSource, Thumbnail,
    };

    use super::{EditorBridge, spawn_editor_worker};

    #[test]
    fn sends_commands_and_drains_available_events() {
        let (command_tx, command_rx) = mpsc::channel::<Command>();
        let (event_tx, event_rx) = mpsc::channel::<Event>();
        let bridge = EditorBridge::new(command_tx, event_rx);

        bridge
            .send_command(Command::Scrub { t_tl: 42 })
            .expect("command should be sent");
        event_tx
            .send(Event::PositionChanged { t_tl: 42 })
            .expect("event should be sent");

        assert_eq!(
            command_rx.recv().expect("command should be received"),
            Command::Scrub { t_tl: 42 }
        );
        assert_eq!(
            bridge.drain_events().expect("events should be drained"),
            vec![Event::PositionChanged { t_tl: 42 }]
        );
    }

    #[test]
    fn worker_loads_a_source_and_emits_snapshot_events() {
        let bridge = spawn_editor_worker(StaticBackend);

        bridge
            .send_command(Command::Load {
                path: PathBuf::from("talk.mp4"),
            })
            .expect("command should be sent");

        let events = wait_for_events(&bridge, 2);
        assert!(matches!(events[0], Event::SourceChanged(_)));
        assert_eq!(events[1], Event::PositionChanged { t_tl: 0 });
    }

    #[test]
    fn worker_maps_command_failures_into_error_events() {
        let bridge = spawn_editor_worker(StaticBackend);

        bridge
            .send_command(Command::Split { at_tl: 0 })
            .expect("command should be sent");

        let events = wait_for_events(&bridge, 1);
        let Event::Error(error_event) = &events[0] else {
            panic!("failure must surface as an error event");
        };
        assert_eq!(error_event.kind, EditorErrorKind::Other);
        assert!(error_event.message.contains("no source video is loaded"));
    }

    fn wait_for_events(bridge: &EditorBridge, count: usize) -> Vec<Event> {
        let started = Instant::now();
        let mut events = Vec::new();
        while events.len() < count {
            assert!(
                started.elapsed() < Duration::from_secs(5),
                "timed out waiting for {count} events, got {events:?}"
            );
            events.extend(bridge.drain_events().expect("worker should stay connected"));
            std::thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[derive(Debug, Clone, Copy)]
    struct StaticBackend;

    impl MediaBackend for StaticBackend {
        fn probe(&self, path: &Path) -> editor::Result<ProbedSource> {
            Ok(ProbedSource {
                path: path.to_path_buf(),
                duration_tl: 10_000_000,
                width: 640,
                height: 360,
                has_audio: false,
            })
        }

        fn capture_thumbnail(
            &self,
            _path: &Path,
            _at_seconds: f64,
            _deadline: Duration,
        ) -> editor::Result<Thumbnail> {
            Ok(Thumbnail::new(2, 2, vec![0xff, 0xd8, 0, 0]))
        }

        fn commit_edit(&self, _plan: &EditPlan, _deadline: Duration) -> editor::Result<()> {
            Ok(())
        }
    }
}
