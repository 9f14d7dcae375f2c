use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lens_config::Config;
use lens_types::{AppEvent, DisplayUpdate, LanguagePair, UiCommand};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::region::RegionTracker;
use crate::scheduler::{PipelineScheduler, TickDecision};
use crate::sink::ResultSink;
use crate::worker::{Completed, WorkerHandle};

/// Interactive-side state: everything the UI mutates lives here and is
/// only touched from [`interactive_loop`].
pub struct Session {
    tracker: RegionTracker,
    scheduler: PipelineScheduler,
    sink: ResultSink,
}

impl Session {
    pub fn new(tracker: RegionTracker, scheduler: PipelineScheduler, sink: ResultSink) -> Self {
        Self {
            tracker,
            scheduler,
            sink,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let languages = LanguagePair::new(config.ocr.language, config.translator.target_language);
        let mut scheduler = PipelineScheduler::new(
            Duration::from_millis(config.pipeline.tick_interval_ms.max(1)),
            languages,
        );
        scheduler.set_auto_translate(config.pipeline.auto_translate);

        let tracker = RegionTracker::new(config.ocr.capture_region);
        if tracker.current_region().is_some() {
            scheduler.start();
        }

        Self::new(tracker, scheduler, ResultSink::new(config.ui.show_original))
    }

    pub fn tracker(&self) -> &RegionTracker {
        &self.tracker
    }

    pub fn scheduler(&self) -> &PipelineScheduler {
        &self.scheduler
    }

    pub fn sink(&self) -> &ResultSink {
        &self.sink
    }

    /// Evaluate one tick; returns the dispatched request id, if any
    pub fn on_tick(&mut self, worker: &WorkerHandle) -> Option<u64> {
        match self.scheduler.tick(&self.tracker, self.sink.last_consumed()) {
            TickDecision::Dispatch(request) => {
                let id = request.id;
                match worker.try_dispatch(request) {
                    Ok(()) => Some(id),
                    Err(e) => {
                        tracing::warn!("[SCHEDULER] Dispatch #{} refused: {}", id, e);
                        self.scheduler.dispatch_failed(id);
                        None
                    }
                }
            }
            TickDecision::Skip(reason) => {
                tracing::trace!("[SCHEDULER] Tick skipped: {:?}", reason);
                None
            }
        }
    }

    pub fn on_completed(&mut self, completed: Completed) -> Option<DisplayUpdate> {
        if !self.scheduler.complete(&completed) {
            return None;
        }
        let update = self.sink.apply(completed);
        self.scheduler.consumed();
        update
    }

    /// Apply one user command; returns events for the renderer
    pub fn handle_command(&mut self, command: UiCommand) -> Vec<AppEvent> {
        let mut events = Vec::new();
        match command {
            UiCommand::SelectRegion(region) => {
                tracing::info!("Region selected: {:?}", region);
                self.tracker.set_region(region);
                self.scheduler.start();
                events.push(AppEvent::Display(self.sink.reset()));
                events.push(self.status("Monitoring"));
            }
            UiCommand::ClearRegion => {
                self.tracker.clear();
                self.scheduler.stop();
                events.push(self.status("Region cleared"));
            }
            UiCommand::PointerDown { x, y } => {
                if self.tracker.pointer_down(x, y) {
                    tracing::debug!("Drag started at ({}, {})", x, y);
                }
            }
            UiCommand::PointerMove { x, y } => {
                if let Some(region) = self.tracker.pointer_move(x, y) {
                    tracing::trace!("Region dragged to {:?}", region);
                }
            }
            UiCommand::PointerUp => {
                if self.tracker.is_dragging() {
                    tracing::debug!("Drag ended at {:?}", self.tracker.current_region());
                }
                self.tracker.pointer_up();
            }
            UiCommand::SetSource(lang) => {
                tracing::info!("Source language: {}", lang.display_name());
                self.scheduler.set_source(lang);
            }
            UiCommand::SetDest(lang) => {
                tracing::info!("Target language: {}", lang.display_name());
                self.scheduler.set_dest(lang);
            }
            UiCommand::SetAutoTranslate(enabled) => {
                self.scheduler.set_auto_translate(enabled);
                events.push(self.status(if enabled {
                    "Auto-translate on"
                } else {
                    "Auto-translate off"
                }));
            }
            UiCommand::TranslateNow => self.scheduler.request_now(),
            UiCommand::ShowOriginal(show) => {
                events.push(AppEvent::Display(self.sink.set_show_original(show)));
            }
            UiCommand::StartMonitoring => {
                if self.tracker.current_region().is_some() {
                    self.scheduler.start();
                    events.push(self.status("Monitoring"));
                } else {
                    events.push(self.status("No region selected"));
                }
            }
            UiCommand::StopMonitoring => {
                self.scheduler.stop();
                events.push(self.status("Stopped"));
            }
            UiCommand::CopyTranslation => match self.sink.current_translation() {
                Some(text) => events.push(AppEvent::CopyText(text.to_string())),
                None => tracing::info!("Nothing to copy yet"),
            },
            UiCommand::Quit => events.push(AppEvent::Shutdown),
        }
        events
    }

    fn status(&self, message: &str) -> AppEvent {
        AppEvent::Status {
            message: message.to_string(),
            monitoring: self.scheduler.is_monitoring(),
        }
    }
}

/// The interactive loop: fixed-interval ticks, user commands and worker
/// outcomes, all applied one at a time on this task.
pub async fn interactive_loop(
    mut session: Session,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    completed_rx: AsyncReceiver<Completed>,
    worker: WorkerHandle,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(session.scheduler().interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        "[EVENT_LOOP] Ticking every {:?}",
        session.scheduler().interval()
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                session.on_tick(&worker);
            }
            Ok(completed) = completed_rx.recv() => {
                if let Some(update) = session.on_completed(completed) {
                    app_to_ui_tx.send(AppEvent::Display(update)).await?;
                }
            }
            Ok(event) = ui_to_app_rx.recv() => {
                let AppEvent::Command(command) = event else {
                    continue;
                };
                tracing::debug!("[EVENT_LOOP] Command: {:?}", command);
                let quit = command == UiCommand::Quit;
                for event in session.handle_command(command) {
                    app_to_ui_tx.send(event).await?;
                }
                if quit {
                    break;
                }
            }
        }
    }

    tracing::info!("[EVENT_LOOP] Stopping");
    Ok(())
}
