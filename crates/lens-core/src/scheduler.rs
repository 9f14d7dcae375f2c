use std::time::Duration;

use lens_types::{LanguagePair, OcrLanguage};

use crate::region::RegionTracker;
use crate::request::{ConsumedText, PipelineRequest};
use crate::worker::{Completed, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotMonitoring,
    NoRegion,
    Dragging,
    AutoTranslateOff,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickDecision {
    Dispatch(PipelineRequest),
    Skip(SkipReason),
}

/// Decides once per tick whether a new attempt may start.
///
/// At most one attempt is ever `Running`; ticks that land while one is in
/// flight are dropped rather than queued.
#[derive(Debug)]
pub struct PipelineScheduler {
    interval: Duration,
    state: PipelineState,
    monitoring: bool,
    auto_translate: bool,
    manual_pending: bool,
    languages: LanguagePair,
    next_id: u64,
    in_flight: Option<u64>,
    dispatched: u64,
}

impl PipelineScheduler {
    pub fn new(interval: Duration, languages: LanguagePair) -> Self {
        Self {
            interval,
            state: PipelineState::Idle,
            monitoring: false,
            auto_translate: true,
            manual_pending: false,
            languages,
            next_id: 1,
            in_flight: None,
            dispatched: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn languages(&self) -> LanguagePair {
        self.languages
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    pub fn auto_translate(&self) -> bool {
        self.auto_translate
    }

    /// Total dispatches since creation
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn start(&mut self) {
        self.monitoring = true;
    }

    /// Stop ticking. An attempt already in flight still reports back.
    pub fn stop(&mut self) {
        self.monitoring = false;
        self.manual_pending = false;
    }

    pub fn set_source(&mut self, source: OcrLanguage) {
        self.languages.source = source;
    }

    pub fn set_dest(&mut self, dest: OcrLanguage) {
        self.languages.dest = dest;
    }

    pub fn set_auto_translate(&mut self, enabled: bool) {
        self.auto_translate = enabled;
    }

    /// Arm a single dispatch even while auto-translate is off
    pub fn request_now(&mut self) {
        self.manual_pending = true;
    }

    pub fn tick(&mut self, tracker: &RegionTracker, last_consumed: Option<&ConsumedText>) -> TickDecision {
        if !self.monitoring {
            return TickDecision::Skip(SkipReason::NotMonitoring);
        }

        if tracker.is_dragging() {
            return TickDecision::Skip(SkipReason::Dragging);
        }

        let Some(region) = tracker.current_region() else {
            return TickDecision::Skip(SkipReason::NoRegion);
        };

        if !self.auto_translate && !self.manual_pending {
            return TickDecision::Skip(SkipReason::AutoTranslateOff);
        }

        let request = PipelineRequest {
            id: self.next_id,
            region,
            languages: self.languages,
            last_consumed: last_consumed.cloned(),
        };

        if self.state == PipelineState::Running {
            return TickDecision::Skip(SkipReason::InFlight);
        }

        self.next_id += 1;
        self.dispatched += 1;
        self.manual_pending = false;
        self.in_flight = Some(request.id);
        self.state = PipelineState::Running;
        tracing::debug!("[SCHEDULER] Dispatching #{} for {:?}", request.id, region);
        TickDecision::Dispatch(request)
    }

    /// The worker refused the request; free the slot
    pub fn dispatch_failed(&mut self, request_id: u64) {
        if self.in_flight == Some(request_id) {
            self.in_flight = None;
            self.state = PipelineState::Idle;
        }
    }

    /// Record completion. Returns false for an outcome that does not match
    /// the attempt in flight.
    pub fn complete(&mut self, completed: &Completed) -> bool {
        if self.in_flight != Some(completed.request_id) {
            tracing::warn!(
                "[SCHEDULER] Ignoring outcome for #{} (in flight: {:?})",
                completed.request_id,
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;
        self.state = match completed.outcome {
            Outcome::Failed { .. } => PipelineState::Failed,
            _ => PipelineState::Succeeded,
        };
        true
    }

    /// The sink has applied the outcome
    pub fn consumed(&mut self) {
        if matches!(self.state, PipelineState::Succeeded | PipelineState::Failed) {
            self.state = PipelineState::Idle;
        }
    }
}
