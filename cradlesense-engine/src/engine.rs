//! The pipeline engine
//!
//! Wires the classifiers, the dispatcher, and the telemetry store into
//! the per-run operations. Everything the engine depends on comes in
//! through a seam (backend, key source, actuator link, allocator, clock),
//! so integration tests run the whole pipeline against in-memory doubles.

use std::sync::Mutex;

use log::debug;
use thiserror::Error;

use cradlesense_actuators::{
    ActuatorLink, DispatchReport, Dispatcher, HttpConfig, HttpLink, LinkError,
};
use cradlesense_core::{
    mean_brightness, Allocator, Assignment, Classification, ClassifyError, GestureClassifier,
    HealthReading, MoodEstimator, MoodReading, TemperatureMonitor, WINDOW,
    time::{SystemClock, TimeSource},
};
use cradlesense_store::{
    Backend, Channel, Consent, EntryId, KeySource, ReadOutcome, StoreError, TelemetryStore,
};
use serde::{Deserialize, Serialize};

use crate::{baseline::BaselineRegistry, config::EngineConfig};

/// Pipeline errors surfaced to the caller
///
/// Actuator failures never appear here: dispatch fails open and is
/// reported through [`DispatchReport`] instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or undersized input; aborts only the current run
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Telemetry could not be persisted or read
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of one sample run
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    /// Gesture classification for this sample
    pub classification: Classification,
    /// Mood estimated from mean brightness
    pub mood: MoodReading,
    /// What the dispatcher did about the gesture
    pub dispatch: DispatchReport,
    /// Store entry id of the gesture record
    pub gesture_entry: EntryId,
    /// Store entry id of the mood record
    pub mood_entry: EntryId,
}

/// Result of one temperature run
#[derive(Debug, Clone)]
pub struct HealthOutcome {
    /// Classified reading
    pub reading: HealthReading,
    /// What the dispatcher did about the status
    pub dispatch: DispatchReport,
    /// Store entry id of the health record
    pub entry: EntryId,
}

/// A community calendar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityEvent {
    /// Event name
    pub name: String,
    /// Event time as submitted by the calendar collaborator
    pub time: String,
}

/// The classification → actuation → telemetry pipeline
pub struct Engine<B: Backend, K: KeySource, L: ActuatorLink> {
    store: TelemetryStore<B, K>,
    dispatcher: Dispatcher<L>,
    gestures: GestureClassifier,
    temperature: TemperatureMonitor,
    mood: MoodEstimator,
    allocator: Mutex<Box<dyn Allocator + Send>>,
    baselines: BaselineRegistry,
    clock: Box<dyn TimeSource + Send + Sync>,
}

impl<B: Backend, K: KeySource, L: ActuatorLink> Engine<B, K, L> {
    /// Assemble an engine from its collaborators
    pub fn new(
        config: &EngineConfig,
        backend: B,
        keys: K,
        link: L,
        allocator: Box<dyn Allocator + Send>,
    ) -> Self {
        Self {
            store: TelemetryStore::new(backend, keys),
            dispatcher: Dispatcher::new(link),
            gestures: GestureClassifier::default(),
            temperature: TemperatureMonitor::new_with_threshold(config.fever_threshold),
            mood: MoodEstimator::new_with_threshold(config.smile_threshold),
            allocator: Mutex::new(allocator),
            baselines: BaselineRegistry::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock (tests pin time with `FixedClock`)
    pub fn with_clock(mut self, clock: impl TimeSource + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

impl<B: Backend, K: KeySource> Engine<B, K, HttpLink> {
    /// Assemble an engine wired to the companion device over HTTP
    ///
    /// Builds the transport from the config's base address and timeout.
    /// Fails only on a malformed base address; an unreachable device is a
    /// per-command, fail-open condition, not a construction error.
    pub fn connect(
        config: &EngineConfig,
        backend: B,
        keys: K,
        allocator: Box<dyn Allocator + Send>,
    ) -> Result<Self, LinkError> {
        let link = HttpLink::new(
            HttpConfig::new(config.hardware_base_url.clone()).timeout(config.actuator_timeout()),
        )?;
        Ok(Self::new(config, backend, keys, link, allocator))
    }
}

impl<B: Backend, K: KeySource, L: ActuatorLink> Engine<B, K, L> {
    /// Run one camera sample through the full pipeline
    ///
    /// Classifies gesture and mood, fires the mapped actuator commands,
    /// persists both records, and replaces the user's baseline with the
    /// current window. Same-user runs are serialized on the baseline cell;
    /// dispatch happens after it is released.
    pub fn process_sample(&self, user: &str, sample: &[f64]) -> Result<SampleOutcome, EngineError> {
        let now = self.clock.now();

        let cell = self.baselines.cell(user);
        let (classification, mood) = {
            let mut baseline = cell.lock().unwrap();
            let classification = self.gestures.classify(sample, &baseline)?;
            let mood = self.mood.estimate(mean_brightness(sample)?, now)?;

            // The run is now going to happen: this window becomes the next
            // run's baseline
            baseline.clear();
            baseline.extend_from_slice(&sample[..WINDOW]);
            (classification, mood)
        };

        debug!(
            "sample run for {}: {} (motion {:.1})",
            user,
            classification.kind.name(),
            classification.motion
        );

        // Side effects outside the baseline lock; failures logged, not raised
        let dispatch = self.dispatcher.dispatch_gesture(classification.kind);

        let gesture_entry = self.store.write(user, Channel::Gestures, &classification)?;
        let mood_entry = self.store.write(user, Channel::Moods, &mood)?;

        Ok(SampleOutcome {
            classification,
            mood,
            dispatch,
            gesture_entry,
            mood_entry,
        })
    }

    /// Run one temperature reading through the pipeline
    pub fn process_temperature(
        &self,
        user: &str,
        temperature: f64,
    ) -> Result<HealthOutcome, EngineError> {
        let reading = self.temperature.check(temperature, self.clock.now())?;
        debug!(
            "temperature run for {}: {:.1} °C is {}",
            user,
            reading.temperature,
            reading.status.name()
        );
        let dispatch = self.dispatcher.dispatch_health(reading.status);
        let entry = self.store.write(user, Channel::Health, &reading)?;

        Ok(HealthOutcome {
            reading,
            dispatch,
            entry,
        })
    }

    /// Assign a batch of tasks and persist the assignments
    pub fn allocate_tasks(
        &self,
        user: &str,
        tasks: &[&str],
    ) -> Result<Vec<Assignment>, EngineError> {
        let assignments = self.allocator.lock().unwrap().assign(tasks);
        for assignment in &assignments {
            self.store.write(user, Channel::Tasks, assignment)?;
        }
        Ok(assignments)
    }

    /// Append a community calendar event (device-shared channel)
    pub fn record_community_event(&self, name: &str, time: &str) -> Result<EntryId, EngineError> {
        let event = CommunityEvent {
            name: name.to_string(),
            time: time.to_string(),
        };
        // Shared channel: the user argument is ignored by its path
        Ok(self.store.write("", Channel::CommunityEvents, &event)?)
    }

    /// Overwrite the user's data-collection consent flag
    pub fn record_consent(&self, user: &str, agreed: bool) -> Result<(), EngineError> {
        let consent = Consent {
            agreed,
            timestamp: self.clock.now(),
        };
        Ok(self.store.write_consent(user, consent)?)
    }

    /// Current consent flag, if ever set
    pub fn consent(&self, user: &str) -> Result<Option<Consent>, EngineError> {
        Ok(self.store.read_consent(user)?)
    }

    /// Decrypted gesture history with skip accounting
    pub fn gesture_history(&self, user: &str) -> Result<ReadOutcome<Classification>, EngineError> {
        Ok(self.store.read(user, Channel::Gestures)?)
    }

    /// Decrypted mood history with skip accounting
    pub fn mood_history(&self, user: &str) -> Result<ReadOutcome<MoodReading>, EngineError> {
        Ok(self.store.read(user, Channel::Moods)?)
    }

    /// Decrypted health history with skip accounting
    pub fn health_history(&self, user: &str) -> Result<ReadOutcome<HealthReading>, EngineError> {
        Ok(self.store.read(user, Channel::Health)?)
    }

    /// Decrypted task assignment history with skip accounting
    pub fn task_history(&self, user: &str) -> Result<ReadOutcome<Assignment>, EngineError> {
        Ok(self.store.read(user, Channel::Tasks)?)
    }

    /// Community event history (shared across users)
    pub fn community_events(&self) -> Result<ReadOutcome<CommunityEvent>, EngineError> {
        Ok(self.store.read("", Channel::CommunityEvents)?)
    }

    /// The underlying telemetry store
    pub fn store(&self) -> &TelemetryStore<B, K> {
        &self.store
    }

    /// The dispatcher, for cumulative delivery counters
    pub fn dispatcher(&self) -> &Dispatcher<L> {
        &self.dispatcher
    }
}
