//! Task lifecycle events.
//!
//! A [`TaskEvent`] is an immutable record of one step in a background task's
//! life: scheduled, started, completed, failed, expired or cancelled. Events
//! are built once by a producer and never mutated after they are stored.
//!
//! The event type is an open tag. The six lifecycle tags are known variants
//! of [`EventType`]; anything else round-trips through
//! [`EventType::Custom`]. No ordering between types is enforced here or
//! anywhere downstream.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::environment::EnvironmentInfo;
use crate::metadata::{Metadata, MetadataValue};

/// Lifecycle tag of a [`TaskEvent`].
///
/// Serialized as its string tag, e.g. `"taskScheduled"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// The task was submitted for later execution.
    TaskScheduled,
    /// The task began executing.
    TaskExecutionStarted,
    /// The task finished executing.
    TaskExecutionCompleted,
    /// The task failed.
    TaskFailed,
    /// The task ran out of time before completing.
    TaskExpired,
    /// The task was cancelled.
    TaskCancelled,
    /// Any other producer-defined tag.
    Custom(String),
}

impl EventType {
    /// Every known lifecycle tag, in lifecycle order.
    pub const KNOWN: [EventType; 6] = [
        EventType::TaskScheduled,
        EventType::TaskExecutionStarted,
        EventType::TaskExecutionCompleted,
        EventType::TaskFailed,
        EventType::TaskExpired,
        EventType::TaskCancelled,
    ];

    /// String tag of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TaskScheduled => "taskScheduled",
            Self::TaskExecutionStarted => "taskExecutionStarted",
            Self::TaskExecutionCompleted => "taskExecutionCompleted",
            Self::TaskFailed => "taskFailed",
            Self::TaskExpired => "taskExpired",
            Self::TaskCancelled => "taskCancelled",
            Self::Custom(tag) => tag,
        }
    }

    /// Parse a tag. Unknown tags become [`EventType::Custom`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "taskScheduled" => Self::TaskScheduled,
            "taskExecutionStarted" => Self::TaskExecutionStarted,
            "taskExecutionCompleted" => Self::TaskExecutionCompleted,
            "taskFailed" => Self::TaskFailed,
            "taskExpired" => Self::TaskExpired,
            "taskCancelled" => Self::TaskCancelled,
            other => Self::Custom(other.to_string()),
        }
    }

    /// True for completed, failed, expired and cancelled.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::TaskExecutionCompleted | Self::TaskFailed | Self::TaskExpired | Self::TaskCancelled
        )
    }

    /// True for producer-defined tags.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        match Self::from_tag(&tag) {
            Self::Custom(_) => Self::Custom(tag),
            known => known,
        }
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Custom(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// One task lifecycle event.
///
/// # Example
///
/// ```rust
/// use tasklens_events::{EventType, TaskEvent};
///
/// let event = TaskEvent::execution_completed("sync-contacts", 1.25, true)
///     .with_metadata("records", 42);
///
/// assert_eq!(event.event_type, EventType::TaskExecutionCompleted);
/// assert_eq!(event.duration, Some(1.25));
/// assert!(event.success);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Unique event id.
    pub id: Uuid,
    /// Lifecycle tag.
    pub event_type: EventType,
    /// Identifier of the task this event belongs to.
    pub task_identifier: String,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Execution time in seconds, when the event measures one.
    ///
    /// Non-finite values are omitted on serialization.
    #[serde(default, skip_serializing_if = "is_absent_duration")]
    pub duration: Option<f64>,
    /// Outcome flag.
    pub success: bool,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Free-form producer metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Host state at capture time.
    #[serde(default)]
    pub environment: EnvironmentInfo,
}

impl TaskEvent {
    /// Create an event stamped now, with a fresh id, `success = true` and no
    /// duration, error, metadata or environment.
    pub fn new(event_type: impl Into<EventType>, task_identifier: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            task_identifier: task_identifier.into(),
            timestamp: Utc::now(),
            duration: None,
            success: true,
            error_message: None,
            metadata: Metadata::new(),
            environment: EnvironmentInfo::default(),
        }
    }

    /// `taskScheduled` event.
    pub fn scheduled(task_identifier: impl Into<String>) -> Self {
        Self::new(EventType::TaskScheduled, task_identifier)
    }

    /// `taskExecutionStarted` event.
    pub fn execution_started(task_identifier: impl Into<String>) -> Self {
        Self::new(EventType::TaskExecutionStarted, task_identifier)
    }

    /// `taskExecutionCompleted` event with its execution time in seconds.
    pub fn execution_completed(
        task_identifier: impl Into<String>,
        duration_secs: f64,
        success: bool,
    ) -> Self {
        Self::new(EventType::TaskExecutionCompleted, task_identifier)
            .with_duration(duration_secs)
            .with_success(success)
    }

    /// `taskFailed` event carrying an error message.
    pub fn failed(task_identifier: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self::new(EventType::TaskFailed, task_identifier).with_error_message(error_message)
    }

    /// `taskExpired` event.
    pub fn expired(task_identifier: impl Into<String>) -> Self {
        Self::new(EventType::TaskExpired, task_identifier).with_success(false)
    }

    /// `taskCancelled` event.
    pub fn cancelled(task_identifier: impl Into<String>) -> Self {
        Self::new(EventType::TaskCancelled, task_identifier).with_success(false)
    }

    /// Replace the id.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Replace the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the duration in seconds.
    ///
    /// NaN and infinite values are not recorded; the duration is cleared
    /// instead.
    #[must_use]
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration = Some(duration_secs).filter(|secs| secs.is_finite());
        self
    }

    /// Set the duration from a [`Duration`].
    #[must_use]
    pub fn with_elapsed(self, elapsed: Duration) -> Self {
        self.with_duration(elapsed.as_secs_f64())
    }

    /// Set the outcome flag.
    #[must_use]
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Attach an error message and mark the event unsuccessful.
    #[must_use]
    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self.success = false;
        self
    }

    /// Insert one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach a host environment snapshot.
    #[must_use]
    pub fn with_environment(mut self, environment: EnvironmentInfo) -> Self {
        self.environment = environment;
        self
    }

    /// Duration as a [`Duration`], if present, finite and non-negative.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.duration
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

fn is_absent_duration(duration: &Option<f64>) -> bool {
    !duration.is_some_and(f64::is_finite)
}
