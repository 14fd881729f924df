//! Progress reporting.
//!
//! The engine emits one [`ProgressEvent`] per completed generation and a
//! single [`Completion`] when the run ends, however it ends. Observers see
//! copies of counters only and cannot influence the search.

use std::sync::mpsc::Sender;

/// Emitted after each generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressEvent {
    /// One-based index of the generation just completed.
    pub generation: usize,

    /// `generation / max_generations · 100`.
    pub progress_percent: f64,

    /// Archive size after pruning.
    pub archive_size: usize,

    /// Algorithm family name.
    pub algorithm: String,
}

/// Emitted once at the end of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Completion {
    /// Generations actually executed.
    pub generations: usize,

    /// Final archive size.
    pub archive_size: usize,

    /// Whether the run stopped early on cancellation or time limit.
    pub cancelled: bool,

    /// Algorithm family name.
    pub algorithm: String,
}

/// Receives progress notifications from a run.
pub trait ProgressObserver {
    /// Called after every generation.
    fn on_generation(&mut self, event: &ProgressEvent);

    /// Called exactly once when the run ends.
    fn on_complete(&mut self, _completion: &Completion) {}
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_generation(&mut self, _event: &ProgressEvent) {}
}

/// Message sent by [`ChannelProgress`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressMessage {
    Generation(ProgressEvent),
    Done(Completion),
}

/// Forwards notifications over an `mpsc` channel.
///
/// A dropped receiver is not an error: the run continues and later
/// messages are discarded.
#[derive(Debug)]
pub struct ChannelProgress {
    sender: Sender<ProgressMessage>,
    done: bool,
}

impl ChannelProgress {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self {
            sender,
            done: false,
        }
    }
}

impl ProgressObserver for ChannelProgress {
    fn on_generation(&mut self, event: &ProgressEvent) {
        if self.done {
            return;
        }
        if self
            .sender
            .send(ProgressMessage::Generation(event.clone()))
            .is_err()
        {
            log::trace!("progress receiver dropped at generation {}", event.generation);
        }
    }

    fn on_complete(&mut self, completion: &Completion) {
        if std::mem::replace(&mut self.done, true) {
            return;
        }
        if self
            .sender
            .send(ProgressMessage::Done(completion.clone()))
            .is_err()
        {
            log::trace!(
                "progress receiver dropped before completion after {} generations",
                completion.generations
            );
        }
    }
}

/// Collects every notification in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    pub events: Vec<ProgressEvent>,
    pub completion: Option<Completion>,
}

impl ProgressObserver for RecordingProgress {
    fn on_generation(&mut self, event: &ProgressEvent) {
        self.events.push(event.clone());
    }

    fn on_complete(&mut self, completion: &Completion) {
        self.completion = Some(completion.clone());
    }
}
