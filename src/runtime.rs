//! Tokio event loop for the controller.
//!
//! One task owns the [`AcController`] and multiplexes three sources: commands
//! from the UI, events from the profile and the debounce deadline. The
//! controller is not `Send`, so the loop runs on the task that created it.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant};

use crate::core::controller::AcController;
use crate::search::{Profile, ProfileEvent};

/// Requests from the UI side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetSearchText(String),
    Select(i32),
    Shutdown,
}

/// Cloneable sender half for driving a running loop.
#[derive(Debug, Clone)]
pub struct OmniboxHandle {
    commands: UnboundedSender<Command>,
}

impl OmniboxHandle {
    pub fn set_search_text(&self, text: &str) -> bool {
        self.send(Command::SetSearchText(text.to_string()))
    }

    pub fn select(&self, index: i32) -> bool {
        self.send(Command::Select(index))
    }

    pub fn shutdown(&self) -> bool {
        self.send(Command::Shutdown)
    }

    /// Returns false if the loop has already stopped.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }
}

/// Create a handle and the command receiver to pass to [`run`].
pub fn channel() -> (OmniboxHandle, UnboundedReceiver<Command>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OmniboxHandle { commands: tx }, rx)
}

/// Drive `controller` until a [`Command::Shutdown`] arrives or every handle
/// is dropped, then hand the controller back.
pub async fn run<P: Profile>(
    mut controller: AcController<P>,
    mut commands: UnboundedReceiver<Command>,
    mut events: UnboundedReceiver<ProfileEvent>,
) -> AcController<P> {
    let mut deadline: Option<Instant> = None;
    let mut events_open = true;

    loop {
        let wake = deadline.unwrap_or_else(Instant::now);

        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::SetSearchText(text)) => {
                    let before = controller.generation();
                    controller.set_search_text(&text);
                    if controller.generation() != before {
                        deadline = Some(Instant::now() + controller.debounce_delay());
                    }
                }
                Some(Command::Select(index)) => {
                    if let Err(e) = controller.set_selection(index) {
                        tracing::warn!("rejected selection: {}", e);
                    }
                }
                Some(Command::Shutdown) | None => break,
            },

            _ = sleep_until(wake), if deadline.is_some() => {
                deadline = None;
                controller.fire_timer();
            }

            event = events.recv(), if events_open => match event {
                Some(event) => controller.handle_event(event),
                None => {
                    tracing::debug!("profile event channel closed");
                    events_open = false;
                }
            },
        }
    }

    tracing::debug!(generation = controller.generation(), "event loop stopped");
    controller
}
