//! Inference pipeline worker
//!
//! Channel-based interface around [`InferenceClient`]: the UI thread sends
//! commands and polls events, a worker thread owns the tokio runtime and the
//! network call. The prompt contract is enforced here, at the boundary input.

use crate::inference::client::{InferenceClient, InferenceConfig};
use crate::inference::schema::validate_prompt;
use crate::{HablaError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

/// Commands that can be sent to the inference pipeline
#[derive(Debug, Clone)]
pub enum InferenceCommand {
    /// Generate a reply for the given prompt
    Generate {
        prompt: String,
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the inference pipeline
#[derive(Debug, Clone)]
pub enum InferenceEvent {
    /// A reply is ready (the fixed fallback string on transport failure)
    Reply {
        text: String,
        request_id: Uuid,
    },

    /// The prompt was rejected or the worker failed
    Error {
        error: String,
        request_id: Option<Uuid>,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Inference pipeline with channel-based communication
pub struct InferencePipeline {
    config: InferenceConfig,
    command_tx: Sender<InferenceCommand>,
    command_rx: Receiver<InferenceCommand>,
    event_tx: Sender<InferenceEvent>,
    event_rx: Receiver<InferenceEvent>,
}

impl InferencePipeline {
    pub fn new(config: InferenceConfig) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    pub fn command_sender(&self) -> Sender<InferenceCommand> {
        self.command_tx.clone()
    }

    pub fn event_receiver(&self) -> Receiver<InferenceEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread.
    pub fn start_worker(self) -> Result<()> {
        self.config.validate()?;

        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Inference pipeline worker starting");

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(InferenceEvent::Error {
                        error: format!("Runtime creation failed: {}", e),
                        request_id: None,
                    });
                    let _ = event_tx.send(InferenceEvent::Shutdown);
                    return;
                }
            };

            let client = InferenceClient::new(config);

            while let Ok(command) = command_rx.recv() {
                match command {
                    InferenceCommand::Generate { prompt, request_id } => {
                        if let Err(e) = validate_prompt(&prompt) {
                            let _ = event_tx.send(InferenceEvent::Error {
                                error: e.user_message(),
                                request_id: Some(request_id),
                            });
                            continue;
                        }

                        let text = runtime.block_on(client.generate(&prompt));
                        let _ = event_tx.send(InferenceEvent::Reply { text, request_id });
                    }
                    InferenceCommand::Shutdown => {
                        info!("Inference pipeline shutting down");
                        break;
                    }
                }
            }

            let _ = event_tx.send(InferenceEvent::Shutdown);
        });

        Ok(())
    }
}

impl From<crossbeam_channel::SendError<InferenceCommand>> for HablaError {
    fn from(e: crossbeam_channel::SendError<InferenceCommand>) -> Self {
        HablaError::ChannelError(e.to_string())
    }
}
