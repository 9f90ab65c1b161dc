//! Voice infrastructure - hosted speech-to-text and text-to-speech adapters

pub mod synthesis;
pub mod transcription;

pub use synthesis::{HostedSpeechSynthesizer, SynthesisConfig};
pub use transcription::{HostedTranscriber, TranscriptionConfig};
