//! vocabtutor-speech: Pronunciation backends.
//!
//! Implements the `Pronunciation` seam from `vocabtutor-core` with a
//! Google Cloud Text-to-Speech client, a local espeak-ng engine, and a
//! silent fallback, chained by [`Pronouncer`].

pub mod audio;
pub mod error;
pub mod factory;
pub mod google;
pub mod local;
pub mod mock;
pub mod pronouncer;
pub mod synth;
pub mod voices;

pub use error::SynthesisError;
pub use factory::create_pronouncer;
pub use pronouncer::{Pronouncer, SpeechOutcome};
pub use synth::{NullSynthesizer, Synthesizer};
