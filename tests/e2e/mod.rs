// End-to-end tests for the Kokoro TTS API
//
// Each test boots the real router on an ephemeral port. The inference
// sidecar is replaced by an in-process fake backend so tests are hermetic,
// and every context gets its own scratch directory for audio files.

mod test_tts;
mod test_voices;
