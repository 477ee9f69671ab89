use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::models::audio_models::{Chunk, DecodedBuffer, SampleSequence};
use crate::models::config::RecorderConfiguration;
use crate::models::error::RecorderError;
use crate::models::recording_result::{Base64Payload, EncodedArtifact};
use crate::models::state::RecorderState;
use crate::processing::sample_buffer::SampleBuffer;
use crate::processing::{merger, resampler, wav_format};
use crate::traits::byte_reader::ByteReader;
use crate::traits::capture_source::{CaptureSource, ChunkCallback};
use crate::traits::decoder::AudioDecoder;
use crate::traits::output_device::OutputDevice;
use crate::traits::recorder_delegate::RecorderDelegate;

/// Host capabilities a session drives.
#[derive(Clone)]
pub struct RecorderCollaborators {
    pub capture: Arc<dyn CaptureSource>,
    pub decoder: Arc<dyn AudioDecoder>,
    pub byte_reader: Arc<dyn ByteReader>,
    pub output: Arc<dyn OutputDevice>,
}

/// Internal mutable session state, protected by `parking_lot::Mutex`.
struct SessionState {
    state: RecorderState,
    buffer: SampleBuffer,
    authorized: bool,
    // Set while `stop()` waits for the capture source to shut down, so
    // chunks it flushes on the way out are still kept.
    draining: bool,
    playback_until: Option<Instant>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            buffer: SampleBuffer::new(),
            authorized: false,
            draining: false,
            playback_until: None,
        }
    }

    fn accepts_chunks(&self) -> bool {
        self.state.is_recording() || self.draining
    }

    fn playback_active(&self, now: Instant) -> bool {
        self.playback_until.is_some_and(|until| now <= until)
    }
}

/// Recorder orchestrator.
///
/// Collects chunks from the capture source while recording and, on stop,
/// drives the finalize pipeline:
/// ```text
/// [Chunks] → [AudioDecoder] → merge → compress → WAV encode → [ByteReader] → on_stop
/// ```
/// State lives behind a mutex that is never held across an `.await`; the
/// `Finalizing` state keeps a second `stop()` or a new `start()` out until the
/// pipeline has finished.
pub struct RecordingSession {
    config: RecorderConfiguration,
    capture: Arc<dyn CaptureSource>,
    decoder: Arc<dyn AudioDecoder>,
    byte_reader: Arc<dyn ByteReader>,
    output: Arc<dyn OutputDevice>,
    session_state: Arc<Mutex<SessionState>>,
    // Held across append + `on_data_available` so observers see chunks in
    // buffer order even when the capture source calls back from several threads.
    chunk_delivery: Arc<Mutex<()>>,
    delegate: Option<Arc<dyn RecorderDelegate>>,
}

impl RecordingSession {
    pub fn new(config: RecorderConfiguration, collaborators: RecorderCollaborators) -> Result<Self, RecorderError> {
        config.validate()?;
        Ok(Self {
            config,
            capture: collaborators.capture,
            decoder: collaborators.decoder,
            byte_reader: collaborators.byte_reader,
            output: collaborators.output,
            session_state: Arc::new(Mutex::new(SessionState::new())),
            chunk_delivery: Arc::new(Mutex::new(())),
            delegate: None,
        })
    }

    /// Build a session and, when `auto_authorize` is set, request capture
    /// permission before returning it.
    pub async fn connect(
        config: RecorderConfiguration,
        collaborators: RecorderCollaborators,
    ) -> Result<Self, RecorderError> {
        let session = Self::new(config, collaborators)?;
        if session.config.auto_authorize {
            session.authorize().await?;
        }
        Ok(session)
    }

    /// Register observer hooks. Takes effect for recordings started afterwards.
    pub fn set_delegate(&mut self, delegate: Arc<dyn RecorderDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn config(&self) -> &RecorderConfiguration {
        &self.config
    }

    pub fn state(&self) -> RecorderState {
        self.session_state.lock().state
    }

    /// Encoded bytes captured since the last clear.
    pub fn recorded_size(&self) -> usize {
        self.session_state.lock().buffer.recorded_size()
    }

    pub fn chunk_count(&self) -> usize {
        self.session_state.lock().buffer.len()
    }

    /// Mono sequence produced by the last finalize, before decimation.
    pub fn merged_samples(&self) -> Option<SampleSequence> {
        self.session_state.lock().buffer.samples().cloned()
    }

    /// Ask the capture source for microphone access.
    pub async fn authorize(&self) -> Result<(), RecorderError> {
        match self.capture.request_permission().await {
            Ok(()) => {
                self.session_state.lock().authorized = true;
                log::info!("Capture permission granted");
                Ok(())
            }
            Err(e) => {
                log::warn!("Capture permission request failed: {}", e);
                Err(e)
            }
        }
    }

    /// Start recording. Transitions: idle/stopped → recording.
    ///
    /// Previously captured chunks are discarded unless `keep_across_starts`.
    /// If the capture source fails to begin, the previous state and buffer are
    /// restored.
    pub fn start(&self) -> Result<(), RecorderError> {
        let (previous, discarded) = {
            let mut s = self.session_state.lock();
            if !s.authorized {
                return Err(RecorderError::InvalidState(
                    "capture permission has not been granted".into(),
                ));
            }
            if !s.state.can_start() {
                return Err(RecorderError::InvalidState(format!(
                    "cannot start while {}",
                    s.state.name()
                )));
            }
            let discarded = (!self.config.keep_across_starts).then(|| std::mem::take(&mut s.buffer));
            let previous = s.state;
            s.state = RecorderState::Recording;
            (previous, discarded)
        };

        let session_state = Arc::clone(&self.session_state);
        let chunk_delivery = Arc::clone(&self.chunk_delivery);
        let delegate = self.delegate.clone();
        let callback: ChunkCallback = Arc::new(move |chunk: Chunk| {
            let size = chunk.size();
            if let Err(e) = handle_chunk(&session_state, &chunk_delivery, delegate.as_deref(), chunk) {
                log::warn!("Dropping chunk of {} bytes: {}", size, e);
            }
        });

        if let Err(e) = self.capture.begin_capture(callback) {
            let mut s = self.session_state.lock();
            s.state = previous;
            if let Some(buffer) = discarded {
                s.buffer = buffer;
            }
            drop(s);
            log::error!("Failed to begin capture: {}", e);
            return Err(e);
        }

        self.notify_state(RecorderState::Recording);
        log::info!(
            "Recording started (keep_across_starts={}, {} chunks retained)",
            self.config.keep_across_starts,
            self.chunk_count()
        );
        Ok(())
    }

    /// Accept a chunk from the host. Only valid while recording.
    ///
    /// Empty chunks are reported to the delegate but not retained.
    pub fn on_chunk(&self, chunk: Chunk) -> Result<(), RecorderError> {
        handle_chunk(&self.session_state, &self.chunk_delivery, self.delegate.as_deref(), chunk)
    }

    /// Stop recording and finalize the buffered audio.
    /// Transitions: recording → finalizing → stopped.
    ///
    /// Returns the base64 WAV payload that is also handed to `on_stop`. On
    /// failure the session still ends up stopped and `on_error` fires. If the
    /// returned future is dropped before completion the session is left
    /// stopped without notifying `on_stop`.
    pub async fn stop(&self) -> Result<Base64Payload, RecorderError> {
        {
            let mut s = self.session_state.lock();
            if !s.state.is_recording() {
                return Err(RecorderError::InvalidState(format!(
                    "cannot stop while {}",
                    s.state.name()
                )));
            }
            s.state = RecorderState::Finalizing;
            s.draining = true;
        }
        self.notify_state(RecorderState::Finalizing);

        let guard = FinalizeGuard {
            session_state: Arc::clone(&self.session_state),
            delegate: self.delegate.clone(),
        };

        if let Err(e) = self.capture.end_capture() {
            log::warn!("Capture source did not stop cleanly: {}", e);
        }

        let chunks = {
            let mut s = self.session_state.lock();
            s.draining = false;
            s.buffer.snapshot()
        };

        let result = self.finalize(&chunks).await;
        drop(guard);

        match result {
            Ok(payload) => {
                log::info!(
                    "Recording finalized: {} chunks, {} WAV bytes",
                    chunks.len(),
                    payload.length
                );
                if let Some(ref delegate) = self.delegate {
                    delegate.on_stop(&payload);
                }
                Ok(payload)
            }
            Err(e) => {
                log::error!("Failed to finalize recording: {}", e);
                if let Some(ref delegate) = self.delegate {
                    delegate.on_error(&e);
                }
                Err(e)
            }
        }
    }

    /// Preview the current recording through the output device.
    ///
    /// Returns `Ok(false)` without playing while an earlier preview is still
    /// within its duration.
    pub async fn play(&self) -> Result<bool, RecorderError> {
        let chunks = {
            let s = self.session_state.lock();
            if s.buffer.is_empty() {
                return Err(RecorderError::InvalidState("nothing recorded to play".into()));
            }
            if s.playback_active(Instant::now()) {
                log::debug!("Playback already in progress, ignoring play request");
                return Ok(false);
            }
            s.buffer.snapshot()
        };

        let merged = self.decode_merged(&chunks).await?;

        {
            let mut s = self.session_state.lock();
            let now = Instant::now();
            if s.playback_active(now) {
                log::debug!("Playback started while decoding, ignoring play request");
                return Ok(false);
            }
            s.playback_until = Some(now + Duration::from_secs_f64(merged.duration_secs()));
        }

        self.output.play_buffer(&merged, merged.sample_rate());
        Ok(true)
    }

    /// Encode the current buffer as WAV without changing state.
    pub async fn get_wav(&self) -> Result<EncodedArtifact, RecorderError> {
        let chunks = self.session_state.lock().buffer.snapshot();
        self.merge_chunks_to_wav(&chunks).await
    }

    /// Encode the current buffer and convert it to base64.
    pub async fn get_base64(&self) -> Result<Base64Payload, RecorderError> {
        let artifact = self.get_wav().await?;
        self.to_payload(&artifact).await
    }

    /// Decode and merge the current buffer without decimating or encoding.
    pub async fn decode_all(&self) -> Result<SampleSequence, RecorderError> {
        let chunks = self.session_state.lock().buffer.snapshot();
        self.decode_merged(&chunks).await
    }

    /// Encode `chunks`, or the current buffer when `None`, as WAV.
    pub async fn merge_chunks(&self, chunks: Option<&[Chunk]>) -> Result<EncodedArtifact, RecorderError> {
        match chunks {
            Some(chunks) => self.merge_chunks_to_wav(chunks).await,
            None => self.get_wav().await,
        }
    }

    /// Decode two chunks and concatenate their channel-0 samples.
    pub async fn merge_chunk_pair(&self, first: &Chunk, second: &Chunk) -> Result<SampleSequence, RecorderError> {
        let a = self.decoder.decode(first).await?;
        let b = self.decoder.decode(second).await?;
        Ok(merger::merge_pair(&a.to_mono_sequence(), &b.to_mono_sequence()))
    }

    // --- Internal helpers ---

    fn notify_state(&self, state: RecorderState) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(state);
        }
    }

    async fn finalize(&self, chunks: &[Chunk]) -> Result<Base64Payload, RecorderError> {
        let merged = self.decode_merged(chunks).await?;
        self.session_state.lock().buffer.set_samples(merged.clone());

        let artifact = self.encode_samples(&merged)?;
        self.to_payload(&artifact).await
    }

    async fn merge_chunks_to_wav(&self, chunks: &[Chunk]) -> Result<EncodedArtifact, RecorderError> {
        let merged = self.decode_merged(chunks).await?;
        self.encode_samples(&merged)
    }

    async fn decode_merged(&self, chunks: &[Chunk]) -> Result<SampleSequence, RecorderError> {
        if chunks.is_empty() {
            return Err(RecorderError::EmptyInput);
        }
        let mut buffers: Vec<DecodedBuffer> = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            buffers.push(self.decoder.decode(chunk).await?);
        }
        merger::merge(&buffers)
    }

    /// Decimate with the configured rates, then encode at the effective rate and depth.
    fn encode_samples(&self, merged: &SampleSequence) -> Result<EncodedArtifact, RecorderError> {
        let compressed = resampler::compress(
            merged,
            self.config.input_sample_rate,
            self.config.output_sample_rate,
        )?;
        wav_format::encode(
            compressed.samples(),
            self.config.effective_sample_rate(),
            self.config.effective_sample_bits(),
        )
    }

    async fn to_payload(&self, artifact: &EncodedArtifact) -> Result<Base64Payload, RecorderError> {
        let base64 = self.byte_reader.to_base64(artifact).await?;
        Ok(Base64Payload {
            base64,
            length: artifact.len(),
        })
    }
}

/// Append a chunk if the session is accepting them and notify the delegate.
///
/// `chunk_delivery` serializes concurrent callers so notifications follow
/// append order. The state lock is released before the delegate runs.
fn handle_chunk(
    session_state: &Mutex<SessionState>,
    chunk_delivery: &Mutex<()>,
    delegate: Option<&dyn RecorderDelegate>,
    chunk: Chunk,
) -> Result<(), RecorderError> {
    let _ordered = chunk_delivery.lock();
    {
        let mut s = session_state.lock();
        if !s.accepts_chunks() {
            return Err(RecorderError::InvalidState(format!(
                "cannot accept chunks while {}",
                s.state.name()
            )));
        }
        if !chunk.is_empty() {
            s.buffer.append(chunk.clone());
            log::debug!(
                "Buffered chunk #{} ({} bytes, {} total)",
                s.buffer.len(),
                chunk.size(),
                s.buffer.recorded_size()
            );
        }
    }

    if let Some(delegate) = delegate {
        delegate.on_data_available(&chunk);
    }
    Ok(())
}

/// Moves a finalizing session to `Stopped`, including when `stop()` is dropped mid-way.
struct FinalizeGuard {
    session_state: Arc<Mutex<SessionState>>,
    delegate: Option<Arc<dyn RecorderDelegate>>,
}

impl Drop for FinalizeGuard {
    fn drop(&mut self) {
        let stopped = {
            let mut s = self.session_state.lock();
            s.draining = false;
            if s.state.is_finalizing() {
                s.state = RecorderState::Stopped;
                true
            } else {
                false
            }
        };
        if stopped {
            if let Some(ref delegate) = self.delegate {
                delegate.on_state_changed(RecorderState::Stopped);
            }
        }
    }
}
