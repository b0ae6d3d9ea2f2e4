use anyhow::{Context, Result};
use squelchrec::audio::{self, FrameSink, Gate, NullVoiceGate, Recorder, VoiceGate, WavSink};
use squelchrec::config::{AppConfig, SessionConfig};
use squelchrec::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    telemetry::init_tracing(&config);

    if config.list_devices {
        print_device_list();
        return Ok(());
    }

    let session = config.session_config();
    let chunk_bytes = session.chunk_bytes()?;
    let file = config.file.clone().context("--file is required")?;

    info!(
        file = %file.display(),
        rate = session.sample_rate,
        channels = session.channels,
        frame_ms = session.frame_ms,
        hang_ms = session.hang_ms,
        threshold_db = session.threshold_db,
        threshold_pct = format!("{:.3}", session.linear_threshold() * 100.0).as_str(),
        chunk_bytes,
        "session configured"
    );
    if session.use_voice_gate {
        info!(
            aggressiveness = session.aggressiveness.label(),
            "voice gate enabled"
        );
    }

    let recorder =
        Recorder::new(config.input_device.as_deref()).context("failed to open input device")?;
    info!(device = recorder.device_name().as_str(), "recording");

    let mut source = recorder
        .open_stream(&session)
        .context("failed to start capture stream")?;
    let mut sink = WavSink::create(&file, session.sample_rate, session.channels)
        .with_context(|| format!("failed to create '{}'", file.display()))?;
    let mut gate = Gate::new(&session);
    let mut voice = build_voice_gate(&session)?;

    install_interrupt_handler();

    // The sink is finalized on the error path too, so an interrupted or
    // failed session still leaves a playable WAV with what was captured.
    let outcome = audio::run(
        &mut source,
        &mut sink,
        &mut gate,
        voice.as_mut(),
        &STOP_REQUESTED,
    );
    let finalized = sink.finalize();
    let metrics = outcome?;
    finalized.context("failed to finalize output file")?;

    info!(
        stop_reason = metrics.stop_reason.label(),
        frames_processed = metrics.frames_processed,
        frames_emitted = metrics.frames_emitted,
        frames_dropped = metrics.frames_dropped,
        squelch_opens = metrics.squelch_opens,
        voice_detections = metrics.voice_detections,
        capture_ms = metrics.capture_ms,
        "capture finished"
    );
    if config.json_summary {
        println!("{}", serde_json::to_string(&metrics)?);
    }
    Ok(())
}

fn print_device_list() {
    match Recorder::list_devices() {
        Ok(devices) if devices.is_empty() => println!("No audio input devices found"),
        Ok(devices) => {
            println!("Detected audio input devices:");
            for (index, device) in devices.iter().enumerate() {
                println!(
                    "[{index:3}] {} (channels: {}, sample rate: {} Hz)",
                    device.name, device.channels, device.default_sample_rate
                );
            }
        }
        Err(err) => println!("Failed to list audio input devices: {err}"),
    }
}

fn build_voice_gate(session: &SessionConfig) -> Result<Box<dyn VoiceGate>> {
    if !session.use_voice_gate {
        return Ok(Box::new(NullVoiceGate));
    }
    #[cfg(feature = "vad_earshot")]
    {
        Ok(Box::new(squelchrec::vad_earshot::EarshotVoiceGate::new(
            session.aggressiveness,
        )))
    }
    #[cfg(not(feature = "vad_earshot"))]
    {
        anyhow::bail!("voice gating requires building with the 'vad_earshot' feature")
    }
}

#[cfg(unix)]
fn install_interrupt_handler() {
    extern "C" fn on_interrupt(_sig: libc::c_int) {
        STOP_REQUESTED.store(true, Ordering::Relaxed);
    }
    let handler = on_interrupt as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        libc::signal(libc::SIGTERM, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler() {}
