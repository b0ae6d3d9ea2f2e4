use super::{AppConfig, SessionConfig, SquelchScan};
use crate::audio::{Aggressiveness, DecodeSpan};
use crate::error::RecorderError;
use clap::Parser;

fn parse(args: &[&str]) -> AppConfig {
    let mut full = vec!["squelchrec", "-f", "out.wav"];
    full.extend_from_slice(args);
    AppConfig::parse_from(full)
}

#[test]
fn accepts_defaults() {
    let cfg = parse(&[]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.rate, 8_000);
    assert_eq!(cfg.channels, 1);
    assert_eq!(cfg.frame_ms, 30);
    assert_eq!(cfg.squelch_hang_ms, 300);
    assert_eq!(cfg.squelch_threshold_db, -120.0);
    assert!(!cfg.vad);
}

#[test]
fn requires_output_file_unless_listing_devices() {
    assert!(AppConfig::try_parse_from(["squelchrec"]).is_err());
    let cfg = AppConfig::parse_from(["squelchrec", "--list-devices"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_unsupported_sample_rates() {
    let cfg = parse(&["--rate", "44100"]);
    assert!(cfg.validate().is_err());
    for rate in ["8000", "16000", "32000", "48000"] {
        let cfg = parse(&["--rate", rate]);
        assert!(cfg.validate().is_ok(), "rate {rate} should validate");
    }
}

#[test]
fn rejects_zero_channels() {
    let cfg = parse(&["--channels", "0"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_frame_duration_out_of_bounds() {
    assert!(parse(&["--frame-ms", "4"]).validate().is_err());
    assert!(parse(&["--frame-ms", "121"]).validate().is_err());
    assert!(parse(&["--frame-ms", "30"]).validate().is_ok());
}

#[test]
fn rejects_hang_time_shorter_than_a_frame() {
    let cfg = parse(&["--frame-ms", "30", "--squelch-hang-ms", "20"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn voice_gating_restricts_frame_duration_and_channels() {
    assert!(parse(&["--vad", "--frame-ms", "25"]).validate().is_err());
    assert!(parse(&["--vad", "--channels", "2"]).validate().is_err());
    #[cfg(feature = "vad_earshot")]
    assert!(parse(&["--vad", "--frame-ms", "20"]).validate().is_ok());
}

#[test]
fn aggressiveness_is_bounded_at_parse_time() {
    let mut args = vec!["squelchrec", "-f", "out.wav", "--vad-aggressiveness", "4"];
    assert!(AppConfig::try_parse_from(args.clone()).is_err());
    args[4] = "3";
    assert!(AppConfig::try_parse_from(args).is_ok());
}

#[test]
fn threshold_above_zero_clamps_instead_of_failing() {
    let cfg = parse(&["--squelch-threshold-db", "6.0"]);
    assert!(cfg.validate().is_ok());
    let session = cfg.session_config();
    assert!((session.linear_threshold() - 1.0).abs() < 1e-6);
}

#[test]
fn session_snapshot_carries_validated_values() {
    let cfg = parse(&[
        "--rate",
        "16000",
        "--vad",
        "--frame-ms",
        "20",
        "--vad-aggressiveness",
        "1",
        "--squelch-scan",
        "full",
    ]);
    #[cfg(feature = "vad_earshot")]
    assert!(cfg.validate().is_ok());
    let session = cfg.session_config();
    assert_eq!(session.sample_rate, 16_000);
    assert_eq!(session.frame_ms, 20);
    assert!(session.use_voice_gate);
    assert_eq!(session.aggressiveness, Aggressiveness::LowBitrate);
    assert_eq!(session.decode_span, DecodeSpan::Full);
    assert_eq!(cfg.squelch_scan, SquelchScan::Full);
}

#[test]
fn default_scan_preserves_half_frame_decode() {
    let session = parse(&[]).session_config();
    assert_eq!(session.decode_span, DecodeSpan::FirstHalf);
}

#[test]
fn chunk_size_follows_rate_channels_and_duration() {
    let session = parse(&[]).session_config();
    // 1 channel * 8000 Hz * 30 ms / 1000 = 240 samples = 480 bytes.
    assert_eq!(session.chunk_samples().unwrap(), 240);
    assert_eq!(session.chunk_bytes().unwrap(), 480);
}

#[test]
fn zero_sized_chunk_is_a_config_error() {
    let session = SessionConfig {
        sample_rate: 8_000,
        channels: 1,
        frame_ms: 0,
        hang_ms: 300,
        threshold_db: -120.0,
        use_voice_gate: false,
        aggressiveness: Aggressiveness::VeryAggressive,
        decode_span: DecodeSpan::FirstHalf,
    };
    let err = session.chunk_bytes().unwrap_err();
    assert!(matches!(err, RecorderError::Config(_)));
}
