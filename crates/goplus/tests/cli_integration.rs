//! Integration tests for the goplus CLI that need no MIDI device.

#![allow(clippy::pedantic, clippy::nursery)]

use anyhow as _;
use goplus as _;
#[cfg(feature = "cli")]
use midir as _;
#[cfg(not(feature = "cli"))]
use rstest as _;
use sysex_core as _;
use tracing as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;

#[cfg(feature = "cli")]
mod binary {
    use std::process::{Command, Output};

    use rstest::rstest;

    fn goplus(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_goplus"))
            .args(args)
            .env_remove("GOPLUS_LOG")
            .output()
            .expect("failed to run goplus")
    }

    #[rstest]
    #[case(&["--help"])]
    #[case(&["-h"])]
    #[case(&["part", "set", "1", "--help"])]
    fn help_prints_usage_and_succeeds(#[case] args: &[&str]) {
        let output = goplus(args);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("Usage: goplus"));
        assert!(stdout.contains("loopmix tempo"));
    }

    #[rstest]
    #[case(&[], "missing command")]
    #[case(&["frobnicate"], "unknown command: frobnicate")]
    #[case(&["--model", "XX", "sys", "show"], "XX")]
    #[case(&["part", "set", "1", "--channel", "17"], "17")]
    #[case(&["zone", "set", "1", "--low-key", "H2"], "H2")]
    #[case(&["loopmix", "play", "6", "1"], "6")]
    #[case(&["--timeout-ms"], "--timeout-ms")]
    fn invalid_invocations_exit_with_status_one(#[case] args: &[&str], #[case] mention: &str) {
        let output = goplus(args);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("error: "), "stderr was {stderr}");
        assert!(stderr.contains(mention), "stderr was {stderr}");
        assert!(stderr.contains("Usage: goplus"));
        assert!(output.stdout.is_empty());
    }
}
