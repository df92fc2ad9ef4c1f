//! Sample formatting

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use sprung_animation::Sample;

/// How samples are written to stdout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `frame position velocity`, whitespace separated
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct SampleRecord {
    frame: u64,
    #[serde(flatten)]
    sample: Sample,
}

#[derive(Serialize)]
struct SettledRecord {
    settled: f64,
    frames: u64,
}

pub fn format_sample(format: OutputFormat, frame: u64, sample: Sample) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format!("{} {} {}", frame, sample.position, sample.velocity),
        OutputFormat::Json => serde_json::to_string(&SampleRecord { frame, sample })?,
    })
}

pub fn format_settled(format: OutputFormat, value: f64, frames: u64) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format!("settled {} after {} frames", value, frames),
        OutputFormat::Json => serde_json::to_string(&SettledRecord {
            settled: value,
            frames,
        })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_sample() {
        let line = format_sample(
            OutputFormat::Text,
            3,
            Sample {
                position: 1.5,
                velocity: -0.25,
            },
        )
        .unwrap();
        assert_eq!(line, "3 1.5 -0.25");
    }

    #[test]
    fn test_json_sample_is_flat() {
        let line = format_sample(
            OutputFormat::Json,
            7,
            Sample {
                position: 2.0,
                velocity: 0.5,
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["frame"], 7);
        assert_eq!(value["position"], 2.0);
        assert_eq!(value["velocity"], 0.5);
    }

    #[test]
    fn test_settled_line() {
        assert_eq!(
            format_settled(OutputFormat::Text, 50.0, 163).unwrap(),
            "settled 50 after 163 frames"
        );
        let json = format_settled(OutputFormat::Json, 50.0, 163).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["settled"], 50.0);
        assert_eq!(value["frames"], 163);
    }
}
