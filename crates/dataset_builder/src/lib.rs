//! Dataset Builder Library
//!
//! Simulated matches → event log export → SHA256 checksum
//!
//! Two on-disk formats:
//! - `jsonl`: one flattened event per line, tagged with its match seed
//! - `packed`: MessagePack (named fields) + LZ4 with the size prepended

use anyhow::{bail, Context, Result};
use log::info;
use pitch_core::{generate_batch, simulate_script, Event, MatchLog, ScriptRequest, SimConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Dataset file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Jsonl,
    Packed,
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetFormat::Jsonl => write!(f, "jsonl"),
            DatasetFormat::Packed => write!(f, "packed"),
        }
    }
}

impl FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(DatasetFormat::Jsonl),
            "packed" | "msgpack" => Ok(DatasetFormat::Packed),
            other => Err(format!("unknown dataset format '{}' (expected jsonl or packed)", other)),
        }
    }
}

/// Dataset metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Event schema version of pitch_core
    pub schema_version: u8,
    pub format: DatasetFormat,
    /// SHA256 of the written file (hex)
    pub checksum: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    pub matches: usize,
    pub events: usize,
    /// File size (bytes)
    pub bytes: u64,
}

/// Seeded batch parameters
#[derive(Debug, Clone)]
pub struct BatchSpec {
    pub matches: usize,
    pub steps: usize,
    /// Seed of the first match; match `i` uses `seed + i`
    pub seed: u64,
    pub config: SimConfig,
}

impl BatchSpec {
    pub fn seeds(&self) -> Vec<u64> {
        (0..self.matches as u64).map(|i| self.seed.wrapping_add(i)).collect()
    }
}

/// Where the events of a dataset come from
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Scenario request JSON file
    Script(PathBuf),
    Batch(BatchSpec),
}

/// One JSONL line
#[derive(Serialize)]
struct EventRecordRef<'a> {
    seed: u64,
    #[serde(flatten)]
    event: &'a Event,
}

#[derive(Deserialize)]
struct EventRecord {
    seed: u64,
    #[serde(flatten)]
    event: Event,
}

/// Run the source and write its event logs to `output`.
pub fn build_dataset(
    source: &DatasetSource,
    output: &Path,
    format: DatasetFormat,
) -> Result<DatasetMetadata> {
    let logs = match source {
        DatasetSource::Script(request_path) => run_script(request_path)?,
        DatasetSource::Batch(spec) => {
            info!(
                "Generating {} matches x {} steps from seed {}",
                spec.matches, spec.steps, spec.seed
            );
            generate_batch(&spec.seeds(), spec.steps, &spec.config)
                .context("Failed to generate match batch")?
        }
    };

    write_dataset(&logs, output, format)
}

fn run_script(request_path: &Path) -> Result<Vec<MatchLog>> {
    let json_str = fs::read_to_string(request_path)
        .with_context(|| format!("Failed to read request file: {}", request_path.display()))?;
    let request: ScriptRequest =
        serde_json::from_str(&json_str).context("Failed to parse scenario request")?;
    let response = simulate_script(&request).context("Scenario failed")?;

    Ok(vec![MatchLog { seed: 0, events: response.events }])
}

/// Write logs in `format` and describe the result.
pub fn write_dataset(
    logs: &[MatchLog],
    output: &Path,
    format: DatasetFormat,
) -> Result<DatasetMetadata> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    match format {
        DatasetFormat::Jsonl => write_jsonl(logs, output)?,
        DatasetFormat::Packed => write_packed(logs, output)?,
    }

    let bytes = fs::metadata(output)
        .with_context(|| format!("Failed to stat output file: {}", output.display()))?
        .len();
    let checksum = checksum_file(output)?;

    info!("Wrote {} ({} bytes, sha256 {})", output.display(), bytes, checksum);

    Ok(DatasetMetadata {
        schema_version: pitch_core::SCHEMA_VERSION,
        format,
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        matches: logs.len(),
        events: logs.iter().map(|log| log.events.len()).sum(),
        bytes,
    })
}

/// One event per line, each tagged with its match seed
pub fn write_jsonl(logs: &[MatchLog], output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    for log in logs {
        for event in &log.events {
            serde_json::to_writer(&mut writer, &EventRecordRef { seed: log.seed, event })
                .context("Failed to serialize event")?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush().with_context(|| format!("Failed to write output file: {}", output.display()))
}

/// MessagePack (named fields) + LZ4 (size prepended)
pub fn write_packed(logs: &[MatchLog], output: &Path) -> Result<()> {
    let msgpack_bytes =
        rmp_serde::to_vec_named(logs).context("Failed to serialize to MessagePack")?;
    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);

    fs::write(output, &compressed)
        .with_context(|| format!("Failed to write output file: {}", output.display()))
}

/// Read a JSONL dataset back into per-match logs.
///
/// A new match starts whenever the seed changes or the step counter
/// returns to 0.
pub fn load_jsonl(path: &Path) -> Result<Vec<MatchLog>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open dataset: {}", path.display()))?;

    let mut logs: Vec<MatchLog> = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: EventRecord = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", line_no + 1))?;

        let same_match = |log: &&mut MatchLog| log.seed == record.seed && record.event.step != 0;
        if let Some(log) = logs.last_mut().filter(same_match) {
            log.events.push(record.event);
            continue;
        }
        logs.push(MatchLog { seed: record.seed, events: vec![record.event] });
    }

    Ok(logs)
}

pub fn load_packed(path: &Path) -> Result<Vec<MatchLog>> {
    let compressed =
        fs::read(path).with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")
}

pub fn load_dataset(path: &Path, format: DatasetFormat) -> Result<Vec<MatchLog>> {
    match format {
        DatasetFormat::Jsonl => load_jsonl(path),
        DatasetFormat::Packed => load_packed(path),
    }
}

/// SHA256 of a file (hex)
pub fn checksum_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Checksum match
pub fn verify_dataset(path: &Path, expected_checksum: &str) -> Result<bool> {
    if expected_checksum.len() != 64 {
        bail!("Expected a 64-character SHA256 hex digest, got '{}'", expected_checksum);
    }
    Ok(checksum_file(path)? == expected_checksum.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    fn batch(matches: usize) -> BatchSpec {
        BatchSpec { matches, steps: 40, seed: 11, config: SimConfig::default() }
    }

    #[test]
    fn test_jsonl_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("events.jsonl");

        let metadata =
            build_dataset(&DatasetSource::Batch(batch(3)), &path, DatasetFormat::Jsonl)?;
        assert_eq!(metadata.matches, 3);
        assert_eq!(metadata.events, 120);
        assert!(verify_dataset(&path, &metadata.checksum)?);

        let first_line = fs::read_to_string(&path)?.lines().next().unwrap().to_string();
        let value: serde_json::Value = serde_json::from_str(&first_line)?;
        assert_eq!(value["seed"], 11);
        assert_eq!(value["step"], 0);

        let loaded = load_dataset(&path, DatasetFormat::Jsonl)?;
        let expected = generate_batch(&batch(3).seeds(), 40, &SimConfig::default())?;
        assert_eq!(loaded, expected);
        Ok(())
    }

    #[test]
    fn test_packed_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let jsonl = dir.path().join("events.jsonl");
        let packed = dir.path().join("nested/events.bin");

        let source = DatasetSource::Batch(batch(4));
        let plain = build_dataset(&source, &jsonl, DatasetFormat::Jsonl)?;
        let compact = build_dataset(&source, &packed, DatasetFormat::Packed)?;

        assert!(compact.bytes < plain.bytes);
        assert_eq!(compact.events, plain.events);
        assert_eq!(load_packed(&packed)?, load_jsonl(&jsonl)?);
        Ok(())
    }

    #[test]
    fn test_script_dataset() -> Result<()> {
        let mut request = NamedTempFile::new()?;
        let body = serde_json::json!({
            "schema_version": 1,
            "home": { "name": "Home", "sample": 11 },
            "away": { "name": "Away", "sample": 11 },
            "steps": [
                { "action": "PASS", "target": [60.0, 40.0] },
                { "action": "SHOOT", "target": [110.0, 34.0] }
            ]
        });
        request.write_all(body.to_string().as_bytes())?;

        let dir = tempdir()?;
        let out = dir.path().join("script.jsonl");
        let source = DatasetSource::Script(request.path().to_path_buf());
        let metadata = build_dataset(&source, &out, DatasetFormat::Jsonl)?;

        assert_eq!(metadata.matches, 1);
        assert_eq!(metadata.events, 2);
        assert_eq!(load_jsonl(&out)?[0].events.len(), 2);
        Ok(())
    }

    #[test]
    fn test_verify_detects_tampering() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("events.bin");
        let metadata =
            build_dataset(&DatasetSource::Batch(batch(1)), &path, DatasetFormat::Packed)?;

        fs::write(&path, b"tampered")?;
        assert!(!verify_dataset(&path, &metadata.checksum)?);
        assert!(verify_dataset(&path, "abc").is_err());
        Ok(())
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSONL".parse::<DatasetFormat>(), Ok(DatasetFormat::Jsonl));
        assert_eq!("msgpack".parse::<DatasetFormat>(), Ok(DatasetFormat::Packed));
        assert!("csv".parse::<DatasetFormat>().is_err());
    }
}
