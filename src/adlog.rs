//! Synthetic IPTV ad-impression log generation.
//!
//! Produces the CSV ad-send logs that the analytics engine ingests as the
//! `ad-impressions` dataset. Generation is driven by a JSON config file
//! describing the channel lineup, advertiser pool, and output rotation;
//! the `ad-log-generator` binary wires these functions to a schedule.

use chrono::Local;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Ad slot durations offered to advertisers, in seconds.
const DURATIONS: [u32; 4] = [15, 30, 60, 90];

/// Position of the ad relative to the program content.
const AD_POSITIONS: [&str; 3] = ["pre-roll", "mid-roll", "post-roll"];

/// One simulated ad impression, in the ingestion CSV schema.
///
/// Field order here is the CSV column order. `timestamp` is kept as a
/// preformatted `"%Y-%m-%d %H:%M:%S"` string so the file matches the
/// ingestion format byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdImpressionLog {
    pub timestamp: String,
    pub channel_id: String,
    pub channel_name: String,
    pub ad_id: String,
    pub ad_name: String,
    pub advertiser: String,
    /// Ad length in seconds
    pub duration: u32,
    pub viewer_count: u32,
    pub region: String,
    pub device_type: String,
    pub ad_position: String,
    pub campaign_id: String,
    pub revenue: f64,
}

/// A broadcast channel available to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub id: String,
    pub name: String,
}

impl ChannelEntry {
    /// Creates a new channel entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ChannelEntry {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// How often the scheduler produces a new CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleInterval {
    Minutely,
    Hourly,
    Daily,
    Weekly,
}

impl ScheduleInterval {
    /// Returns the tick period for this interval.
    pub fn period(&self) -> Duration {
        match self {
            ScheduleInterval::Minutely => Duration::from_secs(60),
            ScheduleInterval::Hourly => Duration::from_secs(60 * 60),
            ScheduleInterval::Daily => Duration::from_secs(60 * 60 * 24),
            ScheduleInterval::Weekly => Duration::from_secs(60 * 60 * 24 * 7),
        }
    }

    /// Returns a short human-readable description for startup output.
    pub fn describe(&self) -> &'static str {
        match self {
            ScheduleInterval::Minutely => "every minute",
            ScheduleInterval::Hourly => "every hour",
            ScheduleInterval::Daily => "every day",
            ScheduleInterval::Weekly => "every week",
        }
    }
}

/// Generator configuration, loaded from a JSON file.
///
/// Every field has a default, and fields missing from the config file fall
/// back to it, so a partial file overriding only `file_prefix` still gets
/// the full default channel lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory the CSV files are written to (default: "./ad_logs")
    pub output_directory: PathBuf,
    /// Filename prefix for generated files (default: "iptv_ad_log")
    pub file_prefix: String,
    /// Generation cadence in scheduler mode (default: minutely)
    pub schedule_interval: ScheduleInterval,
    /// Newest files kept after each rotation (default: 30)
    pub max_files_to_keep: usize,
    /// Channel lineup impressions are drawn from
    pub channels: Vec<ChannelEntry>,
    /// Advertiser pool
    pub advertisers: Vec<String>,
    /// Viewer region pool
    pub regions: Vec<String>,
    /// Playback device pool
    pub device_types: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_directory: PathBuf::from("./ad_logs"),
            file_prefix: "iptv_ad_log".to_string(),
            schedule_interval: ScheduleInterval::Minutely,
            max_files_to_keep: 30,
            channels: vec![
                ChannelEntry::new("CH001", "KBS1"),
                ChannelEntry::new("CH002", "KBS2"),
                ChannelEntry::new("CH003", "MBC"),
                ChannelEntry::new("CH004", "SBS"),
                ChannelEntry::new("CH005", "tvN"),
            ],
            advertisers: vec![
                "삼성전자".to_string(),
                "LG전자".to_string(),
                "현대자동차".to_string(),
                "SK텔레콤".to_string(),
                "KB금융".to_string(),
                "신한은행".to_string(),
                "롯데".to_string(),
                "CJ".to_string(),
                "네이버".to_string(),
                "카카오".to_string(),
            ],
            regions: vec![
                "서울".to_string(),
                "경기".to_string(),
                "부산".to_string(),
                "대구".to_string(),
                "인천".to_string(),
                "광주".to_string(),
                "대전".to_string(),
                "울산".to_string(),
            ],
            device_types: vec![
                "STB".to_string(),
                "Smart TV".to_string(),
                "Mobile".to_string(),
                "Tablet".to_string(),
                "PC".to_string(),
            ],
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from `path`.
    ///
    /// If the file does not exist, the defaults are written there and
    /// returned. If it exists but cannot be read or parsed, a warning is
    /// logged and the defaults are used so a broken config file never
    /// stops generation.
    ///
    /// # Errors
    /// Returns an error only if the default config file cannot be written.
    pub fn load_or_init(path: &Path) -> Result<Self, GeneratorError> {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(text) => match serde_json::from_str(&text) {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        log::warn!("Failed to parse config {}: {}, using defaults", path.display(), e);
                        Ok(GeneratorConfig::default())
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read config {}: {}, using defaults", path.display(), e);
                    Ok(GeneratorConfig::default())
                }
            }
        } else {
            let config = GeneratorConfig::default();
            let text = serde_json::to_string_pretty(&config)
                .map_err(|e| GeneratorError::Config(e.to_string()))?;
            fs::write(path, text)?;
            log::info!("Created default config file: {}", path.display());
            Ok(config)
        }
    }
}

/// Picks one element of `pool`, failing with the pool's name if it is empty.
fn pick<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'a [T],
    what: &str,
) -> Result<&'a T, GeneratorError> {
    pool.choose(rng)
        .ok_or_else(|| GeneratorError::EmptyPool(what.to_string()))
}

/// Generates `count` random ad impressions spread over the past hour.
///
/// Impressions draw their channel, advertiser, region, and device from the
/// config pools; durations, positions, viewer counts, and revenue come from
/// fixed realistic ranges. The returned logs are sorted by timestamp.
///
/// # Errors
/// Returns `GeneratorError::EmptyPool` if any config pool is empty.
pub fn generate_sample_logs<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    count: usize,
    rng: &mut R,
) -> Result<Vec<AdImpressionLog>, GeneratorError> {
    let base_time = Local::now() - chrono::Duration::hours(1);
    let mut logs = Vec::with_capacity(count);

    for _ in 0..count {
        let log_time = base_time + chrono::Duration::minutes(rng.gen_range(0..=60i64));
        let channel = pick(rng, &config.channels, "channels")?;
        let advertiser = pick(rng, &config.advertisers, "advertisers")?;

        logs.push(AdImpressionLog {
            timestamp: log_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            channel_id: channel.id.clone(),
            channel_name: channel.name.clone(),
            ad_id: format!("AD{}", rng.gen_range(1000..=9999)),
            ad_name: format!("{} 광고 {}", advertiser, rng.gen_range(1..=10)),
            advertiser: advertiser.clone(),
            duration: *pick(rng, &DURATIONS, "durations")?,
            viewer_count: rng.gen_range(1000..=50000),
            region: pick(rng, &config.regions, "regions")?.clone(),
            device_type: pick(rng, &config.device_types, "device_types")?.clone(),
            ad_position: pick(rng, &AD_POSITIONS, "ad_positions")?.to_string(),
            campaign_id: format!("CMP{}", rng.gen_range(100..=999)),
            revenue: (rng.gen_range(100.0..=5000.0f64) * 100.0).round() / 100.0,
        });
    }

    logs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(logs)
}

/// Writes `logs` as a timestamped CSV file under the output directory.
///
/// The filename is `<prefix>_<YYYYmmdd_HHMMSS>.csv` and the file starts
/// with a UTF-8 BOM so spreadsheet tools detect the Korean text correctly.
/// The header row comes from the [`AdImpressionLog`] field names; an empty
/// log list produces a file with no rows.
///
/// # Returns
/// Returns the path of the written file.
pub fn write_csv(
    config: &GeneratorConfig,
    logs: &[AdImpressionLog],
) -> Result<PathBuf, GeneratorError> {
    fs::create_dir_all(&config.output_directory)?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_{}.csv", config.file_prefix, stamp);
    let path = config.output_directory.join(filename);

    let mut file = File::create(&path)?;
    file.write_all("\u{feff}".as_bytes())?;

    let mut writer = csv::Writer::from_writer(file);
    for log in logs {
        writer.serialize(log)?;
    }
    writer.flush()?;

    log::info!("Wrote {} impressions to {}", logs.len(), path.display());
    Ok(path)
}

/// Deletes generated CSV files beyond the newest `max_files_to_keep`.
///
/// Only files matching `<prefix>_*.csv` in the output directory are
/// considered; newest-by-modification-time survive. A file that cannot be
/// deleted is logged and skipped.
///
/// # Returns
/// Returns the number of files deleted. A missing output directory counts
/// as nothing to clean.
pub fn cleanup_old_files(config: &GeneratorConfig) -> Result<usize, GeneratorError> {
    if !config.output_directory.exists() {
        return Ok(0);
    }

    let name_prefix = format!("{}_", config.file_prefix);
    let mut csv_files: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in fs::read_dir(&config.output_directory)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if name.starts_with(&name_prefix) && name.ends_with(".csv") {
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            csv_files.push((entry.path(), modified));
        }
    }

    // Newest first; everything past the keep limit goes
    csv_files.sort_by(|a, b| b.1.cmp(&a.1));

    let mut deleted = 0;
    for (path, _) in csv_files.iter().skip(config.max_files_to_keep) {
        match fs::remove_file(path) {
            Ok(()) => deleted += 1,
            Err(e) => log::warn!("Failed to delete {}: {}", path.display(), e),
        }
    }

    Ok(deleted)
}

/// Errors that can occur while generating or rotating log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Filesystem operation failed
    Io(String),
    /// CSV serialization failed
    Csv(String),
    /// Config file could not be written
    Config(String),
    /// A config pool required for generation is empty
    EmptyPool(String),
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorError::Io(msg) => write!(f, "IO error: {}", msg),
            GeneratorError::Csv(msg) => write!(f, "CSV error: {}", msg),
            GeneratorError::Config(msg) => write!(f, "Config error: {}", msg),
            GeneratorError::EmptyPool(pool) => {
                write!(f, "Config pool '{}' is empty", pool)
            }
        }
    }
}

impl std::error::Error for GeneratorError {}

impl From<std::io::Error> for GeneratorError {
    fn from(e: std::io::Error) -> Self {
        GeneratorError::Io(e.to_string())
    }
}

impl From<csv::Error> for GeneratorError {
    fn from(e: csv::Error) -> Self {
        GeneratorError::Csv(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> GeneratorConfig {
        GeneratorConfig {
            output_directory: dir.to_path_buf(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_default_config_pools() {
        let config = GeneratorConfig::default();
        assert_eq!(config.file_prefix, "iptv_ad_log");
        assert_eq!(config.schedule_interval, ScheduleInterval::Minutely);
        assert_eq!(config.max_files_to_keep, 30);
        assert_eq!(config.channels.len(), 5);
        assert_eq!(config.channels[0], ChannelEntry::new("CH001", "KBS1"));
        assert_eq!(config.advertisers.len(), 10);
        assert_eq!(config.regions.len(), 8);
        assert_eq!(config.device_types.len(), 5);
    }

    #[test]
    fn test_schedule_interval_periods() {
        assert_eq!(ScheduleInterval::Minutely.period(), Duration::from_secs(60));
        assert_eq!(ScheduleInterval::Hourly.period(), Duration::from_secs(3600));
        assert_eq!(ScheduleInterval::Daily.period(), Duration::from_secs(86400));
        assert_eq!(
            ScheduleInterval::Weekly.period(),
            Duration::from_secs(604800)
        );
    }

    #[test]
    fn test_schedule_interval_serde_names() {
        let interval: ScheduleInterval = serde_json::from_str("\"hourly\"").unwrap();
        assert_eq!(interval, ScheduleInterval::Hourly);
        assert_eq!(
            serde_json::to_string(&ScheduleInterval::Minutely).unwrap(),
            "\"minutely\""
        );
    }

    #[test]
    fn test_load_or_init_writes_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = GeneratorConfig::load_or_init(&path).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(path.exists());

        // The written file parses back to the same config
        let reloaded = GeneratorConfig::load_or_init(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_or_init_merges_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"file_prefix": "custom", "max_files_to_keep": 3}"#).unwrap();

        let config = GeneratorConfig::load_or_init(&path).unwrap();
        assert_eq!(config.file_prefix, "custom");
        assert_eq!(config.max_files_to_keep, 3);
        // Unspecified fields keep their defaults
        assert_eq!(config.channels.len(), 5);
        assert_eq!(config.schedule_interval, ScheduleInterval::Minutely);
    }

    #[test]
    fn test_load_or_init_falls_back_on_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json at all").unwrap();

        let config = GeneratorConfig::load_or_init(&path).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_generate_produces_sorted_plausible_logs() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let logs = generate_sample_logs(&config, 200, &mut rng).unwrap();

        assert_eq!(logs.len(), 200);
        for pair in logs.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }

        let channel_ids: Vec<&str> = config.channels.iter().map(|c| c.id.as_str()).collect();
        for log in &logs {
            assert!(NaiveDateTime::parse_from_str(&log.timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
            assert!(channel_ids.contains(&log.channel_id.as_str()));
            let channel = config
                .channels
                .iter()
                .find(|c| c.id == log.channel_id)
                .unwrap();
            assert_eq!(log.channel_name, channel.name);
            assert!(config.advertisers.contains(&log.advertiser));
            assert!(log.ad_name.starts_with(&log.advertiser));
            assert!(log.ad_id.starts_with("AD") && log.ad_id.len() == 6);
            assert!(log.campaign_id.starts_with("CMP") && log.campaign_id.len() == 6);
            assert!(DURATIONS.contains(&log.duration));
            assert!((1000..=50000).contains(&log.viewer_count));
            assert!(config.regions.contains(&log.region));
            assert!(config.device_types.contains(&log.device_type));
            assert!(AD_POSITIONS.contains(&log.ad_position.as_str()));
            assert!((100.0..=5000.0).contains(&log.revenue));
        }
    }

    #[test]
    fn test_generate_fails_on_empty_pool() {
        let config = GeneratorConfig {
            channels: vec![],
            ..GeneratorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_sample_logs(&config, 10, &mut rng);
        assert_eq!(
            result.unwrap_err(),
            GeneratorError::EmptyPool("channels".to_string())
        );
    }

    #[test]
    fn test_write_csv_emits_bom_header_and_rows() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let mut rng = StdRng::seed_from_u64(7);
        let logs = generate_sample_logs(&config, 3, &mut rng).unwrap();

        let path = write_csv(&config, &logs).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with('\u{feff}'));
        let stripped = content.trim_start_matches('\u{feff}');
        let mut lines = stripped.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp,channel_id,channel_name,ad_id,ad_name,advertiser,duration,\
             viewer_count,region,device_type,ad_position,campaign_id,revenue"
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_write_csv_with_no_logs_writes_no_rows() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let path = write_csv(&config, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.trim_start_matches('\u{feff}').is_empty());
    }

    #[test]
    fn test_cleanup_keeps_newest_files() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.max_files_to_keep = 2;

        for i in 0..5 {
            let path = dir
                .path()
                .join(format!("iptv_ad_log_20240101_00000{}.csv", i));
            fs::write(&path, "x").unwrap();
            // Distinct mtimes so the ordering is unambiguous
            std::thread::sleep(Duration::from_millis(20));
        }

        let deleted = cleanup_old_files(&config).unwrap();
        assert_eq!(deleted, 3);

        let remaining: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(remaining.len(), 2);
    }

    #[test]
    fn test_cleanup_ignores_unrelated_files() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.max_files_to_keep = 0;

        fs::write(dir.path().join("iptv_ad_log_20240101_000000.csv"), "x").unwrap();
        fs::write(dir.path().join("notes.csv"), "x").unwrap();
        fs::write(dir.path().join("iptv_ad_log_readme.txt"), "x").unwrap();

        let deleted = cleanup_old_files(&config).unwrap();
        assert_eq!(deleted, 1);
        assert!(dir.path().join("notes.csv").exists());
        assert!(dir.path().join("iptv_ad_log_readme.txt").exists());
    }

    #[test]
    fn test_cleanup_of_missing_directory_is_a_noop() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("never_created"));
        assert_eq!(cleanup_old_files(&config).unwrap(), 0);
    }
}
