use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::notification::NotificationChannel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherEyesConfig {
    /// Display name of the monitored place, used in rendered messages.
    pub location: String,
    pub alerts: AlertsConfig,
    pub notifications: NotificationsConfig,
}

impl Default for WeatherEyesConfig {
    fn default() -> Self {
        Self {
            location: "SHAMAN Event".to_string(),
            alerts: AlertsConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl WeatherEyesConfig {
    /// Loads YAML from `path`. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw).context("failed to parse config yaml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.alerts.min_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            bail!("alerts.min_confidence_threshold must be within [0, 1], got {threshold}");
        }
        if self.alerts.event_alert_hours_ahead < 0.0 {
            bail!("alerts.event_alert_hours_ahead must not be negative");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub min_confidence_threshold: f64,
    pub enable_change_alerts: bool,
    pub event_alert_hours_ahead: f64,
    /// UTC time of the daily summary, `HH:MM`.
    pub daily_summary_time: String,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            min_confidence_threshold: 0.7,
            enable_change_alerts: true,
            event_alert_hours_ahead: 2.0,
            daily_summary_time: "08:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub channels: Vec<NotificationChannel>,
    pub timeout_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            channels: vec![NotificationChannel::Log],
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = WeatherEyesConfig::from_yaml("").unwrap();
        assert_eq!(config, WeatherEyesConfig::default());
        assert_eq!(config.alerts.min_confidence_threshold, 0.7);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let raw = r#"
location: Kraków
alerts:
  min_confidence_threshold: 0.8
notifications:
  channels:
    - type: ntfy
      url: https://ntfy.sh
      topic: weather
"#;
        let config = WeatherEyesConfig::from_yaml(raw).unwrap();
        assert_eq!(config.location, "Kraków");
        assert_eq!(config.alerts.min_confidence_threshold, 0.8);
        assert!(config.alerts.enable_change_alerts);
        assert_eq!(config.notifications.timeout_secs, 10);
        assert_eq!(
            config.notifications.channels,
            vec![NotificationChannel::Ntfy {
                url: "https://ntfy.sh".into(),
                topic: "weather".into()
            }]
        );
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = WeatherEyesConfig::from_yaml("alerts:\n  min_confidence_threshold: 1.5\n")
            .unwrap_err();
        assert!(err.to_string().contains("min_confidence_threshold"));
    }

    #[test]
    fn load_from_missing_path_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = WeatherEyesConfig::load_from_path(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, WeatherEyesConfig::default());
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alerts:\n  enable_change_alerts: false").unwrap();
        let config = WeatherEyesConfig::load_from_path(file.path()).unwrap();
        assert!(!config.alerts.enable_change_alerts);
    }
}
