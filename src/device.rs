// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Device registration against the kiosk backend.
//!
//! Each kiosk identifies itself with a fingerprint derived from stable
//! host facts and keeps its backend-assigned device id in a small JSON
//! store on disk. Registration is self-healing: a corrupt store, a changed
//! fingerprint, or a failed refresh all fall back to a fresh registration.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::slideshow::SliderConfig;

/// The persisted identity of this kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub device_id: String,
    pub fingerprint: String,
    /// RFC 3339 timestamp of the last store write.
    pub saved_at: String,
}

/// What the backend wants this kiosk to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskAssignment {
    #[serde(default)]
    pub is_assigned: bool,
    #[serde(default)]
    pub landing_page: Option<SliderConfig>,
}

/// Stable fingerprint from host facts: hostname, OS, architecture.
pub fn fingerprint() -> String {
    let hostname = std::env::var("HOSTNAME").unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    hostname.hash(&mut hasher);
    std::env::consts::OS.hash(&mut hasher);
    std::env::consts::ARCH.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// One-record JSON store for the device identity.
#[derive(Debug, Clone)]
pub struct DeviceStore {
    path: PathBuf,
}

impl DeviceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored record. A missing or unreadable store is treated as
    /// "never registered" (corruption is warn-logged, not an error).
    pub fn load(&self) -> Option<DeviceRecord> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("Cannot read device store {}: {err}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("Corrupt device store {}: {err}", self.path.display());
                None
            }
        }
    }

    pub fn save(&self, record: &DeviceRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(record).context("serializing device record")?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))
    }

    pub fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Cannot clear device store {}: {err}", self.path.display());
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    fingerprint: &'a str,
    device_info: DeviceInfo,
}

#[derive(Serialize)]
struct DeviceInfo {
    hostname: String,
    os: &'static str,
    arch: &'static str,
}

impl DeviceInfo {
    fn collect() -> Self {
        Self {
            hostname: std::env::var("HOSTNAME").unwrap_or_default(),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

#[derive(Deserialize)]
struct RegisterResponse {
    device: RegisteredDevice,
}

#[derive(Deserialize)]
struct RegisteredDevice {
    id: String,
}

/// HTTP client for the device endpoints.
#[derive(Debug)]
pub struct DeviceClient {
    base_url: String,
    store: DeviceStore,
    http: reqwest::blocking::Client,
}

impl DeviceClient {
    pub fn new(base_url: impl Into<String>, store: DeviceStore) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            store,
            http,
        })
    }

    /// Establish this kiosk's identity.
    ///
    /// A stored record with the current fingerprint is refreshed against
    /// the backend; any failure along that path drops the store and
    /// registers from scratch.
    pub fn init(&self) -> Result<DeviceRecord> {
        let fingerprint = fingerprint();

        if let Some(stored) = self.store.load() {
            if stored.fingerprint == fingerprint {
                match self.refresh(&stored) {
                    Ok(record) => return Ok(record),
                    Err(err) => {
                        tracing::warn!("Device refresh failed ({err:#}), re-registering");
                        self.store.clear();
                    }
                }
            } else {
                tracing::warn!("Fingerprint changed, re-registering");
                self.store.clear();
            }
        }

        self.register(&fingerprint)
    }

    /// Fresh registration: POST the fingerprint, persist the assigned id.
    fn register(&self, fingerprint: &str) -> Result<DeviceRecord> {
        let url = format!("{}/api/devices/register", self.base_url);
        let response: RegisterResponse = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                fingerprint,
                device_info: DeviceInfo::collect(),
            })
            .send()
            .with_context(|| format!("posting {url}"))?
            .error_for_status()
            .context("device registration rejected")?
            .json()
            .context("decoding registration response")?;

        let record = DeviceRecord {
            device_id: response.device.id,
            fingerprint: fingerprint.to_owned(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };
        tracing::info!("Registered as device {}", record.device_id);
        self.store.save(&record)?;
        Ok(record)
    }

    /// Re-announce an existing registration. The backend may hand back a
    /// different id (e.g. after a server-side reset); adopt it and rewrite
    /// the store.
    fn refresh(&self, stored: &DeviceRecord) -> Result<DeviceRecord> {
        let url = format!("{}/api/devices/register", self.base_url);
        let response: RegisterResponse = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                fingerprint: &stored.fingerprint,
                device_info: DeviceInfo::collect(),
            })
            .send()
            .with_context(|| format!("posting {url}"))?
            .error_for_status()
            .context("device refresh rejected")?
            .json()
            .context("decoding refresh response")?;

        if response.device.id != stored.device_id {
            tracing::info!(
                "Backend reassigned device id {} -> {}",
                stored.device_id,
                response.device.id
            );
        }
        let record = DeviceRecord {
            device_id: response.device.id,
            fingerprint: stored.fingerprint.clone(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };
        self.store.save(&record)?;
        Ok(record)
    }

    /// Fetch this device's current assignment.
    pub fn fetch_config(&self, device_id: &str) -> Result<KioskAssignment> {
        let url = format!("{}/api/devices/{device_id}/config", self.base_url);
        self.http
            .get(&url)
            .send()
            .with_context(|| format!("fetching {url}"))?
            .error_for_status()
            .context("device config request rejected")?
            .json()
            .context("decoding device config")
    }
}

/// Interval gate for periodic config re-fetches.
#[derive(Debug, Clone)]
pub struct ConfigPoller {
    interval: Duration,
    running: bool,
    last_poll: Option<Instant>,
}

impl ConfigPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            last_poll: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.last_poll = Some(now);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when a poll is due; claims the slot so each interval fires once.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let due = match self.last_poll {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_poll = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> DeviceStore {
        let mut path = std::env::temp_dir();
        path.push(format!("wayfinder-device-{name}-{}", std::process::id()));
        let store = DeviceStore::new(path);
        store.clear();
        store
    }

    fn record() -> DeviceRecord {
        DeviceRecord {
            device_id: "dev-42".to_owned(),
            fingerprint: fingerprint(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint(), fingerprint());
        assert_eq!(fingerprint().len(), 16);
    }

    #[test]
    fn store_round_trips_a_record() {
        let store = temp_store("roundtrip");
        assert!(store.load().is_none());

        let rec = record();
        store.save(&rec).unwrap();
        assert_eq!(store.load(), Some(rec));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_store_reads_as_absent() {
        let store = temp_store("corrupt");
        std::fs::write(&store.path, "{not json").unwrap();
        assert!(store.load().is_none());
        store.clear();
    }

    #[test]
    fn record_uses_camel_case_wire_names() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("deviceId").is_some());
        assert!(json.get("savedAt").is_some());
    }

    #[test]
    fn assignment_tolerates_missing_fields() {
        let a: KioskAssignment = serde_json::from_str("{}").unwrap();
        assert!(!a.is_assigned);
        assert!(a.landing_page.is_none());

        let a: KioskAssignment = serde_json::from_str(
            r#"{"isAssigned":true,"landingPage":{"slides":[],"transitionDuration":4000}}"#,
        )
        .unwrap();
        assert!(a.is_assigned);
        assert_eq!(a.landing_page.unwrap().transition_duration, 4000);
    }

    #[test]
    fn poller_fires_once_per_interval_while_running() {
        let t0 = Instant::now();
        let mut poller = ConfigPoller::new(Duration::from_secs(15));

        assert!(!poller.poll_due(t0 + Duration::from_secs(60)));

        poller.start(t0);
        assert!(!poller.poll_due(t0 + Duration::from_secs(5)));
        assert!(poller.poll_due(t0 + Duration::from_secs(15)));
        assert!(!poller.poll_due(t0 + Duration::from_secs(16)));

        poller.stop();
        assert!(!poller.poll_due(t0 + Duration::from_secs(60)));
    }
}
