//! Report models returned by the config validator and the health reporter.

use crate::check::{VarClass, VariableCheck, VariableChecks};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Sentinel for unset string fields in the config report.
pub const NOT_SET: &str = "not-set";
/// Sentinel for unknown deployment facts.
pub const UNKNOWN: &str = "unknown";
/// Sentinel for a build id outside a CI build.
pub const LOCAL_BUILD: &str = "local";
/// Sentinel for an unconfigured backend project.
pub const NOT_CONFIGURED: &str = "not-configured";
/// Fixed environment label reported by the health endpoint.
pub const DEVELOPMENT: &str = "development";

/// Capture time rendered as ISO-8601 UTC with millisecond precision
/// (`2026-10-17T08:30:00.000Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a UTC instant.
    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// ISO-8601 rendering used on the wire.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

/// Running counts over the required and optional tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    /// Required variables that are unset or empty.
    pub required_missing: u32,
    /// Optional variables that are unset or empty.
    pub optional_missing: u32,
    /// Required and optional variables that are configured.
    pub total_configured: u32,
}

impl ConfigSummary {
    /// Count one checked variable.
    pub const fn record(&mut self, class: VarClass, check: &VariableCheck) {
        if check.configured {
            self.total_configured += 1;
            return;
        }
        match class {
            VarClass::Required => self.required_missing += 1,
            VarClass::Optional => self.optional_missing += 1,
        }
    }

    /// Healthy means no required variable is missing.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.required_missing == 0
    }
}

/// Overall verdict of a config report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigStatus {
    /// Every required variable is configured.
    Healthy,
    /// At least one required variable is missing.
    ConfigurationIssues,
}

/// Flutter build-mode flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlutterSettings {
    /// `FLUTTER_BUILD_MODE` or `not-set`.
    pub build_mode: String,
    /// `FLUTTER_WEB_USE_SKIA` or `not-set`.
    pub web_renderer: String,
    /// `FLUTTER_WEB_DEBUG == "true"`.
    pub debug: bool,
    /// `FLUTTER_WEB_BUILD_WITH_SOURCEMAPS == "true"`.
    pub source_maps: bool,
}

/// Netlify deployment flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetlifySettings {
    /// `NETLIFY_SITE_ID` is present.
    pub site_id: bool,
    /// `NETLIFY_DEV == "true"`.
    pub is_dev: bool,
    /// `NETLIFY_BRANCH` or `not-set`.
    pub branch: String,
    /// `BUILD_ID` or `not-set`.
    pub build_id: String,
}

/// The four validation sections of a config report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Required variable checks, in table order.
    pub required: VariableChecks,
    /// Optional variable checks, in table order.
    pub optional: VariableChecks,
    /// Flutter group.
    pub flutter: FlutterSettings,
    /// Netlify group.
    pub netlify: NetlifySettings,
}

/// Configuration diagnostic report.
///
/// `status` and `message` are not stored: they are derived from
/// `summary.required_missing` whenever they are read or serialized, so they
/// cannot disagree with the counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    /// Capture time.
    pub timestamp: Timestamp,
    /// `NODE_ENV` or `unknown`.
    pub environment: String,
    /// Validation sections.
    pub validation: Validation,
    /// Counts.
    pub summary: ConfigSummary,
}

impl ConfigReport {
    /// Derived verdict.
    #[must_use]
    pub const fn status(&self) -> ConfigStatus {
        if self.summary.is_healthy() {
            ConfigStatus::Healthy
        } else {
            ConfigStatus::ConfigurationIssues
        }
    }

    /// Derived operator message.
    #[must_use]
    pub fn message(&self) -> String {
        if self.summary.is_healthy() {
            "All required configuration variables are set".to_owned()
        } else {
            format!(
                "{} required variables are missing",
                self.summary.required_missing
            )
        }
    }
}

impl Serialize for ConfigReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConfigReport", 6)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("environment", &self.environment)?;
        state.serialize_field("validation", &self.validation)?;
        state.serialize_field("summary", &self.summary)?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Where the health endpoint is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    /// Platform client context, or `"unknown"`.
    pub netlify_context: serde_json::Value,
    /// `AWS_REGION` or `unknown`.
    pub region: String,
    /// `BUILD_ID` or `local`.
    pub build_id: String,
}

/// Selected configuration values echoed by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEcho {
    /// `NODE_ENV` or `unknown`.
    pub node_env: String,
    /// `FLUTTER_BUILD_MODE` or `unknown`.
    pub flutter_build_mode: String,
    /// `FIREBASE_PROJECT_ID` or `not-configured`.
    pub firebase_project_id: String,
}

/// Feature toggles derived from exact `"true"` comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    /// `FLUTTER_WEB_DEBUG`.
    pub debug_mode: bool,
    /// `FLUTTER_WEB_BUILD_WITH_SOURCEMAPS`.
    pub source_maps: bool,
    /// `ENABLE_DEV_TOOLS`.
    pub dev_tools: bool,
}

/// Health snapshot. `status` is always `healthy`; a fault produces a
/// [`HealthFault`] body instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Always `healthy`.
    pub status: &'static str,
    /// Always `development`.
    pub environment: &'static str,
    /// Capture time.
    pub timestamp: Timestamp,
    /// Deployment facts.
    pub deployment: DeploymentInfo,
    /// Configuration echo.
    pub config: ConfigEcho,
    /// Feature toggles.
    pub features: FeatureFlags,
}

impl HealthReport {
    /// Assemble a report with the fixed status and environment labels.
    #[must_use]
    pub const fn new(
        timestamp: Timestamp,
        deployment: DeploymentInfo,
        config: ConfigEcho,
        features: FeatureFlags,
    ) -> Self {
        Self {
            status: "healthy",
            environment: DEVELOPMENT,
            timestamp,
            deployment,
            config,
            features,
        }
    }
}

/// Body returned when assembling a health report fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthFault {
    /// Always `error`.
    pub status: &'static str,
    /// Always `development`.
    pub environment: &'static str,
    /// Time the fault was reported.
    pub timestamp: Timestamp,
    /// Fault description.
    pub error: String,
}

impl HealthFault {
    /// Build a fault body.
    #[must_use]
    pub fn new(timestamp: Timestamp, error: impl Into<String>) -> Self {
        Self {
            status: "error",
            environment: DEVELOPMENT,
            timestamp,
            error: error.into(),
        }
    }
}
