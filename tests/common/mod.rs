// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides template builders, a scripted test expression, and catalog file fixtures

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cyclestr::{CompoundTemplate, CycleString, CycleTimeExpression, Segment};

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

pub fn cycle_time(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub struct TestTemplateBuilder {
    segments: Vec<Segment<CycleString>>,
}

impl TestTemplateBuilder {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn literal(mut self, text: &str) -> Self {
        self.segments.push(Segment::literal(text));
        self
    }

    pub fn cycle(mut self, format: &str) -> Self {
        self.segments
            .push(Segment::dynamic(CycleString::new(format).unwrap()));
        self
    }

    pub fn cycle_with_offset(mut self, format: &str, offset: &str) -> Self {
        self.segments
            .push(Segment::dynamic(CycleString::with_offset(format, offset).unwrap()));
        self
    }

    pub fn build(self) -> CompoundTemplate {
        CompoundTemplate::new(self.segments)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("scripted failure: {0}")]
pub struct ScriptedError(pub String);

/// Expression with scripted behaviour for exercising the collaborator contract
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptedExpression {
    Fixed(String),
    Year,
    Fail(String),
}

impl CycleTimeExpression for ScriptedExpression {
    type Error = ScriptedError;

    fn render(&self, at: &DateTime<Utc>) -> Result<String, Self::Error> {
        match self {
            ScriptedExpression::Fixed(text) => Ok(text.clone()),
            ScriptedExpression::Year => Ok(at.format("%Y").to_string()),
            ScriptedExpression::Fail(reason) => Err(ScriptedError(reason.clone())),
        }
    }
}

pub struct TestCatalog {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestCatalog {
    /// Write `content` to a catalog file in a fresh temporary directory
    pub fn write(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cyclestr.yaml");
        std::fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

pub const SAMPLE_CATALOG: &str = r#"
templates:
  log_dir: ["/logs/", {cyclestr: "@Y@m@d@H"}]
  run_log: ["/logs/", {cyclestr: "@Y@m@d@H"}]
  command: ["  run_model --cycle ", {cyclestr: "@Y-@m-@dT@H"}, " --prev ", {cyclestr: "@H", offset: "-06:00:00"}, "  "]
  static_path: ["/etc/model.conf"]
"#;
