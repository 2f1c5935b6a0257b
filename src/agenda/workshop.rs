use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use chrono::NaiveDateTime;

use crate::foundation::error::{SignError, SignResult};
use crate::foundation::log::LogHandle;

const UNTITLED: &str = "Untitled Workshop";

fn untitled() -> String {
    UNTITLED.to_owned()
}

/// One scheduled workshop as listed in the data file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Workshop {
    /// Display name.
    #[serde(default = "untitled")]
    pub title: String,
    /// Room or area.
    #[serde(default)]
    pub location: Option<String>,
    /// Who runs it.
    #[serde(default)]
    pub host: Option<String>,
    /// Free text.
    #[serde(default)]
    pub description: String,
    /// ISO-8601 local start, e.g. `2026-06-01T14:30:00`.
    #[serde(default, rename = "startTime")]
    pub start_time: Option<String>,
    /// Length in hours.
    #[serde(default, rename = "durationHours")]
    pub duration_hours: Option<f64>,
}

impl Workshop {
    /// Workshop with only a title and a start.
    pub fn new(title: impl Into<String>, start_time: Option<&str>) -> Self {
        Self {
            title: title.into(),
            location: None,
            host: None,
            description: String::new(),
            start_time: start_time.map(str::to_owned),
            duration_hours: None,
        }
    }

    /// Parsed start time; `None` when absent or unparseable.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.parse_start().ok().flatten()
    }

    /// Parsed start time. `Ok(None)` when absent, [`SignError::InvalidArgument`] when the text
    /// matches no known format.
    pub fn parse_start(&self) -> SignResult<Option<NaiveDateTime>> {
        let Some(raw) = self.start_time.as_deref() else {
            return Ok(None);
        };
        parse_local_datetime(raw).map(Some).ok_or_else(|| {
            SignError::invalid_argument(format!(
                "workshop '{}': unparseable start time '{raw}'",
                self.title
            ))
        })
    }

    /// Minutes from `now` until the start, negative once started.
    pub fn minutes_until(&self, now: NaiveDateTime) -> Option<f64> {
        let start = self.start()?;
        let diff = start.signed_duration_since(now);
        Some(diff.num_milliseconds() as f64 / 60_000.0)
    }

    /// Started and not yet over. Needs both a start and a duration.
    pub fn is_ongoing(&self, now: NaiveDateTime) -> bool {
        let Some(hours) = self.duration_hours.filter(|h| *h > 0.0) else {
            return false;
        };
        self.minutes_until(now)
            .is_some_and(|m| m <= 0.0 && m > -hours * 60.0)
    }
}

fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|t| t.with_timezone(&chrono::Local).naive_local())
        })
}

/// Workshop list with time-based queries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workshops {
    items: Vec<Workshop>,
}

impl Workshops {
    /// Wrap a list.
    pub fn new(items: Vec<Workshop>) -> Self {
        Self { items }
    }

    /// All workshops in file order.
    pub fn all(&self) -> &[Workshop] {
        &self.items
    }

    /// Number of workshops.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True without workshops.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Workshops that start after `now`, soonest first, at most `max_count`.
    pub fn upcoming(&self, now: NaiveDateTime, max_count: Option<usize>) -> Vec<&Workshop> {
        let mut upcoming: Vec<(f64, &Workshop)> = self
            .items
            .iter()
            .filter_map(|w| w.minutes_until(now).filter(|m| *m > 0.0).map(|m| (m, w)))
            .collect();
        upcoming.sort_by(|a, b| a.0.total_cmp(&b.0));
        upcoming
            .into_iter()
            .take(max_count.unwrap_or(usize::MAX))
            .map(|(_, w)| w)
            .collect()
    }

    /// Workshops in progress at `now`.
    pub fn current(&self, now: NaiveDateTime) -> Vec<&Workshop> {
        self.items.iter().filter(|w| w.is_ongoing(now)).collect()
    }
}

/// Where the agenda gets its workshops. Called at most once per refresh interval.
pub trait WorkshopSource: Send {
    /// Current list; failures are handled inside and produce an empty list.
    fn workshops(&self) -> Workshops;
}

/// In-memory workshop list; clones share the same list.
#[derive(Clone, Debug, Default)]
pub struct StaticWorkshops {
    items: Arc<Mutex<Vec<Workshop>>>,
}

impl StaticWorkshops {
    /// Source over `items`.
    pub fn new(items: Vec<Workshop>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Replace the list seen by every clone.
    pub fn replace(&self, items: Vec<Workshop>) {
        *self.items.lock().unwrap_or_else(|e| e.into_inner()) = items;
    }
}

impl WorkshopSource for StaticWorkshops {
    fn workshops(&self) -> Workshops {
        Workshops::new(self.items.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

/// JSON file holding an array of workshops, re-read on every refresh.
#[derive(Debug)]
pub struct JsonWorkshopFile {
    path: PathBuf,
    log: LogHandle,
}

impl JsonWorkshopFile {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>, log: LogHandle) -> Self {
        Self {
            path: path.into(),
            log,
        }
    }

    /// Read and parse the file, reporting failures.
    pub fn load(&self) -> SignResult<Workshops> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read workshops {}", self.path.display()))?;
        if text.trim().is_empty() {
            return Ok(Workshops::default());
        }
        let items: Vec<Workshop> = serde_json::from_str(&text).map_err(|e| {
            SignError::serde(format!("workshops {}: {e}", self.path.display()))
        })?;
        Ok(Workshops::new(items))
    }
}

impl WorkshopSource for JsonWorkshopFile {
    fn workshops(&self) -> Workshops {
        match self.load() {
            Ok(list) => {
                self.log.in_scope(|| {
                    for err in list.all().iter().filter_map(|w| w.parse_start().err()) {
                        tracing::warn!(error = %err, "workshop start ignored");
                    }
                    tracing::debug!(count = list.len(), "loaded workshops");
                });
                list
            }
            Err(err) => {
                self.log
                    .in_scope(|| tracing::error!(error = %err, "cannot load workshops"));
                Workshops::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/agenda/workshop.rs"]
mod tests;
