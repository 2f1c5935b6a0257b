use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::agenda::workshop::{Workshop, WorkshopSource};
use crate::clock::scaled::ScaledClock;
use crate::foundation::log::LogHandle;
use crate::menu::list::{ListConfig, ListFonts, ListItem, ListRenderer};
use crate::menu::scroll::ScrollParams;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::draw::draw_text;
use crate::raster::font::{Font, text_width};
use crate::raster::image::Image;
use crate::raster::surface::Surface;

const NO_WORKSHOPS: &str = "No upcoming workshops";
/// Titles scroll slower than the generic list default.
const AGENDA_SCROLL_SPEED: f64 = 5.0;

/// Agenda timing and layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Row layout and scrolling.
    pub list: ListConfig,
    /// Most workshops kept on the list; `None` means as many rows as fit.
    pub max_listed: Option<usize>,
    /// Virtual seconds between reloads of the workshop source.
    pub refresh_interval_secs: f64,
    /// How long a row whose name fits stays active.
    pub location_dwell_secs: f64,
    /// Workshops further out than this are not listed.
    pub lookahead_minutes: f64,
    /// Speed of the bouncing idle text, pixels per second on each axis.
    pub idle_speed: f64,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            list: ListConfig {
                scroll: ScrollParams {
                    speed: AGENDA_SCROLL_SPEED,
                    ..ScrollParams::default()
                },
                ..ListConfig::default()
            },
            max_listed: None,
            refresh_interval_secs: 30.0,
            location_dwell_secs: 5.0,
            lookahead_minutes: 24.0 * 60.0,
            idle_speed: 20.0,
        }
    }
}

/// Base program: upcoming workshops with minutes to start and the active row's location.
///
/// The displayed set is sticky. A refresh drops workshops that have started and tops the list
/// up with the next ones, so rows don't reshuffle while people read them.
pub struct AgendaProgram {
    config: AgendaConfig,
    list: ListRenderer,
    source: Box<dyn WorkshopSource>,
    displayed: Vec<Workshop>,
    max_listed: usize,
    location_index: usize,
    last_location_change: f64,
    last_refresh: Option<f64>,
    idle_since: Option<f64>,
    idle_font: Arc<dyn Font>,
    clock: Arc<ScaledClock>,
    log: LogHandle,
}

impl AgendaProgram {
    /// Registry tag.
    pub const TAG: ProgramTag = ProgramTag::new("agenda");

    /// Build the agenda for a `width x height` panel.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: AgendaConfig,
        fonts: ListFonts,
        width: u32,
        height: u32,
        chevron: Option<Arc<Image>>,
        source: Box<dyn WorkshopSource>,
        clock: Arc<ScaledClock>,
        log: LogHandle,
    ) -> Self {
        let idle_font = Arc::clone(&fonts.name);
        let list = ListRenderer::new(
            config.list,
            fonts,
            width,
            height,
            chevron,
            Arc::clone(&clock),
            log.child("list"),
        );
        let max_listed = config.max_listed.unwrap_or(list.capacity());
        let now = clock.virtual_seconds();
        Self {
            config,
            list,
            source,
            displayed: Vec::new(),
            max_listed,
            location_index: 0,
            last_location_change: now,
            last_refresh: None,
            idle_since: None,
            idle_font,
            clock,
            log,
        }
    }

    /// Workshops currently on the list.
    pub fn displayed(&self) -> &[Workshop] {
        &self.displayed
    }

    /// Row whose location is in the footer.
    pub fn location_index(&self) -> usize {
        self.location_index
    }

    /// The list being drawn.
    pub fn list(&self) -> &ListRenderer {
        &self.list
    }

    /// True while the "no upcoming workshops" text is shown.
    pub fn is_idle(&self) -> bool {
        self.idle_since.is_some()
    }

    /// Reload from the source when the refresh interval has passed. Returns whether it did.
    pub fn refresh(&mut self, now: f64) -> bool {
        if self
            .last_refresh
            .is_some_and(|last| now - last < self.config.refresh_interval_secs)
        {
            return false;
        }
        self.last_refresh = Some(now);

        let wall = self.clock.virtual_instant();
        let all = self.source.workshops();

        self.displayed
            .retain(|w| w.minutes_until(wall).is_some_and(|m| m > 0.0));
        if self.displayed.len() < self.max_listed {
            for w in all.upcoming(wall, None) {
                if self.displayed.len() >= self.max_listed {
                    break;
                }
                let in_range = w
                    .minutes_until(wall)
                    .is_some_and(|m| m <= self.config.lookahead_minutes);
                if in_range && !self.displayed.contains(w) {
                    self.displayed.push(w.clone());
                }
            }
        }

        if self.location_index >= self.displayed.len() && !self.displayed.is_empty() {
            self.location_index = 0;
            self.last_location_change = now;
        }

        if self.displayed.is_empty() {
            if self.idle_since.is_none() {
                self.log
                    .in_scope(|| tracing::info!("no upcoming workshops, showing idle text"));
                self.idle_since = Some(now);
            }
        } else {
            self.idle_since = None;
            self.update_items(wall, now);
        }
        self.log.in_scope(|| {
            tracing::debug!(
                available = all.len(),
                displayed = self.displayed.len(),
                "refreshed agenda"
            )
        });
        true
    }

    /// Advance the active row once it has been shown long enough.
    ///
    /// Rows whose name scrolls stay until the maximum dwell, others for the location dwell.
    pub fn update_location_index(&mut self, now: f64) -> bool {
        if self.displayed.is_empty() {
            return false;
        }
        let dwell = now - self.last_location_change;
        let limit = if self.list.needs_scroll(self.location_index) {
            self.config.list.scroll.max_dwell
        } else {
            self.config.location_dwell_secs
        };
        if dwell < limit {
            return false;
        }
        self.location_index = (self.location_index + 1) % self.displayed.len();
        self.last_location_change = now;
        self.list.set_active(self.location_index);
        true
    }

    fn update_items(&mut self, wall: NaiveDateTime, now: f64) {
        let items: Vec<ListItem> = self
            .displayed
            .iter()
            .map(|w| {
                let description = match w.location.as_deref() {
                    Some(loc) if !loc.is_empty() => format!("@ {loc}"),
                    _ => "@ Unknown location".to_owned(),
                };
                ListItem::new(
                    format_minutes(w.minutes_until(wall)),
                    w.title.clone(),
                    description,
                )
            })
            .collect();

        let prev_name = self
            .list
            .items()
            .get(self.location_index)
            .map(|i| i.name.clone());
        let new_name = items.get(self.location_index).map(|i| i.name.clone());
        self.list.set_items(items);
        if prev_name != new_name {
            self.list.set_active(self.location_index);
            self.last_location_change = now;
        }
    }

    fn render_idle(&self, surface: &mut Surface, now: f64, since: f64) {
        surface.clear();
        let font = self.idle_font.as_ref();
        let travel = (now - since).max(0.0) * self.config.idle_speed;
        let text_w = text_width(font, NO_WORKSHOPS);
        let x = bounce(travel, 0, surface.width() as i32 - text_w);
        let descent = font.height() - font.baseline();
        let y = bounce(travel, font.baseline(), surface.height() as i32 - descent);
        draw_text(
            surface,
            font,
            x,
            y,
            self.config.list.color,
            NO_WORKSHOPS,
        );
    }
}

impl Program for AgendaProgram {
    fn tag(&self) -> ProgramTag {
        Self::TAG
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        let now = self.clock.virtual_seconds();
        self.refresh(now);
        self.update_location_index(now);
        match self.idle_since {
            Some(since) => self.render_idle(surface, now, since),
            None => {
                self.list.render(surface);
            }
        }
        FrameResult::running()
    }

    fn play_duration(&self) -> Option<f64> {
        None
    }
}

/// Value column text: `??` without a start, `NOW` once started, otherwise whole minutes.
pub fn format_minutes(minutes: Option<f64>) -> String {
    match minutes {
        None => "??".to_owned(),
        Some(m) if m <= 0.0 => "NOW".to_owned(),
        Some(m) => format!("{}", m.trunc() as i64),
    }
}

/// Position bouncing between `lo` and `hi` after `travel` pixels of movement.
fn bounce(travel: f64, lo: i32, hi: i32) -> i32 {
    let span = hi - lo;
    if span <= 0 {
        return lo;
    }
    let period = 2 * span;
    let t = (travel.max(0.0).floor() as i64 % i64::from(period)) as i32;
    if t <= span { lo + t } else { lo + period - t }
}

#[cfg(test)]
#[path = "../../tests/unit/agenda/program.rs"]
mod tests;
