use std::sync::Arc;
use std::time::Duration;

use crate::agenda::program::{AgendaConfig, AgendaProgram};
use crate::agenda::workshop::WorkshopSource;
use crate::assets::fonts::FontLibrary;
use crate::assets::images::ImageStore;
use crate::backend::DisplayBackend;
use crate::clock::scaled::ScaledClock;
use crate::clock::source::{ManualTimeSource, TimeSource};
use crate::config::SignConfig;
use crate::foundation::error::SignResult;
use crate::foundation::log::LogHandle;
use crate::menu::list::ListFonts;
use crate::program::core::RunResult;
use crate::program::manager::ProgramManager;
use crate::program::scheduler::{ProgramScheduler, SchedulerConfig};
use crate::raster::surface::Surface;
use crate::screensavers::burn::BurnProgram;
use crate::screensavers::care_bears::CareBearsProgram;
use crate::screensavers::eye::EyeProgram;
use crate::screensavers::gnome::GnomeProgram;
use crate::screensavers::teeth::TeethProgram;

const AGENDA_FONT: &str = "emil";
const MESSAGE_FONT: &str = "5x7";
const MARQUEE_FONT: &str = "TenThinGuys";
const INVERTED_FONT: &str = "glyph";
const CHEVRON_IMAGE: &str = "chevron";

/// The whole sign: clock, programs, scheduler and a display backend, stepped one frame at a
/// time.
pub struct SignApp<B: DisplayBackend> {
    clock: Arc<ScaledClock>,
    backend: B,
    manager: ProgramManager,
    scheduler: ProgramScheduler,
    surface: Option<Surface>,
    frame_interval: Duration,
    frames: u64,
    log: LogHandle,
}

impl<B: DisplayBackend> SignApp<B> {
    /// Build every program from `config` and start on the agenda.
    ///
    /// Asset problems never fail construction; the affected programs draw text only.
    #[tracing::instrument(skip_all)]
    pub fn new(
        config: &SignConfig,
        time: impl TimeSource + 'static,
        backend: B,
        workshops: Box<dyn WorkshopSource>,
        log: LogHandle,
    ) -> SignResult<Self> {
        let cfg = config.with_defaults().validate()?;
        let clock = Arc::new(ScaledClock::new(
            time,
            cfg.timescale.unwrap_or(1.0),
            log.child("clock"),
        )?);
        let (width, height) = (backend.width(), backend.height());
        let fonts = FontLibrary::new(cfg.fonts_dir.clone().unwrap_or_default(), log.child("fonts"));
        let images = ImageStore::new(cfg.assets_dir.clone().unwrap_or_default(), log.child("images"));

        let mut manager = ProgramManager::new(Arc::clone(&clock), log.child("manager"));
        let agenda_font = fonts.load_or_fallback(AGENDA_FONT);
        let chevron = match images.load(CHEVRON_IMAGE, None, None) {
            Ok(img) => Some(img),
            Err(err) => {
                log.in_scope(|| tracing::info!(error = %err, "no chevron image, drawing pixels"));
                None
            }
        };
        manager.register(Box::new(AgendaProgram::new(
            AgendaConfig::default(),
            ListFonts::uniform(Arc::clone(&agenda_font)),
            width,
            height,
            chevron,
            workshops,
            Arc::clone(&clock),
            log.child("agenda"),
        )))?;

        let saver_log = log.child("screensavers");
        let message_font = fonts.load_or_fallback(MESSAGE_FONT);
        manager.register(Box::new(EyeProgram::new(
            &images,
            height,
            Arc::clone(&clock),
            saver_log.clone(),
        )))?;
        manager.register(Box::new(GnomeProgram::new(
            &images,
            Arc::clone(&message_font),
            &saver_log,
        )))?;
        manager.register(Box::new(TeethProgram::new(
            &images,
            message_font,
            width,
            height,
            &saver_log,
        )))?;
        manager.register(Box::new(CareBearsProgram::new(
            &images,
            fonts.load_or_fallback(MARQUEE_FONT),
            width,
            Arc::clone(&clock),
            &saver_log,
        )))?;
        manager.register(Box::new(BurnProgram::new(
            &images,
            agenda_font,
            fonts.load_or_fallback(INVERTED_FONT),
            height,
            Arc::clone(&clock),
            &saver_log,
        )))?;

        let schedule = SchedulerConfig::new(AgendaProgram::TAG)
            .with_override(BurnProgram::TAG, cfg.override_delay_secs.unwrap_or(180.0))
            .with_idle_threshold(cfg.idle_threshold_secs.unwrap_or(30.0));
        let scheduler = ProgramScheduler::new(
            schedule,
            &mut manager,
            Arc::clone(&clock),
            log.child("scheduler"),
        );

        let fps = cfg.fps.unwrap_or(60.0);
        let frame_interval = cfg.frame_interval()?;
        log.in_scope(|| {
            tracing::info!(
                width,
                height,
                fps,
                programs = manager.tags().len(),
                "sign assembled"
            )
        });
        Ok(Self {
            clock,
            backend,
            manager,
            scheduler,
            surface: None,
            frame_interval,
            frames: 0,
            log,
        })
    }

    /// Render one frame, apply the switching rules, and present.
    pub fn step(&mut self) -> SignResult<RunResult> {
        let mut surface = self
            .surface
            .take()
            .unwrap_or_else(|| self.backend.create_surface());
        let result = self.manager.run_frame(&mut surface);
        if let Some(switch) = self.scheduler.maybe_switch(&mut self.manager, &result) {
            self.log.in_scope(|| {
                tracing::debug!(to = %switch.to, reason = ?switch.reason, frame = self.frames, "switched")
            });
        }
        self.surface = Some(self.backend.present(surface)?);
        self.frames += 1;
        Ok(result)
    }

    /// Step in real time, sleeping one frame interval between frames. `None` runs forever.
    ///
    /// A failed present is logged and the loop carries on.
    pub fn run(&mut self, frames: Option<u64>) -> u64 {
        let mut done = 0;
        while frames.is_none_or(|limit| done < limit) {
            if let Err(err) = self.step() {
                self.log
                    .in_scope(|| tracing::error!(error = %err, "frame failed"));
            }
            done += 1;
            std::thread::sleep(self.frame_interval);
        }
        done
    }

    /// Step without sleeping, advancing `time` by one frame interval per frame until the clock
    /// reaches `until` virtual seconds. Returns the number of frames.
    pub fn run_until(&mut self, time: &ManualTimeSource, until: f64) -> SignResult<u64> {
        let start = self.frames;
        self.step()?;
        while self.clock.virtual_seconds() < until {
            time.advance(self.frame_interval.as_secs_f64());
            self.step()?;
        }
        Ok(self.frames - start)
    }

    /// Shared virtual clock.
    pub fn clock(&self) -> &Arc<ScaledClock> {
        &self.clock
    }

    /// The display backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Programs and the active one.
    pub fn manager(&self) -> &ProgramManager {
        &self.manager
    }

    /// Switching state.
    pub fn scheduler(&self) -> &ProgramScheduler {
        &self.scheduler
    }

    /// Real time between frames.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/driver.rs"]
mod tests;
