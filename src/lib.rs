//! Program scheduling and drawing engine for a workshop agenda LED sign.
//!
//! A sign is a registry of [`Program`]s that draw full-screen frames onto a [`Surface`]. Every
//! frame the [`ProgramManager`] runs the active program and the [`ProgramScheduler`] decides
//! whether to switch: back to the agenda when a program ends, to the override during its window,
//! or to the next screensaver once the agenda has been idle long enough. All animation reads one
//! timescaled [`ScaledClock`], so speeding the clock up speeds up the whole sign.
//!
//! [`SignApp`] assembles the stock programs from a [`SignConfig`] and drives any
//! [`DisplayBackend`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod agenda;
mod app;
mod assets;
mod backend;
mod clock;
mod config;
mod foundation;
mod menu;
mod program;
mod raster;
mod screensavers;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use agenda::program::{AgendaConfig, AgendaProgram, format_minutes};
pub use agenda::workshop::{JsonWorkshopFile, StaticWorkshops, Workshop, WorkshopSource, Workshops};
pub use app::driver::SignApp;
pub use assets::fonts::FontLibrary;
pub use assets::images::ImageStore;
pub use backend::emulated::{DEFAULT_LED_CELL, EmulatedBackend, led_preview, save_led_preview};
pub use backend::memory::MemoryBackend;
pub use backend::{DisplayBackend, apply_brightness};
pub use clock::scaled::ScaledClock;
pub use clock::source::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use config::SignConfig;
pub use foundation::error::{SignError, SignResult};
pub use foundation::log::LogHandle;
pub use menu::list::{ListConfig, ListFonts, ListItem, ListRenderer};
pub use menu::scroll::{Direction, ScrollAnimator, ScrollParams, ScrollPhase, ScrollSample};
pub use program::core::{
    DEFAULT_PLAY_DURATION_SECS, EndReason, FrameResult, Program, ProgramTag, RunResult,
};
pub use program::manager::ProgramManager;
pub use program::scheduler::{ProgramScheduler, SchedulerConfig, Switch, SwitchReason};
pub use raster::bdf::BdfFont;
pub use raster::color::Color;
pub use raster::draw::{draw_circle, draw_line, draw_text};
pub use raster::font::{BlockFont, BuiltinFont, Font, text_width};
pub use raster::image::{Anchor, BlendMode, Image, composite_image};
pub use raster::surface::Surface;
pub use screensavers::burn::BurnProgram;
pub use screensavers::care_bears::CareBearsProgram;
pub use screensavers::eye::EyeProgram;
pub use screensavers::gnome::GnomeProgram;
pub use screensavers::teeth::TeethProgram;
