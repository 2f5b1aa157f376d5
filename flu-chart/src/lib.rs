//! Season comparison chart model.
//!
//! Turns decoded historical and forecast records into everything the season
//! comparison chart draws: one series per season on a shared week axis, the
//! forecast band, a y-axis maximum shared by both, and a flag for when the
//! forecast's confidence band rises above that maximum.
//!
//! Every function here is a pure transform of an immutable snapshot. Colour
//! and layout settings are passed in explicitly per chart.

pub mod align;
pub mod forecast;
pub mod layout;
pub mod memo;
pub mod overlay;
pub mod palette;
pub mod scale;

pub use align::{align_series, AlignedSeries, SeasonSeries, DEFAULT_MAX_SEASONS};
pub use forecast::{project_forecast, GaussianBaseline};
pub use memo::OverlayMemo;
pub use overlay::{build_overlay, OverlayConfig, OverlaySnapshot, SeasonOverlay};
pub use scale::{unify_scale, ChartScale};
