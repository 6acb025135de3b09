//! Infrastructure adapters for the catalog console.
//!
//! In-process implementations of the `pc-core` ports: a toast queue, a route
//! history, the system clock, scripted step components and the TOML config
//! loader.

pub mod config;
pub mod navigation;
pub mod notification;
pub mod steps;
pub mod time;

pub use config::load_config;
pub use navigation::RouteHistory;
pub use notification::{ToastQueue, ToastRecord};
pub use steps::{ScriptedOutcome, ScriptedStep};
pub use time::SystemClock;
