//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard controller (use case)
//! and the outer layers: step components, toasts, routing and time.
//!
//! ## Port Placement Guidelines
//!
//! A port lives here when the controller depends on it and an outer layer
//! (infra adapter, UI binding, test double) implements it.

mod clock;
pub mod navigation;
pub mod notification;
pub mod step_component;
pub mod submit_handler;

pub use clock::*;
pub use navigation::NavigationPort;
pub use notification::{Notification, NotificationLevel, NotificationPort};
pub use step_component::{StepComponent, StepHandle, StepRegistrar};
pub use submit_handler::{SharedSubmitHandler, StepSubmitHandler};
