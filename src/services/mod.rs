pub mod attendance;
pub mod early_checkout;
pub mod location;
pub mod schedule;
pub mod timing;

pub use attendance::AttendanceService;
pub use early_checkout::{EarlyCheckoutService, ReviewDecision};
pub use location::{LocationDecision, LocationGate};
pub use schedule::{ResolvedSchedule, ScheduleResolver};
pub use timing::TimingLabel;
