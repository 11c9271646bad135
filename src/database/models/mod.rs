pub(crate) mod macros;

mod attendance;
mod early_checkout;
mod employee;
mod office;
mod template;

pub use attendance::{AdminAttendanceUpsert, AttendanceRecord, AttendanceStatus};
pub use early_checkout::{EarlyCheckoutRequest, EarlyCheckoutRequestInput, EarlyCheckoutStatus};
pub use employee::{Employee, EmployeeInput, WorkLocation};
pub use office::{OfficeSettings, OfficeSettingsInput};
pub use template::{DutyScheduleTemplate, DutyScheduleTemplateInput, ShiftType, weekday_name};
