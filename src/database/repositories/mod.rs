mod attendance;
mod early_checkout;
mod employee;
mod office;
mod template;

pub use attendance::AttendanceRepository;
pub use early_checkout::EarlyCheckoutRepository;
pub use employee::EmployeeRepository;
pub use office::OfficeRepository;
pub use template::ScheduleTemplateRepository;
