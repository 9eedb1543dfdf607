// models/src/lib.rs

pub mod clinic;
pub mod errors;

pub use clinic::appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use clinic::doctor::{Doctor, DoctorStatus, NewDoctor};
pub use clinic::medicine::{Medicine, NewMedicine};
pub use clinic::order::{NewOrder, Order, ORDER_STATUS_PLACED};
pub use clinic::user::{NewUser, User, DEFAULT_USER_ROLE};
pub use errors::{ValidationError, ValidationResult};
