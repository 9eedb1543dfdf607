// models/src/clinic/mod.rs

pub mod appointment;
pub mod doctor;
pub mod medicine;
pub mod order;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use doctor::{Doctor, DoctorStatus, NewDoctor};
pub use medicine::{Medicine, NewMedicine};
pub use order::{NewOrder, Order, ORDER_STATUS_PLACED};
pub use user::{NewUser, User, DEFAULT_USER_ROLE};
