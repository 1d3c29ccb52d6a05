pub mod full;
pub mod lump_sum;

pub use full::{
    build_full_schedule, LoanInput, PaymentPolicy, ScheduleOutput, ScheduleRequest, ScheduleRow,
};
pub use lump_sum::LumpSum;
