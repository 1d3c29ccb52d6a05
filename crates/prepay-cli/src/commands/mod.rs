pub mod emi;
pub mod schedule;
