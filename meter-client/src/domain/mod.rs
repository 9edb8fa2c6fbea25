pub mod billing_date;
pub mod meter_record;

pub use billing_date::BillingDateEntry;
pub use meter_record::MeterRecord;
