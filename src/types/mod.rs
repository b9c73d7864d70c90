pub mod daily_record;
pub mod daily_variable;
pub mod date_range;
pub mod location;
