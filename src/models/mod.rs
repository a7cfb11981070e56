pub mod params;
pub mod report;
pub mod test_run;
