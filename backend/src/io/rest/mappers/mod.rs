pub mod dashboard_mapper;
pub mod record_mapper;

pub use dashboard_mapper::DashboardMapper;
pub use record_mapper::RecordMapper;
