pub mod dashboard_refresher;

pub use dashboard_refresher::DashboardRefresherWorker;
