pub mod edges;

pub use edges::DashboardStats;
