pub mod db;
pub mod http;
pub mod seed;

pub use db::DbAdapter;
pub use http::HttpRecordService;
