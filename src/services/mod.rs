pub mod admin_service;
pub mod api_client;
pub mod candidate_service;
pub mod export_service;
pub mod notification_service;
pub mod session_service;
