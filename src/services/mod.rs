pub mod catalog_service;
pub mod link_service;
