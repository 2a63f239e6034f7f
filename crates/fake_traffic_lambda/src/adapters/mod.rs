pub mod object_store;
pub mod traffic_client;
