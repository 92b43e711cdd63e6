pub mod datastore;
pub mod notify;
pub mod processor;
pub mod repository;
