pub mod brand;
pub mod credentials;
pub mod ttl;
