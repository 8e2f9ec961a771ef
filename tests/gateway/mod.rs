pub mod contract;
pub mod response;
