pub mod customer;
pub mod outcome;
pub mod response;
