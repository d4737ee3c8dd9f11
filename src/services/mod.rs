pub mod contact_gateway;
pub mod master_data;
pub mod notify;
