pub mod contact;
pub mod master_data;
