pub mod contacts;
pub mod gate;
pub mod master_data;
