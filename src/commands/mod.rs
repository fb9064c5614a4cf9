pub mod add;
pub mod delete;
pub mod doctor;
pub mod edit;
pub mod list;
pub mod toggle;
