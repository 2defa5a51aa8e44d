//! One module per registry command, following the handler convention.

pub mod add_new_malfunction;
pub mod buy_car;
pub mod change_color;
pub mod get_car;
pub mod get_cars_by_color;
pub mod get_cars_by_owner_and_color;
pub mod get_person;
pub mod init_ledger;
pub mod repair_car;
