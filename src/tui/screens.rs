//! 各画面の Model/Msg/update/view

pub mod dashboard;
pub mod edit;
pub mod returns;
pub mod table_page;
