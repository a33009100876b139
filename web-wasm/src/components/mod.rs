//! UIコンポーネント

pub mod data_list;
pub mod header;
pub mod loading;
pub mod pagination;
pub mod results_list;
pub mod search_form;
pub mod selection_bar;
