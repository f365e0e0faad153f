pub mod components;
pub mod date_utils;
pub mod icons;
pub mod image_data_url;
pub mod list_state;
pub mod number_format;
pub mod page_frame;
