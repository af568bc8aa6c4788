pub mod config;
pub mod lang;
pub mod logger;
pub mod site_builder;
mod markdown_render;
mod og_image;
mod post;
mod post_list;
mod post_store;
mod test_data;
mod text_utils;
mod view;
