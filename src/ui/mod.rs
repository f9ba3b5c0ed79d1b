/// UI module exports
pub mod cart_list;
pub mod files;
pub mod page;
