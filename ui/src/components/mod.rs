pub mod pagination_controls;
pub mod pagination_list;

pub use pagination_controls::PaginationControls;
pub use pagination_list::PaginationList;
