//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or an open transaction's connection) as the
//! first argument.

pub mod category_repo;
pub mod product_image_repo;
pub mod product_option_repo;
pub mod product_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use product_image_repo::ProductImageRepo;
pub use product_option_repo::ProductOptionRepo;
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
