mod meta;
pub use self::meta::ProductPage;

mod product;
pub use self::product::{Category, Product, ProductID};
