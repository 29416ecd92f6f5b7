//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod media;
pub mod order;
pub mod order_product;
pub mod product;
pub mod review;
pub mod user;

// Re-export specific types to avoid conflicts
pub use media::{Column as MediaColumn, Entity as Media, Model as MediaModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderState};
pub use order_product::{
    Column as OrderProductColumn, Entity as OrderProduct, Model as OrderProductModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, Sex};
