// Data-access components: one trait per entity plus its PostgreSQL implementation.
// Handlers depend on the traits so they can run against in-memory stores in tests.

pub mod category;
pub mod product;
pub mod profile;
pub mod shopping_cart;
pub mod user;

pub use category::{CategoryRepository, PgCategoryRepository};
pub use product::{PgProductRepository, ProductRepository};
pub use profile::{PgProfileRepository, ProfileRepository};
pub use shopping_cart::{assemble_cart, PgShoppingCartRepository, ShoppingCartRepository};
pub use user::{PgUserRepository, UserRepository};
