//! In-memory repositories and a router harness for handler tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::app::app;
use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{CartLine, Category, Product, Profile, ShoppingCart, User};
use crate::database::repository::{
    assemble_cart, CategoryRepository, ProductRepository, ProfileRepository, ShoppingCartRepository,
    UserRepository,
};
use crate::state::AppState;

/// (username, role) of a seeded principal
pub type Principal = (&'static str, &'static str);

pub const ALICE: Principal = ("alice", "ROLE_USER");
pub const ADMIN: Principal = ("admin", "ROLE_ADMIN");

fn injected_fault() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::Protocol("injected fault".to_string()))
}

pub fn sample_product(product_id: i32, price: &str) -> Product {
    Product {
        product_id,
        name: format!("Product {}", product_id),
        price: price.parse().expect("valid decimal"),
        category_id: 1,
        description: String::new(),
        subcategory: String::new(),
        stock: 100,
        featured: false,
        image_url: String::new(),
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: HashMap<String, User>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.username.clone(), u)).collect(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.get(username).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: RwLock<HashMap<i32, Profile>>,
    fail_next: AtomicBool,
}

impl InMemoryProfiles {
    /// Make the next call return a storage fault
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_fault(&self) -> Result<(), DatabaseError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(injected_fault());
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Option<Profile>, DatabaseError> {
        self.check_fault()?;
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn update(&self, user_id: i32, profile: &Profile) -> Result<(), DatabaseError> {
        self.check_fault()?;
        let stored = Profile {
            user_id,
            ..profile.clone()
        };
        self.profiles.write().await.insert(user_id, stored);
        Ok(())
    }
}

/// Categories referenced by `products`, mirroring the products foreign key
pub struct InMemoryCategories {
    rows: RwLock<BTreeMap<i32, Category>>,
    next_id: AtomicI32,
    products: Arc<dyn ProductRepository>,
}

impl InMemoryCategories {
    pub fn with(categories: Vec<Category>, products: Arc<dyn ProductRepository>) -> Self {
        let next_id = categories.iter().map(|c| c.category_id).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(categories.into_iter().map(|c| (c.category_id, c)).collect()),
            next_id: AtomicI32::new(next_id),
            products,
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn list_all(&self) -> Result<Vec<Category>, DatabaseError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, category_id: i32) -> Result<Option<Category>, DatabaseError> {
        Ok(self.rows.read().await.get(&category_id).cloned())
    }

    async fn create(&self, category: &Category) -> Result<Category, DatabaseError> {
        let created = Category {
            category_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            ..category.clone()
        };
        self.rows.write().await.insert(created.category_id, created.clone());
        Ok(created)
    }

    async fn update(&self, category_id: i32, category: &Category) -> Result<(), DatabaseError> {
        if let Some(row) = self.rows.write().await.get_mut(&category_id) {
            row.name = category.name.clone();
            row.description = category.description.clone();
        }
        Ok(())
    }

    async fn delete(&self, category_id: i32) -> Result<(), DatabaseError> {
        if !self.products.list_by_category_id(category_id).await?.is_empty() {
            return Err(DatabaseError::Conflict(format!("Category {} still has products", category_id)));
        }
        self.rows.write().await.remove(&category_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    products: RwLock<BTreeMap<i32, Product>>,
    failing: bool,
}

impl InMemoryProducts {
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.product_id, p)).collect()),
            failing: false,
        }
    }

    /// Every lookup returns a storage fault
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn remove(&self, product_id: i32) {
        self.products.write().await.remove(&product_id);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn get_by_id(&self, product_id: i32) -> Result<Option<Product>, DatabaseError> {
        if self.failing {
            return Err(injected_fault());
        }
        Ok(self.products.read().await.get(&product_id).cloned())
    }

    async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, DatabaseError> {
        if self.failing {
            return Err(injected_fault());
        }
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }
}

/// Cart rows keyed by (user_id, product_id), mirroring the table's primary key
pub struct InMemoryCarts {
    lines: RwLock<BTreeMap<(i32, i32), i32>>,
    products: Arc<dyn ProductRepository>,
}

impl InMemoryCarts {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self {
            lines: RwLock::new(BTreeMap::new()),
            products,
        }
    }
}

#[async_trait]
impl ShoppingCartRepository for InMemoryCarts {
    async fn get_by_user_id(&self, user_id: i32) -> Result<ShoppingCart, DatabaseError> {
        let lines: Vec<CartLine> = self
            .lines
            .read()
            .await
            .range((user_id, i32::MIN)..=(user_id, i32::MAX))
            .map(|(&(_, product_id), &quantity)| CartLine { product_id, quantity })
            .collect();

        assemble_cart(user_id, lines, self.products.as_ref()).await
    }

    async fn add_product_to_cart(&self, user_id: i32, product_id: i32) -> Result<ShoppingCart, DatabaseError> {
        *self.lines.write().await.entry((user_id, product_id)).or_insert(0) += 1;
        self.get_by_user_id(user_id).await
    }

    async fn update_product_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), DatabaseError> {
        if let Some(line) = self.lines.write().await.get_mut(&(user_id, product_id)) {
            *line = quantity;
        }
        Ok(())
    }

    async fn clear_cart(&self, user_id: i32) -> Result<(), DatabaseError> {
        self.lines.write().await.retain(|&(owner, _), _| owner != user_id);
        Ok(())
    }
}

/// Router wired to seeded in-memory stores:
/// users alice (1) and admin (2), categories 1 and 2, products 5 and 7 in
/// category 1 and product 9 in category 2.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub profiles: Arc<InMemoryProfiles>,
    pub products: Arc<InMemoryProducts>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = InMemoryUsers::with(vec![
            User { user_id: 1, username: "alice".to_string(), role: "ROLE_USER".to_string() },
            User { user_id: 2, username: "admin".to_string(), role: "ROLE_ADMIN".to_string() },
        ]);
        let mut product_9 = sample_product(9, "12.50");
        product_9.category_id = 2;
        let products = Arc::new(InMemoryProducts::with(vec![
            sample_product(5, "19.99"),
            sample_product(7, "5.00"),
            product_9,
        ]));
        let categories = InMemoryCategories::with(vec![
            Category { category_id: 1, name: "Electronics".to_string(), description: "Gadgets".to_string() },
            Category { category_id: 2, name: "Fashion".to_string(), description: "Clothing".to_string() },
        ], products.clone());
        let profiles = Arc::new(InMemoryProfiles::default());

        let state = AppState {
            config: Arc::new(AppConfig::development()),
            pool: None,
            users: Arc::new(users),
            profiles: profiles.clone(),
            categories: Arc::new(categories),
            carts: Arc::new(InMemoryCarts::new(products.clone())),
            products: products.clone(),
        };

        Self {
            router: app(state.clone()),
            state,
            profiles,
            products,
        }
    }

    pub fn token_for(&self, (username, role): Principal) -> String {
        generate_jwt(&Claims::new(username, role, 1), &self.state.config.security).expect("token")
    }

    /// Send a request as `principal` (or anonymously) and decode the JSON body.
    /// An empty body decodes to `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        principal: Option<Principal>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = principal.map(|p| self.token_for(p));
        self.dispatch(method, uri, token.as_deref(), body).await
    }

    pub async fn send_with_token(&self, method: Method, uri: &str, token: &str) -> (StatusCode, Value) {
        self.dispatch(method, uri, Some(token), None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
