//! Hierarchical content categories.
//!
//! Categories form a forest: each one optionally points at a parent, and carries a
//! derived `level` (root = 0) and materialized `path` of ancestor slugs joined by `/`.
//! Both are recomputed whenever a category's slug or parent changes, including for
//! every descendant.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List categories (`parent_id`, `level` filters) |
//! | POST | `/api/categories` | Create a category |
//! | GET | `/api/categories/roots` | Root categories with their children |
//! | GET | `/api/categories/tree` | Full nested hierarchy |
//! | GET | `/api/categories/search?q=` | Search name and description |
//! | GET | `/api/categories/id/{id}` | Get category by id |
//! | GET | `/api/categories/id/{id}/count` | Number of posts in a category |
//! | GET | `/api/categories/{slug}` | Get category by slug |
//! | PUT | `/api/categories/{id}` | Update a category |
//! | DELETE | `/api/categories/{id}?deleteChildren=` | Delete a category |

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod store;

pub use services::CategoryService;
