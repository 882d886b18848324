//! Handlers for `/items` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/items` | Optional `?skip=<n>&limit=<n>` (defaults 0, 10) |
//! | `POST`   | `/items` | Body: `{"name":"pen","description":"blue"}` |
//! | `GET`    | `/items/:id` | 404 if not found |
//! | `PUT`    | `/items/:id` | Full replace of name and description; 404 if not found |
//! | `DELETE` | `/items/:id` | Returns the deleted item; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use stockroom_core::{
  item::{Item, ItemId, NewItem, Page},
  service::ItemService,
  store::ItemStore,
};

use crate::error::ApiError;

// ─── Shapes ───────────────────────────────────────────────────────────────────

/// Request body for create and update.
#[derive(Debug, Deserialize)]
pub struct ItemBody {
  pub name:        String,
  #[serde(default)]
  pub description: Option<String>,
}

impl ItemBody {
  fn into_new_item(self) -> Result<NewItem, ApiError> {
    Ok(NewItem::new(self.name, self.description)?)
  }
}

/// The read model returned to clients. `created_at` is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
  pub id:          ItemId,
  pub name:        String,
  pub description: Option<String>,
}

impl From<Item> for ItemView {
  fn from(item: Item) -> Self {
    Self { id: item.id, name: item.name, description: item.description }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub skip:  Option<u64>,
  pub limit: Option<u64>,
}

/// `GET /items[?skip=<n>&limit=<n>]`
pub async fn list<S: ItemStore>(
  State(service): State<ItemService<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
  let page = Page::new(
    params.skip.unwrap_or(0),
    params.limit.unwrap_or(Page::DEFAULT_LIMIT),
  );
  let items = service.list(page).await?;
  Ok(Json(items.into_iter().map(ItemView::from).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /items`
pub async fn create<S: ItemStore>(
  State(service): State<ItemService<S>>,
  Json(body): Json<ItemBody>,
) -> Result<Json<ItemView>, ApiError> {
  let item = service.create(body.into_new_item()?).await?;
  Ok(Json(item.into()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /items/:id`
pub async fn get_one<S: ItemStore>(
  State(service): State<ItemService<S>>,
  Path(id): Path<ItemId>,
) -> Result<Json<ItemView>, ApiError> {
  Ok(Json(service.read(id).await?.into()))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /items/:id`
pub async fn update_one<S: ItemStore>(
  State(service): State<ItemService<S>>,
  Path(id): Path<ItemId>,
  Json(body): Json<ItemBody>,
) -> Result<Json<ItemView>, ApiError> {
  let item = service.update(id, body.into_new_item()?).await?;
  Ok(Json(item.into()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /items/:id`
pub async fn delete_one<S: ItemStore>(
  State(service): State<ItemService<S>>,
  Path(id): Path<ItemId>,
) -> Result<Json<ItemView>, ApiError> {
  Ok(Json(service.delete(id).await?.into()))
}
