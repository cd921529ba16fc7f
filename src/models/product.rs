use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

/// Product document (stored in the `products` collection)
///
/// Every field except `_id` is required; `name` is unique across the
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    pub name: String,

    pub price: f64,

    pub description: String,
}

impl Product {
    pub const COLLECTION: &'static str = "products";

    pub fn indexes() -> Vec<IndexModel> {
        vec![IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("products_name_unique".to_string())
                    .build(),
            )
            .build()]
    }
}
