use axum::Router;

use crate::core::ArcContext;
use crate::db::Photo;
use crate::routes::crud;

pub fn router() -> Router<ArcContext> {
    crud::router::<Photo>()
}
