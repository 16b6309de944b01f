use sqlx::PgPool;

use crate::database::{
    models::{DisplayOrderItem, ItemType},
    utils::sql,
};

#[derive(Clone)]
pub struct DisplayOrderRepository {
    pool: PgPool,
}

impl DisplayOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ordering rows of one item type, lowest rank first.
    pub async fn get_ranked(
        &self,
        item_type: ItemType,
        limit: Option<i64>,
    ) -> Result<Vec<DisplayOrderItem>, sqlx::Error> {
        let items = sqlx::query_as::<_, DisplayOrderItem>(&sql(r#"
            SELECT
                id,
                item_type,
                item_id,
                display_order
            FROM
                display_order_items
            WHERE
                item_type = ?
            ORDER BY
                display_order ASC
            LIMIT ?
        "#))
        .bind(item_type.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
