use crate::{
    abstract_trait::sale::SaleRepositoryTrait,
    model::sale::{NewSale, Sale, SaleWithProduct},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

const SALE_WITH_PRODUCT: &str = r#"
    SELECT
        s.sale_id,
        s.product_id,
        p.name AS product_name,
        p.description AS product_description,
        s.quantity_sold,
        s.sale_price,
        s.sale_date,
        s.buyer_gender,
        s.buyer_age,
        s.total_sale_amount
    FROM sales s
    LEFT JOIN products p ON p.product_id = s.product_id
"#;

#[derive(Clone)]
pub struct SaleRepository {
    db: ConnectionPool,
}

impl SaleRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SaleRepositoryTrait for SaleRepository {
    async fn create(&self, sale: &NewSale) -> Result<Sale, RepositoryError> {
        sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales
                (product_id, quantity_sold, sale_price, sale_date,
                 buyer_gender, buyer_age, total_sale_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(sale.product_id)
        .bind(sale.quantity_sold)
        .bind(sale.sale_price)
        .bind(sale.sale_date)
        .bind(&sale.buyer_gender)
        .bind(sale.buyer_age)
        .bind(sale.total_sale_amount)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to record sale for product {}: {:?}", sale.product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_all(&self) -> Result<Vec<Sale>, RepositoryError> {
        sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY sale_id")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch sales: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<Sale>, RepositoryError> {
        sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE product_id = $1 ORDER BY sale_id")
            .bind(product_id)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch sales for product {}: {:?}", product_id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_all_with_product(&self) -> Result<Vec<SaleWithProduct>, RepositoryError> {
        let sql = format!("{SALE_WITH_PRODUCT} ORDER BY s.sale_date DESC, s.sale_id DESC");

        sqlx::query_as::<_, SaleWithProduct>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch sales with products: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_product_with_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<SaleWithProduct>, RepositoryError> {
        let sql = format!(
            "{SALE_WITH_PRODUCT} WHERE s.product_id = $1 ORDER BY s.sale_date DESC, s.sale_id DESC"
        );

        sqlx::query_as::<_, SaleWithProduct>(&sql)
            .bind(product_id)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch sales with product {}: {:?}", product_id, e);
                RepositoryError::from(e)
            })
    }

    async fn exists_for_product(&self, product_id: i32) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sales WHERE product_id = $1)")
            .bind(product_id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to check sales for product {}: {:?}", product_id, e);
                RepositoryError::from(e)
            })
    }
}
