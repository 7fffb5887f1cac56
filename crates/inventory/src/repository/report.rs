use crate::{
    abstract_trait::report::{ReportRepositoryTrait, SalesFilter},
    domain::response::report::{
        CategorySalesSummary, DailySales, InventoryReportRow, PeriodTotals, ProductSalesSummary,
        SalesReportTotals, SalesTotals, StockAlertItem, TopProductRevenue, TopSellingProduct,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

/// Read-only aggregations over sales, stock and products.
#[derive(Clone)]
pub struct ReportRepository {
    db: ConnectionPool,
}

impl ReportRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn split(range: Option<(DateTime<Utc>, DateTime<Utc>)>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    match range {
        Some((from, to)) => (Some(from), Some(to)),
        None => (None, None),
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    async fn sales_per_product(&self) -> Result<Vec<ProductSalesSummary>, RepositoryError> {
        sqlx::query_as::<_, ProductSalesSummary>(
            r#"
            SELECT
                s.product_id,
                p.name AS product_name,
                SUM(s.total_sale_amount)::DOUBLE PRECISION AS total_revenue,
                SUM(s.quantity_sold)::BIGINT AS total_quantity_sold,
                AVG(s.sale_price)::DOUBLE PRECISION AS average_sale_price
            FROM sales s
            JOIN products p ON p.product_id = s.product_id
            GROUP BY s.product_id, p.name
            ORDER BY total_revenue DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to aggregate sales per product: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn sales_per_category(&self) -> Result<Vec<CategorySalesSummary>, RepositoryError> {
        sqlx::query_as::<_, CategorySalesSummary>(
            r#"
            SELECT
                p.category,
                SUM(s.total_sale_amount)::DOUBLE PRECISION AS total_revenue,
                SUM(s.quantity_sold)::BIGINT AS total_quantity_sold
            FROM sales s
            JOIN products p ON p.product_id = s.product_id
            GROUP BY p.category
            ORDER BY total_revenue DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to aggregate sales per category: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn top_selling_products(
        &self,
        limit: i64,
    ) -> Result<Vec<TopSellingProduct>, RepositoryError> {
        sqlx::query_as::<_, TopSellingProduct>(
            r#"
            SELECT
                s.product_id,
                p.name AS product_name,
                SUM(s.quantity_sold)::BIGINT AS total_quantity_sold
            FROM sales s
            JOIN products p ON p.product_id = s.product_id
            GROUP BY s.product_id, p.name
            ORDER BY total_quantity_sold DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to rank top selling products: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn sales_totals(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<SalesTotals, RepositoryError> {
        let (from, to) = split(range);

        sqlx::query_as::<_, SalesTotals>(
            r#"
            SELECT
                COALESCE(SUM(total_sale_amount), 0)::DOUBLE PRECISION AS total_revenue,
                COUNT(*) AS total_sales,
                COALESCE(AVG(total_sale_amount), 0)::DOUBLE PRECISION AS avg_order_value,
                COALESCE(SUM(quantity_sold), 0)::BIGINT AS total_quantity_sold
            FROM sales
            WHERE ($1::TIMESTAMPTZ IS NULL OR sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR sale_date <= $2)
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute sales totals: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn period_totals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodTotals, RepositoryError> {
        sqlx::query_as::<_, PeriodTotals>(
            r#"
            SELECT
                COALESCE(SUM(total_sale_amount), 0)::DOUBLE PRECISION AS total_revenue,
                COUNT(*) AS total_sales
            FROM sales
            WHERE sale_date >= $1 AND sale_date < $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute period totals: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn daily_sales_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailySales>, RepositoryError> {
        sqlx::query_as::<_, DailySales>(
            r#"
            SELECT
                TO_CHAR(sale_date AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS date,
                SUM(total_sale_amount)::DOUBLE PRECISION AS sales,
                COUNT(*) AS count
            FROM sales
            WHERE sale_date >= $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(since)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute daily sales: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn top_products_by_revenue(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: i64,
    ) -> Result<Vec<TopProductRevenue>, RepositoryError> {
        let (from, to) = split(range);

        sqlx::query_as::<_, TopProductRevenue>(
            r#"
            SELECT
                s.product_id,
                p.name AS product_name,
                p.category,
                SUM(s.total_sale_amount)::DOUBLE PRECISION AS total_revenue,
                SUM(s.quantity_sold)::BIGINT AS total_sales
            FROM sales s
            JOIN products p ON p.product_id = s.product_id
            WHERE ($1::TIMESTAMPTZ IS NULL OR s.sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR s.sale_date <= $2)
            GROUP BY s.product_id, p.name, p.category
            ORDER BY total_revenue DESC
            LIMIT $3
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to rank products by revenue: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn stock_alerts(
        &self,
        low_stock: i32,
        expiring_before: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<StockAlertItem>, RepositoryError> {
        sqlx::query_as::<_, StockAlertItem>(
            r#"
            SELECT
                s.stock_id,
                s.product_id,
                p.name AS product_name,
                s.stock,
                s.expiry_date
            FROM stocks s
            JOIN products p ON p.product_id = s.product_id
            WHERE s.stock < $1 OR s.expiry_date < $2
            ORDER BY s.expiry_date ASC NULLS LAST, s.stock ASC
            LIMIT $3
            "#,
        )
        .bind(low_stock)
        .bind(expiring_before)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch stock alerts: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn sales_report(
        &self,
        filter: &SalesFilter,
    ) -> Result<SalesReportTotals, RepositoryError> {
        let (from, to) = split(filter.range);

        sqlx::query_as::<_, SalesReportTotals>(
            r#"
            SELECT
                COALESCE(SUM(s.total_sale_amount), 0)::DOUBLE PRECISION AS total_sales,
                COALESCE(SUM(s.quantity_sold), 0)::BIGINT AS total_quantity
            FROM sales s
            LEFT JOIN products p ON p.product_id = s.product_id
            WHERE ($1::TIMESTAMPTZ IS NULL OR s.sale_date >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR s.sale_date <= $2)
              AND ($3::INTEGER IS NULL OR s.product_id = $3)
              AND ($4::TEXT IS NULL OR p.category = $4)
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(filter.product_id)
        .bind(filter.category.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to build sales report: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn inventory_report(&self) -> Result<Vec<InventoryReportRow>, RepositoryError> {
        sqlx::query_as::<_, InventoryReportRow>(
            r#"
            SELECT
                st.stock_id,
                st.product_id,
                st.stock,
                COALESCE(SUM(sa.quantity_sold), 0)::BIGINT AS total_sales
            FROM stocks st
            LEFT JOIN sales sa ON sa.product_id = st.product_id
            GROUP BY st.stock_id, st.product_id, st.stock
            ORDER BY st.stock_id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to build inventory report: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
