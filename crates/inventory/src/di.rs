use crate::{
    abstract_trait::{
        category::DynCategoryService, membership::DynMembershipService, ml_client::DynMlClient,
        notification::DynNotificationService, predict::DynPredictService,
        product::DynProductService, report::DynReportService, sale::DynSaleService,
        stock::DynStockService,
    },
    repository::{
        CategoryRepository, ExpiryAlertRepository, MemberRepository, PlanRepository,
        ProductRepository, ReportRepository, SaleRepository, SequenceRepository,
        StockHistoryRepository, StockRepository,
    },
    service::{
        CategoryService, MembershipService, NotificationService, PredictService, ProductService,
        ReportService, SaleService, StockService,
    },
};
use prometheus_client::registry::Registry;
use shared::{cache::CacheStore, config::ConnectionPool, utils::Metrics};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: DynProductService,
    pub stock_service: DynStockService,
    pub sale_service: DynSaleService,
    pub category_service: DynCategoryService,
    pub notification_service: DynNotificationService,
    pub predict_service: DynPredictService,
    pub membership_service: DynMembershipService,
    pub report_service: DynReportService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &"DynProductService")
            .field("stock_service", &"DynStockService")
            .field("sale_service", &"DynSaleService")
            .field("category_service", &"DynCategoryService")
            .field("notification_service", &"DynNotificationService")
            .field("predict_service", &"DynPredictService")
            .field("membership_service", &"DynMembershipService")
            .field("report_service", &"DynReportService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub cache: Arc<CacheStore>,
    pub ml_client: DynMlClient,
}

impl DependenciesInject {
    /// Wires repositories into services. All services share one `Metrics`
    /// family registered under the `inventory` prefix.
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            pool,
            cache,
            ml_client,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "inventory");

        let products = Arc::new(ProductRepository::new(pool.clone()));
        let stocks = Arc::new(StockRepository::new(pool.clone()));
        let history = Arc::new(StockHistoryRepository::new(pool.clone()));
        let sales = Arc::new(SaleRepository::new(pool.clone()));
        let sequences = Arc::new(SequenceRepository::new(pool.clone()));
        let categories = Arc::new(CategoryRepository::new(pool.clone()));
        let alerts = Arc::new(ExpiryAlertRepository::new(pool.clone()));
        let plans = Arc::new(PlanRepository::new(pool.clone()));
        let members = Arc::new(MemberRepository::new(pool.clone()));
        let reports = Arc::new(ReportRepository::new(pool));

        let product_service: DynProductService = Arc::new(ProductService::new(
            products.clone(),
            stocks.clone(),
            sales.clone(),
            sequences.clone(),
            cache.clone(),
            metrics.clone(),
        ));

        let stock_service: DynStockService = Arc::new(StockService::new(
            products.clone(),
            stocks.clone(),
            history,
            cache.clone(),
            metrics.clone(),
        ));

        let sale_service: DynSaleService = Arc::new(SaleService::new(
            products.clone(),
            stocks.clone(),
            sales.clone(),
            reports.clone(),
            cache.clone(),
            metrics.clone(),
        ));

        let category_service: DynCategoryService = Arc::new(CategoryService::new(
            categories,
            sequences.clone(),
            cache.clone(),
            metrics.clone(),
        ));

        let notification_service: DynNotificationService = Arc::new(NotificationService::new(
            alerts,
            stocks,
            products,
            metrics.clone(),
        ));

        let predict_service: DynPredictService =
            Arc::new(PredictService::new(ml_client, sales, metrics.clone()));

        let membership_service: DynMembershipService = Arc::new(MembershipService::new(
            plans,
            members,
            sequences,
            cache,
            metrics.clone(),
        ));

        let report_service: DynReportService = Arc::new(ReportService::new(reports, metrics));

        Self {
            product_service,
            stock_service,
            sale_service,
            category_service,
            notification_service,
            predict_service,
            membership_service,
            report_service,
        }
    }
}
