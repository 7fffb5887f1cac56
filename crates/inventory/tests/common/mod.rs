#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inventory::{
    abstract_trait::{
        category::CategoryRepositoryTrait,
        membership::{MemberRepositoryTrait, PlanRepositoryTrait},
        ml_client::MlClientTrait,
        notification::ExpiryAlertRepositoryTrait,
        product::ProductRepositoryTrait,
        report::{ReportRepositoryTrait, SalesFilter},
        sale::SaleRepositoryTrait,
        sequence::SequenceRepositoryTrait,
        stock::{StockHistoryRepositoryTrait, StockRepositoryTrait},
    },
    domain::response::report::{
        CategorySalesSummary, DailySales, InventoryReportRow, PeriodTotals, ProductSalesSummary,
        SalesReportTotals, SalesTotals, StockAlertItem, TopProductRevenue, TopSellingProduct,
    },
    model::{
        category::Category,
        expiry_alert::{AlertLevel, ExpiryAlert, NewExpiryAlert, NotificationStatus},
        membership::{Member, MemberFilter, MemberStatus, NewMember, NewPlan, Plan},
        product::{NewProduct, Product, ProductWithStock},
        sale::{NewSale, Sale, SaleWithProduct},
        stock::{NewStock, Stock},
        stock_history::{NewStockHistory, StockHistory},
    },
    service::{
        CategoryService, MembershipService, NotificationService, PredictService, ProductService,
        ReportService, SaleService, StockService,
    },
};
use serde_json::{Value, json};
use shared::{
    cache::CacheStore,
    config::RedisConfig,
    errors::{RepositoryError, ServiceError},
    utils::Metrics,
};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    counters: HashMap<String, i32>,
    products: Vec<Product>,
    stocks: Vec<Stock>,
    history: Vec<StockHistory>,
    sales: Vec<Sale>,
    categories: Vec<Category>,
    alerts: Vec<ExpiryAlert>,
    plans: Vec<Plan>,
    members: Vec<Member>,
}

impl Tables {
    fn id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Every repository trait over one set of in-memory tables, so joins see
/// the same rows the services wrote.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.lock().unwrap();
        f(&mut tables)
    }

    pub fn seed_product(&self, name: &str, category: &str) -> Product {
        self.with(|t| {
            let now = Utc::now();
            let product = Product {
                product_id: t.id(),
                name: name.to_string(),
                description: None,
                category: category.to_string(),
                sub_category: None,
                unit_of_measure: "piece".to_string(),
                created_at: now,
                updated_at: now,
            };
            t.products.push(product.clone());
            product
        })
    }

    pub fn seed_stock(
        &self,
        product_id: i32,
        quantity: i32,
        price: f64,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Stock {
        self.with(|t| {
            let now = Utc::now();
            let stock = Stock {
                stock_id: t.id(),
                product_id,
                stock: quantity,
                price,
                expiry_date,
                created_at: now,
                updated_at: now,
            };
            t.stocks.push(stock.clone());
            stock
        })
    }

    pub fn seed_alert(
        &self,
        stock_id: i32,
        product_id: i32,
        level: AlertLevel,
        generated_on: DateTime<Utc>,
    ) -> ExpiryAlert {
        self.with(|t| {
            let alert = ExpiryAlert {
                alert_id: t.id(),
                stock_id,
                product_id,
                alert_level: level,
                expiry_date: generated_on,
                alert_generated_on: generated_on,
                notification_status: NotificationStatus::Pending,
                created_at: generated_on,
                updated_at: generated_on,
            };
            t.alerts.push(alert.clone());
            alert
        })
    }

    pub fn set_expiry(&self, stock_id: i32, expiry_date: DateTime<Utc>) {
        self.with(|t| {
            if let Some(stock) = t.stocks.iter_mut().find(|s| s.stock_id == stock_id) {
                stock.expiry_date = Some(expiry_date);
            }
        })
    }

    pub fn stock_of(&self, product_id: i32) -> Option<i32> {
        self.with(|t| {
            t.stocks
                .iter()
                .find(|s| s.product_id == product_id)
                .map(|s| s.stock)
        })
    }

    pub fn alerts(&self) -> Vec<ExpiryAlert> {
        self.with(|t| t.alerts.clone())
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.with(|t| t.sales.clone())
    }

    pub fn history(&self) -> Vec<StockHistory> {
        self.with(|t| t.history.clone())
    }

    pub fn plan(&self, plan_id: i32) -> Option<Plan> {
        self.with(|t| t.plans.iter().find(|p| p.plan_id == plan_id).cloned())
    }
}

#[async_trait]
impl SequenceRepositoryTrait for InMemoryStore {
    async fn next_sequence(&self, name: &str) -> Result<i32, RepositoryError> {
        Ok(self.with(|t| {
            let seq = t.counters.entry(name.to_string()).or_insert(0);
            *seq += 1;
            *seq
        }))
    }
}

#[async_trait]
impl ProductRepositoryTrait for InMemoryStore {
    async fn find_all_with_stock(&self) -> Result<Vec<ProductWithStock>, RepositoryError> {
        Ok(self.with(|t| {
            t.products
                .iter()
                .map(|p| {
                    let stock = t.stocks.iter().find(|s| s.product_id == p.product_id);
                    ProductWithStock {
                        product_id: p.product_id,
                        name: p.name.clone(),
                        description: p.description.clone(),
                        category: p.category.clone(),
                        sub_category: p.sub_category.clone(),
                        unit_of_measure: p.unit_of_measure.clone(),
                        price: stock.map(|s| s.price),
                        stock: stock.map(|s| s.stock).unwrap_or(0),
                        expiry_date: stock.and_then(|s| s.expiry_date),
                    }
                })
                .collect()
        }))
    }

    async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.with(|t| {
            t.products
                .iter()
                .find(|p| p.product_id == product_id)
                .cloned()
        }))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self.with(|t| t.products.iter().find(|p| p.name == name).cloned()))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        self.with(|t| {
            if t.products.iter().any(|p| p.name == product.name) {
                return Err(RepositoryError::AlreadyExists("products_name_key".into()));
            }
            let now = Utc::now();
            let created = Product {
                product_id: product.product_id,
                name: product.name.clone(),
                description: product.description.clone(),
                category: product.category.clone(),
                sub_category: product.sub_category.clone(),
                unit_of_measure: product.unit_of_measure.clone(),
                created_at: now,
                updated_at: now,
            };
            t.products.push(created.clone());
            Ok(created)
        })
    }

    async fn update(&self, product: &Product) -> Result<Product, RepositoryError> {
        self.with(|t| {
            let row = t
                .products
                .iter_mut()
                .find(|p| p.product_id == product.product_id)
                .ok_or(RepositoryError::NotFound)?;
            *row = Product {
                updated_at: Utc::now(),
                ..product.clone()
            };
            Ok(row.clone())
        })
    }

    async fn delete(&self, product_id: i32) -> Result<(), RepositoryError> {
        self.with(|t| t.products.retain(|p| p.product_id != product_id));
        Ok(())
    }
}

#[async_trait]
impl StockRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError> {
        Ok(self.with(|t| t.stocks.clone()))
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Option<Stock>, RepositoryError> {
        Ok(self.with(|t| t.stocks.iter().find(|s| s.product_id == product_id).cloned()))
    }

    async fn create(&self, stock: &NewStock) -> Result<Stock, RepositoryError> {
        Ok(self.seed_stock(stock.product_id, stock.stock, stock.price, stock.expiry_date))
    }

    async fn increment(
        &self,
        product_id: i32,
        quantity: i32,
        price: Option<f64>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Stock>, RepositoryError> {
        Ok(self.with(|t| {
            t.stocks
                .iter_mut()
                .find(|s| s.product_id == product_id)
                .map(|s| {
                    s.stock += quantity;
                    if let Some(price) = price {
                        s.price = price;
                    }
                    if expiry_date.is_some() {
                        s.expiry_date = expiry_date;
                    }
                    s.updated_at = Utc::now();
                    s.clone()
                })
        }))
    }

    async fn replace(
        &self,
        product_id: i32,
        quantity: i32,
        price: f64,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Stock>, RepositoryError> {
        Ok(self.with(|t| {
            t.stocks
                .iter_mut()
                .find(|s| s.product_id == product_id)
                .map(|s| {
                    s.stock = quantity;
                    s.price = price;
                    s.expiry_date = expiry_date;
                    s.updated_at = Utc::now();
                    s.clone()
                })
        }))
    }

    async fn decrement(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<Stock>, RepositoryError> {
        Ok(self.with(|t| {
            t.stocks
                .iter_mut()
                .find(|s| s.product_id == product_id && s.stock >= quantity)
                .map(|s| {
                    s.stock -= quantity;
                    s.updated_at = Utc::now();
                    s.clone()
                })
        }))
    }
}

#[async_trait]
impl StockHistoryRepositoryTrait for InMemoryStore {
    async fn append(&self, entry: &NewStockHistory) -> Result<StockHistory, RepositoryError> {
        Ok(self.with(|t| {
            let now = Utc::now();
            let row = StockHistory {
                history_id: t.id(),
                product_id: entry.product_id,
                stock_added: entry.stock_added,
                price: entry.price,
                expiry_date: entry.expiry_date,
                added_at: now,
                updated_at: now,
            };
            t.history.push(row.clone());
            row
        }))
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<StockHistory>, RepositoryError> {
        Ok(self.with(|t| {
            t.history
                .iter()
                .rev()
                .filter(|h| h.product_id == product_id)
                .cloned()
                .collect()
        }))
    }
}

fn sale_with_product(t: &Tables, sale: &Sale) -> SaleWithProduct {
    let product = t.products.iter().find(|p| p.product_id == sale.product_id);
    SaleWithProduct {
        sale_id: sale.sale_id,
        product_id: sale.product_id,
        product_name: product.map(|p| p.name.clone()),
        product_description: product.and_then(|p| p.description.clone()),
        quantity_sold: sale.quantity_sold,
        sale_price: sale.sale_price,
        sale_date: sale.sale_date,
        buyer_gender: sale.buyer_gender.clone(),
        buyer_age: sale.buyer_age,
        total_sale_amount: sale.total_sale_amount,
    }
}

#[async_trait]
impl SaleRepositoryTrait for InMemoryStore {
    async fn create(&self, sale: &NewSale) -> Result<Sale, RepositoryError> {
        Ok(self.with(|t| {
            let now = Utc::now();
            let row = Sale {
                sale_id: t.id(),
                product_id: sale.product_id,
                quantity_sold: sale.quantity_sold,
                sale_price: sale.sale_price,
                sale_date: sale.sale_date,
                buyer_gender: sale.buyer_gender.clone(),
                buyer_age: sale.buyer_age,
                total_sale_amount: sale.total_sale_amount,
                created_at: now,
                updated_at: now,
            };
            t.sales.push(row.clone());
            row
        }))
    }

    async fn find_all(&self) -> Result<Vec<Sale>, RepositoryError> {
        Ok(self.sales())
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<Sale>, RepositoryError> {
        Ok(self.with(|t| {
            t.sales
                .iter()
                .filter(|s| s.product_id == product_id)
                .cloned()
                .collect()
        }))
    }

    async fn find_all_with_product(&self) -> Result<Vec<SaleWithProduct>, RepositoryError> {
        Ok(self.with(|t| {
            t.sales
                .iter()
                .rev()
                .map(|s| sale_with_product(t, s))
                .collect()
        }))
    }

    async fn find_by_product_with_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<SaleWithProduct>, RepositoryError> {
        Ok(self.with(|t| {
            t.sales
                .iter()
                .rev()
                .filter(|s| s.product_id == product_id)
                .map(|s| sale_with_product(t, s))
                .collect()
        }))
    }

    async fn exists_for_product(&self, product_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.with(|t| t.sales.iter().any(|s| s.product_id == product_id)))
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.with(|t| t.categories.clone()))
    }

    async fn find_by_id(&self, category_id: i32) -> Result<Option<Category>, RepositoryError> {
        Ok(self.with(|t| {
            t.categories
                .iter()
                .find(|c| c.category_id == category_id)
                .cloned()
        }))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        Ok(self.with(|t| t.categories.iter().find(|c| c.name == name).cloned()))
    }

    async fn create(
        &self,
        category_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        self.with(|t| {
            if t.categories.iter().any(|c| c.name == name) {
                return Err(RepositoryError::AlreadyExists("categories_name_key".into()));
            }
            let now = Utc::now();
            let row = Category {
                category_id,
                name: name.to_string(),
                description: description.map(str::to_string),
                created_at: now,
                updated_at: now,
            };
            t.categories.push(row.clone());
            Ok(row)
        })
    }

    async fn update(&self, category: &Category) -> Result<Category, RepositoryError> {
        self.with(|t| {
            let row = t
                .categories
                .iter_mut()
                .find(|c| c.category_id == category.category_id)
                .ok_or(RepositoryError::NotFound)?;
            *row = Category {
                updated_at: Utc::now(),
                ..category.clone()
            };
            Ok(row.clone())
        })
    }

    async fn delete(&self, category_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.with(|t| {
            let before = t.categories.len();
            t.categories.retain(|c| c.category_id != category_id);
            t.categories.len() != before
        }))
    }
}

fn newest_first(mut alerts: Vec<ExpiryAlert>) -> Vec<ExpiryAlert> {
    alerts.sort_by(|a, b| {
        b.alert_generated_on
            .cmp(&a.alert_generated_on)
            .then(b.alert_id.cmp(&a.alert_id))
    });
    alerts
}

#[async_trait]
impl ExpiryAlertRepositoryTrait for InMemoryStore {
    async fn find_active_by_stock(
        &self,
        stock_id: i32,
    ) -> Result<Option<ExpiryAlert>, RepositoryError> {
        Ok(self.with(|t| t.alerts.iter().find(|a| a.stock_id == stock_id).cloned()))
    }

    async fn create(&self, alert: &NewExpiryAlert) -> Result<ExpiryAlert, RepositoryError> {
        self.with(|t| {
            if t.alerts.iter().any(|a| a.stock_id == alert.stock_id) {
                return Err(RepositoryError::AlreadyExists(
                    "expiry_alerts_active_stock_idx".into(),
                ));
            }
            let row = ExpiryAlert {
                alert_id: t.id(),
                stock_id: alert.stock_id,
                product_id: alert.product_id,
                alert_level: alert.alert_level,
                expiry_date: alert.expiry_date,
                alert_generated_on: alert.alert_generated_on,
                notification_status: NotificationStatus::Pending,
                created_at: alert.alert_generated_on,
                updated_at: alert.alert_generated_on,
            };
            t.alerts.push(row.clone());
            Ok(row)
        })
    }

    async fn refresh(
        &self,
        alert_id: i32,
        level: AlertLevel,
        expiry_date: DateTime<Utc>,
    ) -> Result<ExpiryAlert, RepositoryError> {
        self.with(|t| {
            let row = t
                .alerts
                .iter_mut()
                .find(|a| a.alert_id == alert_id)
                .ok_or(RepositoryError::NotFound)?;
            row.alert_level = level;
            row.expiry_date = expiry_date;
            row.updated_at = Utc::now();
            Ok(row.clone())
        })
    }

    async fn find_filtered(
        &self,
        level: Option<AlertLevel>,
        status: Option<NotificationStatus>,
    ) -> Result<Vec<ExpiryAlert>, RepositoryError> {
        let matching = self.with(|t| {
            t.alerts
                .iter()
                .filter(|a| level.is_none_or(|l| a.alert_level == l))
                .filter(|a| status.is_none_or(|s| a.notification_status == s))
                .cloned()
                .collect()
        });
        Ok(newest_first(matching))
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<ExpiryAlert>, RepositoryError> {
        let matching = self.with(|t| {
            t.alerts
                .iter()
                .filter(|a| a.product_id == product_id)
                .cloned()
                .collect()
        });
        Ok(newest_first(matching))
    }

    async fn acknowledge(&self, alert_id: i32) -> Result<Option<ExpiryAlert>, RepositoryError> {
        Ok(self.with(|t| {
            t.alerts.iter_mut().find(|a| a.alert_id == alert_id).map(|a| {
                a.notification_status = NotificationStatus::Acknowledged;
                a.clone()
            })
        }))
    }

    async fn delete(&self, alert_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.with(|t| {
            let before = t.alerts.len();
            t.alerts.retain(|a| a.alert_id != alert_id);
            t.alerts.len() != before
        }))
    }

    async fn find_pending_by_levels(
        &self,
        levels: &[AlertLevel],
        limit: i64,
    ) -> Result<Vec<ExpiryAlert>, RepositoryError> {
        let mut matching: Vec<ExpiryAlert> = self.with(|t| {
            t.alerts
                .iter()
                .filter(|a| a.notification_status == NotificationStatus::Pending)
                .filter(|a| levels.contains(&a.alert_level))
                .cloned()
                .collect()
        });
        matching.sort_by(|a, b| {
            b.alert_level
                .severity()
                .cmp(&a.alert_level.severity())
                .then(b.alert_generated_on.cmp(&a.alert_generated_on))
                .then(b.alert_id.cmp(&a.alert_id))
        });
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }
}

#[async_trait]
impl PlanRepositoryTrait for InMemoryStore {
    async fn create(&self, plan: &NewPlan) -> Result<Plan, RepositoryError> {
        self.with(|t| {
            if t.plans.iter().any(|p| p.name == plan.name) {
                return Err(RepositoryError::AlreadyExists("plans_name_key".into()));
            }
            let now = Utc::now();
            let row = Plan {
                plan_id: plan.plan_id,
                name: plan.name.clone(),
                price: plan.price,
                features: plan.features.clone(),
                subscribers: 0,
                created_at: now,
                updated_at: now,
            };
            t.plans.push(row.clone());
            Ok(row)
        })
    }

    async fn find_all(&self) -> Result<Vec<Plan>, RepositoryError> {
        let mut plans = self.with(|t| t.plans.clone());
        plans.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.plan_id.cmp(&b.plan_id)));
        Ok(plans)
    }

    async fn find_by_id(&self, plan_id: i32) -> Result<Option<Plan>, RepositoryError> {
        Ok(self.plan(plan_id))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.with(|t| t.plans.len() as i64))
    }

    async fn adjust_subscribers(&self, plan_id: i32, delta: i32) -> Result<(), RepositoryError> {
        self.with(|t| {
            if let Some(plan) = t.plans.iter_mut().find(|p| p.plan_id == plan_id) {
                plan.subscribers = (plan.subscribers + delta).max(0);
            }
        });
        Ok(())
    }
}

#[async_trait]
impl MemberRepositoryTrait for InMemoryStore {
    async fn create(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        self.with(|t| {
            if t.members.iter().any(|m| m.email == member.email) {
                return Err(RepositoryError::AlreadyExists("members_email_key".into()));
            }
            let now = Utc::now();
            let row = Member {
                member_id: member.member_id,
                name: member.name.clone(),
                email: member.email.clone(),
                plan_id: member.plan_id,
                status: MemberStatus::Active,
                renewal_date: member.renewal_date,
                created_at: now,
                updated_at: now,
            };
            t.members.push(row.clone());
            Ok(row)
        })
    }

    async fn find_filtered(&self, filter: &MemberFilter) -> Result<Vec<Member>, RepositoryError> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        Ok(self.with(|t| {
            t.members
                .iter()
                .rev()
                .filter(|m| filter.status.is_none_or(|s| m.status == s))
                .filter(|m| filter.plan_id.is_none_or(|p| m.plan_id == p))
                .filter(|m| {
                    needle.as_ref().is_none_or(|n| {
                        m.name.to_lowercase().contains(n) || m.email.to_lowercase().contains(n)
                    })
                })
                .cloned()
                .collect()
        }))
    }

    async fn find_by_id(&self, member_id: i32) -> Result<Option<Member>, RepositoryError> {
        Ok(self.with(|t| t.members.iter().find(|m| m.member_id == member_id).cloned()))
    }

    async fn update_status(
        &self,
        member_id: i32,
        status: MemberStatus,
    ) -> Result<Option<Member>, RepositoryError> {
        Ok(self.with(|t| {
            t.members
                .iter_mut()
                .find(|m| m.member_id == member_id)
                .map(|m| {
                    m.status = status;
                    m.clone()
                })
        }))
    }

    async fn delete(&self, member_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.with(|t| {
            let before = t.members.len();
            t.members.retain(|m| m.member_id != member_id);
            t.members.len() != before
        }))
    }

    async fn count_active(&self) -> Result<i64, RepositoryError> {
        Ok(self.with(|t| {
            t.members
                .iter()
                .filter(|m| m.status == MemberStatus::Active)
                .count() as i64
        }))
    }

    async fn active_revenue(&self) -> Result<f64, RepositoryError> {
        Ok(self.with(|t| {
            t.members
                .iter()
                .filter(|m| m.status == MemberStatus::Active)
                .filter_map(|m| t.plans.iter().find(|p| p.plan_id == m.plan_id))
                .map(|p| p.price)
                .sum()
        }))
    }

    async fn count_renewals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, RepositoryError> {
        Ok(self.with(|t| {
            t.members
                .iter()
                .filter(|m| m.renewal_date >= from && m.renewal_date <= to)
                .count() as i64
        }))
    }
}

fn in_range(date: DateTime<Utc>, range: Option<(DateTime<Utc>, DateTime<Utc>)>) -> bool {
    range.is_none_or(|(from, to)| date >= from && date <= to)
}

#[async_trait]
impl ReportRepositoryTrait for InMemoryStore {
    async fn sales_per_product(&self) -> Result<Vec<ProductSalesSummary>, RepositoryError> {
        let mut rows: Vec<ProductSalesSummary> = self.with(|t| {
            let mut grouped: BTreeMap<i32, (f64, i64, f64, i64)> = BTreeMap::new();
            for sale in &t.sales {
                let entry = grouped.entry(sale.product_id).or_default();
                entry.0 += sale.total_sale_amount;
                entry.1 += i64::from(sale.quantity_sold);
                entry.2 += sale.sale_price;
                entry.3 += 1;
            }
            grouped
                .into_iter()
                .filter_map(|(product_id, (revenue, quantity, price_sum, count))| {
                    let product = t.products.iter().find(|p| p.product_id == product_id)?;
                    Some(ProductSalesSummary {
                        product_id,
                        product_name: product.name.clone(),
                        total_revenue: revenue,
                        total_quantity_sold: quantity,
                        average_sale_price: price_sum / count as f64,
                    })
                })
                .collect()
        });
        rows.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
        Ok(rows)
    }

    async fn sales_per_category(&self) -> Result<Vec<CategorySalesSummary>, RepositoryError> {
        let mut rows: Vec<CategorySalesSummary> = self.with(|t| {
            let mut grouped: BTreeMap<String, (f64, i64)> = BTreeMap::new();
            for sale in &t.sales {
                if let Some(product) = t.products.iter().find(|p| p.product_id == sale.product_id)
                {
                    let entry = grouped.entry(product.category.clone()).or_default();
                    entry.0 += sale.total_sale_amount;
                    entry.1 += i64::from(sale.quantity_sold);
                }
            }
            grouped
                .into_iter()
                .map(|(category, (revenue, quantity))| CategorySalesSummary {
                    category,
                    total_revenue: revenue,
                    total_quantity_sold: quantity,
                })
                .collect()
        });
        rows.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
        Ok(rows)
    }

    async fn top_selling_products(
        &self,
        limit: i64,
    ) -> Result<Vec<TopSellingProduct>, RepositoryError> {
        let mut rows: Vec<TopSellingProduct> = self
            .sales_per_product()
            .await?
            .into_iter()
            .map(|row| TopSellingProduct {
                product_id: row.product_id,
                product_name: row.product_name,
                total_quantity_sold: row.total_quantity_sold,
            })
            .collect();
        rows.sort_by(|a, b| b.total_quantity_sold.cmp(&a.total_quantity_sold));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn sales_totals(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<SalesTotals, RepositoryError> {
        Ok(self.with(|t| {
            let sales: Vec<&Sale> = t
                .sales
                .iter()
                .filter(|s| in_range(s.sale_date, range))
                .collect();
            let total_revenue: f64 = sales.iter().map(|s| s.total_sale_amount).sum();
            let total_sales = sales.len() as i64;
            SalesTotals {
                total_revenue,
                total_sales,
                avg_order_value: if total_sales > 0 {
                    total_revenue / total_sales as f64
                } else {
                    0.0
                },
                total_quantity_sold: sales.iter().map(|s| i64::from(s.quantity_sold)).sum(),
            }
        }))
    }

    async fn period_totals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodTotals, RepositoryError> {
        Ok(self.with(|t| {
            let sales: Vec<&Sale> = t
                .sales
                .iter()
                .filter(|s| s.sale_date >= from && s.sale_date < to)
                .collect();
            PeriodTotals {
                total_revenue: sales.iter().map(|s| s.total_sale_amount).sum(),
                total_sales: sales.len() as i64,
            }
        }))
    }

    async fn daily_sales_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailySales>, RepositoryError> {
        Ok(self.with(|t| {
            let mut grouped: BTreeMap<String, (f64, i64)> = BTreeMap::new();
            for sale in t.sales.iter().filter(|s| s.sale_date >= since) {
                let entry = grouped
                    .entry(sale.sale_date.format("%Y-%m-%d").to_string())
                    .or_default();
                entry.0 += sale.total_sale_amount;
                entry.1 += 1;
            }
            grouped
                .into_iter()
                .map(|(date, (sales, count))| DailySales { date, sales, count })
                .collect()
        }))
    }

    async fn top_products_by_revenue(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: i64,
    ) -> Result<Vec<TopProductRevenue>, RepositoryError> {
        let mut rows: Vec<TopProductRevenue> = self.with(|t| {
            let mut grouped: BTreeMap<i32, (f64, i64)> = BTreeMap::new();
            for sale in t.sales.iter().filter(|s| in_range(s.sale_date, range)) {
                let entry = grouped.entry(sale.product_id).or_default();
                entry.0 += sale.total_sale_amount;
                entry.1 += 1;
            }
            grouped
                .into_iter()
                .filter_map(|(product_id, (revenue, count))| {
                    let product = t.products.iter().find(|p| p.product_id == product_id)?;
                    Some(TopProductRevenue {
                        product_id,
                        product_name: product.name.clone(),
                        category: product.category.clone(),
                        total_revenue: revenue,
                        total_sales: count,
                    })
                })
                .collect()
        });
        rows.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn stock_alerts(
        &self,
        low_stock: i32,
        expiring_before: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<StockAlertItem>, RepositoryError> {
        Ok(self.with(|t| {
            t.stocks
                .iter()
                .filter(|s| {
                    s.stock < low_stock || s.expiry_date.is_some_and(|e| e < expiring_before)
                })
                .filter_map(|s| {
                    let product = t.products.iter().find(|p| p.product_id == s.product_id)?;
                    Some(StockAlertItem {
                        stock_id: s.stock_id,
                        product_id: s.product_id,
                        product_name: product.name.clone(),
                        stock: s.stock,
                        expiry_date: s.expiry_date,
                    })
                })
                .take(limit.max(0) as usize)
                .collect()
        }))
    }

    async fn sales_report(
        &self,
        filter: &SalesFilter,
    ) -> Result<SalesReportTotals, RepositoryError> {
        Ok(self.with(|t| {
            let sales: Vec<&Sale> = t
                .sales
                .iter()
                .filter(|s| in_range(s.sale_date, filter.range))
                .filter(|s| filter.product_id.is_none_or(|p| s.product_id == p))
                .filter(|s| {
                    filter.category.as_ref().is_none_or(|c| {
                        t.products
                            .iter()
                            .any(|p| p.product_id == s.product_id && &p.category == c)
                    })
                })
                .collect();
            SalesReportTotals {
                total_sales: sales.iter().map(|s| s.total_sale_amount).sum(),
                total_quantity: sales.iter().map(|s| i64::from(s.quantity_sold)).sum(),
            }
        }))
    }

    async fn inventory_report(&self) -> Result<Vec<InventoryReportRow>, RepositoryError> {
        Ok(self.with(|t| {
            t.stocks
                .iter()
                .map(|s| InventoryReportRow {
                    stock_id: s.stock_id,
                    product_id: s.product_id,
                    stock: s.stock,
                    total_sales: t
                        .sales
                        .iter()
                        .filter(|sale| sale.product_id == s.product_id)
                        .map(|sale| i64::from(sale.quantity_sold))
                        .sum(),
                })
                .collect()
        }))
    }
}

/// Records every call and answers with a canned body, or fails when built
/// with [`FakeMlClient::failing`].
#[derive(Default)]
pub struct FakeMlClient {
    pub calls: Mutex<Vec<(String, Value)>>,
    fail: bool,
}

impl FakeMlClient {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::default(),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MlClientTrait for FakeMlClient {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));

        if self.fail {
            return Err(ServiceError::Upstream("connection refused".into()));
        }

        Ok(json!({ "path": path, "accepted": true }))
    }
}

/// Points at a closed port; every cache call degrades to a miss.
pub fn offline_cache() -> Arc<CacheStore> {
    let pool = RedisConfig::new("127.0.0.1".into(), 1, 0, None)
        .create_pool()
        .expect("redis pool");
    Arc::new(CacheStore::new(pool))
}

pub struct Services {
    pub store: Arc<InMemoryStore>,
    pub ml: Arc<FakeMlClient>,
    pub product: ProductService,
    pub stock: StockService,
    pub sale: SaleService,
    pub category: CategoryService,
    pub notification: NotificationService,
    pub predict: PredictService,
    pub membership: MembershipService,
    pub report: ReportService,
}

pub fn services() -> Services {
    services_with_ml(Arc::new(FakeMlClient::default()))
}

pub fn services_with_ml(ml: Arc<FakeMlClient>) -> Services {
    let store = InMemoryStore::new();
    let cache = offline_cache();
    let metrics = Metrics::new();

    Services {
        product: ProductService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            cache.clone(),
            metrics.clone(),
        ),
        stock: StockService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            cache.clone(),
            metrics.clone(),
        ),
        sale: SaleService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            cache.clone(),
            metrics.clone(),
        ),
        category: CategoryService::new(store.clone(), store.clone(), cache.clone(), metrics.clone()),
        notification: NotificationService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            metrics.clone(),
        ),
        predict: PredictService::new(ml.clone(), store.clone(), metrics.clone()),
        membership: MembershipService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            cache,
            metrics.clone(),
        ),
        report: ReportService::new(store.clone(), metrics),
        store,
        ml,
    }
}
