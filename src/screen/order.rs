//! Order management: read-only list with the richest filter set in the app,
//! plus a detail selection over the already-loaded rows.

use chrono::NaiveDate;

use crate::api::ApiGateway;
use crate::model::entity::{Order, PaymentStatus};
use crate::notice::Notices;

use super::list::{FilterSet, ListController};

pub const ORDER_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub email: String,
    pub product_name: String,
    pub min_price: String,
    pub max_price: String,
    pub payment_status: Option<PaymentStatus>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub order_type: String,
}

impl FilterSet for OrderFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        let email = self.email.trim();
        if !email.is_empty() {
            query.push(("Email", email.to_string()));
        }
        let product = self.product_name.trim();
        if !product.is_empty() {
            query.push(("Name", product.to_string()));
        }
        if let Ok(min) = self.min_price.trim().parse::<f64>() {
            query.push(("MinPrice", min.to_string()));
        }
        if let Ok(max) = self.max_price.trim().parse::<f64>() {
            query.push(("MaxPrice", max.to_string()));
        }
        if let Some(status) = self.payment_status {
            query.push(("PaymentStatus", status.code().to_string()));
        }
        if let Some(from) = self.from_date {
            query.push(("FromDate", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to_date {
            query.push(("ToDate", to.format("%Y-%m-%d").to_string()));
        }
        let order_type = self.order_type.trim();
        if !order_type.is_empty() {
            query.push(("OrderType", order_type.to_string()));
        }

        query
    }
}

#[derive(Debug)]
pub struct OrderScreen {
    list: ListController<Order, OrderFilter>,
    detail: Option<Order>,
}

impl OrderScreen {
    pub fn new() -> Self {
        Self {
            list: ListController::new("/orders", ORDER_PAGE_SIZE),
            detail: None,
        }
    }

    pub fn list(&self) -> &ListController<Order, OrderFilter> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<Order, OrderFilter> {
        &mut self.list
    }

    pub fn detail(&self) -> Option<&Order> {
        self.detail.as_ref()
    }

    pub async fn load<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.list.load(api, notices, 1).await
    }

    /// Detail view is a selection over the rows already on screen; nothing
    /// is fetched.
    pub fn open_detail(&mut self, index: usize) -> bool {
        match self.list.items().get(index) {
            Some(order) => {
                self.detail = Some(order.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

impl Default for OrderScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_filled_filters_are_sent() {
        let filter = OrderFilter {
            email: "  user@mail.com ".into(),
            min_price: "100".into(),
            max_price: "not a number".into(),
            payment_status: Some(PaymentStatus::Paid),
            from_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            ..Default::default()
        };

        let query = filter.query();
        assert!(query.contains(&("Email", "user@mail.com".to_string())));
        assert!(query.contains(&("MinPrice", "100".to_string())));
        assert!(query.contains(&("PaymentStatus", "1".to_string())));
        assert!(query.contains(&("FromDate", "2025-01-15".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "MaxPrice"));
        assert!(!query.iter().any(|(k, _)| *k == "Name"));
        assert!(!query.iter().any(|(k, _)| *k == "OrderType"));
    }

    #[test]
    fn empty_filter_sends_nothing() {
        assert!(OrderFilter::default().query().is_empty());
    }
}
