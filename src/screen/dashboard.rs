//! Revenue summary view.

use chrono::NaiveDate;

use crate::api::{ApiGateway, Reply};
use crate::model::entity::Revenue;
use crate::notice::Notices;

use super::seq::RequestSeq;

#[derive(Debug)]
pub struct DashboardScreen {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    revenue: Option<Revenue>,
    loading: bool,
    seq: RequestSeq,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            revenue: None,
            loading: false,
            seq: RequestSeq::new(),
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn revenue(&self) -> Option<&Revenue> {
        self.revenue.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.start_date = start;
        self.end_date = end;
    }

    pub async fn load_revenue<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let mut query = Vec::new();
        if let Some(start) = self.start_date {
            query.push(("StartDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("EndDate", end.format("%Y-%m-%d").to_string()));
        }

        self.loading = true;
        let token = self.seq.issue();
        let outcome = api.fetch::<Revenue>("/dashboards/revenue", &query).await;

        if !self.seq.is_current(token) {
            return false;
        }
        self.loading = false;

        match outcome.and_then(Reply::require_data) {
            Ok(revenue) => {
                self.revenue = Some(revenue);
                true
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    notices.error(e.user_message_or("Không thể tải dữ liệu doanh thu"));
                }
                false
            }
        }
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}
