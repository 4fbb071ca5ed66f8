use serde::{Deserialize, Serialize};

/// Payment state as the backend encodes it (`0..=3`); anything newer the
/// backend starts sending is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Failed,
    Cancelled,
    Unknown(i32),
}

impl PaymentStatus {
    pub fn code(&self) -> i32 {
        match self {
            Self::Unpaid => 0,
            Self::Paid => 1,
            Self::Failed => 2,
            Self::Cancelled => 3,
            Self::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unpaid => "Chưa thanh toán",
            Self::Paid => "Đã thanh toán",
            Self::Failed => "Thất bại",
            Self::Cancelled => "Đã hủy",
            Self::Unknown(_) => "Không xác định",
        }
    }
}

impl From<i32> for PaymentStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Unpaid,
            1 => Self::Paid,
            2 => Self::Failed,
            3 => Self::Cancelled,
            other => Self::Unknown(other),
        }
    }
}

impl From<PaymentStatus> for i32 {
    fn from(status: PaymentStatus) -> Self {
        status.code()
    }
}

/// Orders are read-only for staff: no create, update, or delete anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: String,
    course_id: Option<String>,
    item_id: Option<String>,
    #[serde(default)]
    purchase_cost: f64,
    #[serde(default)]
    coin_cost: f64,
    paid_at: Option<String>,
    payment_status: PaymentStatus,
    item_name: Option<String>,
    course_title: Option<String>,
    #[serde(default)]
    email: String,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl Order {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn purchase_cost(&self) -> f64 {
        self.purchase_cost
    }

    pub fn coin_cost(&self) -> f64 {
        self.coin_cost
    }

    pub fn paid_at(&self) -> Option<&str> {
        self.paid_at.as_deref()
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// The purchased product's display name, whichever side of the
    /// course/item split this order is on.
    pub fn product_name(&self) -> Option<&str> {
        self.course_title.as_deref().or(self.item_name.as_deref())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_codes_roundtrip() {
        for code in 0..=3 {
            assert_eq!(PaymentStatus::from(code).code(), code);
        }
        assert_eq!(PaymentStatus::from(9), PaymentStatus::Unknown(9));
        assert_eq!(PaymentStatus::Paid.label(), "Đã thanh toán");
    }
}
