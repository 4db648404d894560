//! Domain DTOs for the product-monitoring API.
//!
//! # Design
//! These types mirror the backend's camelCase JSON but are defined
//! independently of the mock-server crate. Integration tests catch schema
//! drift between the two.

use serde::{Deserialize, Serialize};

/// Whether the backend's last verification found the product still listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    Invalid,
    Valid,
}

impl Validity {
    pub fn code(self) -> u8 {
        match self {
            Validity::Invalid => 0,
            Validity::Valid => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Validity::Invalid),
            1 => Some(Validity::Valid),
            _ => None,
        }
    }
}

/// Whether an operator has acknowledged an invalid product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmStatus {
    Pending,
    Confirmed,
}

impl ConfirmStatus {
    pub fn code(self) -> u8 {
        match self {
            ConfirmStatus::Pending => 0,
            ConfirmStatus::Confirmed => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ConfirmStatus::Pending),
            1 => Some(ConfirmStatus::Confirmed),
            _ => None,
        }
    }
}

macro_rules! int_coded_serde {
    ($ty:ident, $what:literal) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = u8::deserialize(deserializer)?;
                $ty::from_code(code).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid {} code: {code}", $what))
                })
            }
        }
    };
}

int_coded_serde!(Validity, "validity");
int_coded_serde!(ConfirmStatus, "confirm status");

/// Filters and paging for the product list. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub is_valid: Option<Validity>,
    pub sale_region: Option<String>,
    pub keyword: Option<String>,
    pub confirm_status: Option<ConfirmStatus>,
}

impl ProductQuery {
    /// Query-string pairs in wire order, skipping unset fields.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
        if let Some(is_valid) = self.is_valid {
            params.push(("isValid".to_string(), is_valid.code().to_string()));
        }
        if let Some(region) = &self.sale_region {
            params.push(("saleRegion".to_string(), region.clone()));
        }
        if let Some(keyword) = &self.keyword {
            params.push(("keyword".to_string(), keyword.clone()));
        }
        if let Some(status) = self.confirm_status {
            params.push(("confirmStatus".to_string(), status.code().to_string()));
        }
        params
    }
}

/// The backend's response envelope. `code == 200` means success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResult<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// One page of a paged listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub pages: u32,
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

/// A product row as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredProduct {
    #[serde(default)]
    pub id: Option<u64>,
    pub product_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub sale_region: Option<String>,
    #[serde(default)]
    pub is_valid: Option<Validity>,
    #[serde(default)]
    pub confirm_status: Option<ConfirmStatus>,
    /// Basis points, `100` is 1%.
    #[serde(default)]
    pub commission_rate: Option<i64>,
    #[serde(default)]
    pub commission_amount: Option<f64>,
    #[serde(default)]
    pub commission_currency: Option<String>,
    #[serde(default)]
    pub last_check_time: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Acknowledgement returned when a verification run is triggered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerAck {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
