use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer record as it travels over the wire.
///
/// `customer_id` doubles as the document primary key. The other fields are
/// free-form: no tier enumeration, no currency semantics on `balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[validate(length(min = 1, message = "customerId must not be empty"))]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_status: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "integral_number::deserialize"
    )]
    pub balance: Option<i32>,
}

impl Customer {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            vip_status: None,
            balance: None,
        }
    }

    pub fn with_vip_status(mut self, vip_status: impl Into<String>) -> Self {
        self.vip_status = Some(vip_status.into());
        self
    }

    pub fn with_balance(mut self, balance: i32) -> Self {
        self.balance = Some(balance);
        self
    }
}

/// Stored shape: the customer fields plus `_id` mirroring `customerId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub customer: Customer,
}

impl From<Customer> for CustomerDocument {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.customer_id.clone(),
            customer,
        }
    }
}

/// Reads an optional `i32` from any integral number, including doubles such
/// as `1000.0` that the mongo shell writes for plain numeric literals.
mod integral_number {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalIntVisitor)
    }

    struct OptionalIntVisitor;

    impl<'de> Visitor<'de> for OptionalIntVisitor {
        type Value = Option<i32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an optional 32-bit integer")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(IntVisitor).map(Some)
        }
    }

    struct IntVisitor;

    impl<'de> Visitor<'de> for IntVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integral number within the 32-bit range")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
            let in_range = v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX);
            if v.fract() == 0.0 && in_range {
                Ok(v as i32)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }
}
