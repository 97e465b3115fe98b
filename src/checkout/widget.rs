use async_trait::async_trait;
use serde::Serialize;

use super::{ShippingDetails, MERCHANT_NAME};
use crate::models::PaymentOrder;

/// Options handed to the payment overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub key: String,
    /// Smallest currency unit
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: PaymentPrefill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl PaymentRequest {
    pub fn for_order(order: &PaymentOrder, details: &ShippingDetails, email: Option<&str>) -> Self {
        Self {
            key: order.key.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_string(),
            description: format!("Order #{}", order.order_id),
            order_id: order.razorpay_order_id.clone(),
            prefill: PaymentPrefill {
                name: details.name.clone(),
                email: email.unwrap_or_default().to_string(),
                contact: details.mobile.clone(),
            },
        }
    }
}

/// Identifiers the gateway returns after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayPayment {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    Success(GatewayPayment),
    Failure { description: String },
    Dismissed,
}

/// The external payment overlay. It may take as long as it likes; the
/// checkout waits without a timeout.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    async fn collect(&self, request: &PaymentRequest) -> PaymentEvent;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_order_reference_and_prefill() {
        let order = PaymentOrder {
            order_id: 42,
            razorpay_order_id: "order_Abc".to_string(),
            amount: 99800,
            currency: "INR".to_string(),
            key: "rzp_test_key".to_string(),
        };
        let details = ShippingDetails::new("Asha", "12 MG Road", "9876543210");
        let request = PaymentRequest::for_order(&order, &details, None);

        assert_eq!(request.description, "Order #42");
        assert_eq!(request.order_id, "order_Abc");
        assert_eq!(request.name, "TinyToTrend");
        assert_eq!(request.prefill.contact, "9876543210");
        assert_eq!(request.prefill.email, "");
    }
}
