//! Order history and payment endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    CreatePaymentOrderRequest, Order, PaymentOrder, VerifyPaymentRequest, VerifyPaymentResponse,
};

impl ApiClient {
    pub async fn user_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders/user", true).await
    }

    /// Create a pending order and the gateway session that pays for it.
    pub async fn create_payment_order(&self, shipping_address: &str) -> Result<PaymentOrder, ApiError> {
        let body = CreatePaymentOrderRequest {
            shipping_address: shipping_address.to_string(),
        };
        self.post("/orders/create-payment-order", &body, true).await
    }

    pub async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        self.post("/orders/verify-payment", request, true).await
    }
}
