//! Checkout and payment.
//!
//! A linear state machine: the shopper submits shipping details, the
//! backend creates a pending order plus a gateway session, the external
//! payment widget collects the payment, and the backend verifies it. Any
//! failure or a dismissed widget puts the flow back where submit is allowed
//! again. Nothing is retried automatically.

mod widget;

pub use widget::{GatewayPayment, PaymentEvent, PaymentPrefill, PaymentRequest, PaymentWidget};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::format::format_price;
use crate::models::{cart_subtotal, CartItem, PaymentOrder, VerifyPaymentRequest};
use crate::routes::Route;

pub const MERCHANT_NAME: &str = "TinyToTrend";
pub const FREE_DELIVERY_LABEL: &str = "FREE";

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    Idle,
    CreatingOrder,
    AwaitingPayment { order_id: i64 },
    Verifying { order_id: i64 },
    Succeeded { order_id: i64, payment_id: String },
    /// `order_id` is set when the backend already created a pending order
    Failed { order_id: Option<i64>, message: String },
    /// Widget dismissed; the order stays pending and unverified
    Cancelled { order_id: i64 },
}

impl CheckoutState {
    /// Whether the place-order control accepts a click in this state.
    pub fn submit_enabled(&self) -> bool {
        matches!(
            self,
            CheckoutState::Idle | CheckoutState::Failed { .. } | CheckoutState::Cancelled { .. }
        )
    }

    /// Status line shown under the form.
    pub fn message(&self) -> Option<String> {
        match self {
            CheckoutState::Idle => None,
            CheckoutState::CreatingOrder => Some("Processing...".to_string()),
            CheckoutState::AwaitingPayment { .. } => Some("Waiting for payment...".to_string()),
            CheckoutState::Verifying { .. } => Some("Verifying payment...".to_string()),
            CheckoutState::Succeeded {
                order_id,
                payment_id,
            } => Some(format!(
                "Payment Successful! Order ID: {} Payment ID: {}",
                order_id, payment_id
            )),
            CheckoutState::Failed { message, .. } => Some(message.clone()),
            CheckoutState::Cancelled { .. } => {
                Some("Payment cancelled. Your order is pending.".to_string())
            }
        }
    }
}

/// Shipping form fields as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub mobile: String,
}

impl ShippingDetails {
    pub fn new(name: &str, address: &str, mobile: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            mobile: mobile.to_string(),
        }
    }

    /// Trimmed copy, or a validation error if any field is blank.
    pub fn validated(&self) -> ClientResult<ShippingDetails> {
        let trimmed = ShippingDetails::new(self.name.trim(), self.address.trim(), self.mobile.trim());
        if trimmed.name.is_empty() || trimmed.address.is_empty() || trimmed.mobile.is_empty() {
            return Err(ClientError::validation("Please fill in all required fields"));
        }
        Ok(trimmed)
    }

    /// Single-string address the order endpoint stores.
    pub fn shipping_address(&self) -> String {
        format!("{}\n{}\nMobile: {}", self.name, self.address, self.mobile)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub name: String,
    pub meta: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub image_url: Option<String>,
}

impl SummaryLine {
    /// `₹499.00 × 2`
    pub fn price_label(&self) -> String {
        format!("{} × {}", format_price(self.unit_price), self.quantity)
    }
}

/// Client-computed totals: a plain sum, delivery always free.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn from_cart(items: &[CartItem]) -> Self {
        let lines = items
            .iter()
            .map(|item| SummaryLine {
                name: item.product.name.clone(),
                meta: [Some(item.product.category.as_str()), item.product.gender_tag.as_deref()]
                    .into_iter()
                    .flatten()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" • "),
                unit_price: item.product.price,
                quantity: item.quantity,
                image_url: item.product.image_url.clone(),
            })
            .collect();
        let subtotal = cart_subtotal(items);
        Self {
            lines,
            subtotal,
            total: subtotal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn delivery_label(&self) -> &'static str {
        FREE_DELIVERY_LABEL
    }
}

pub struct Checkout {
    api: ApiClient,
    state: Mutex<CheckoutState>,
    summary: Mutex<Option<OrderSummary>>,
}

impl Checkout {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(CheckoutState::Idle),
            summary: Mutex::new(None),
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state.lock().clone()
    }

    /// Submit is allowed in a resting state and only with a non-empty cart.
    pub fn submit_enabled(&self) -> bool {
        let has_items = self
            .summary
            .lock()
            .as_ref()
            .map(|summary| !summary.is_empty())
            .unwrap_or(false);
        has_items && self.state.lock().submit_enabled()
    }

    /// Fetch the cart and compute the summary shown beside the form.
    pub async fn load_summary(&self) -> ClientResult<OrderSummary> {
        self.api.session().require_auth(&Route::Checkout.path())?;
        let items = self.api.cart().await?;
        let summary = OrderSummary::from_cart(&items);
        *self.summary.lock() = Some(summary.clone());
        Ok(summary)
    }

    /// Run the flow from order creation to a resting state.
    ///
    /// Local problems (not logged in, blank fields, empty cart, a flow
    /// already running) are errors and change nothing. Request and payment
    /// failures end in [`CheckoutState::Failed`] or
    /// [`CheckoutState::Cancelled`], both of which re-enable submit.
    pub async fn place_order(
        &self,
        details: &ShippingDetails,
        widget: &dyn PaymentWidget,
    ) -> ClientResult<CheckoutState> {
        let session = self.api.session().require_auth(&Route::Checkout.path())?;
        let details = details.validated()?;

        {
            let summary = self.summary.lock();
            if summary.as_ref().map(OrderSummary::is_empty).unwrap_or(true) {
                return Err(ClientError::validation("Your cart is empty"));
            }
            let mut state = self.state.lock();
            if !state.submit_enabled() {
                return Err(ClientError::validation("Checkout is already in progress"));
            }
            *state = CheckoutState::CreatingOrder;
        }

        let order = match self.api.create_payment_order(&details.shipping_address()).await {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "Failed to create payment order");
                return Ok(self.settle(CheckoutState::Failed {
                    order_id: None,
                    message: e.message,
                }));
            }
        };
        info!(order_id = order.order_id, "Pending order created");

        self.set(CheckoutState::AwaitingPayment {
            order_id: order.order_id,
        });
        let request = PaymentRequest::for_order(&order, &details, session.email.as_deref());
        let event = widget.collect(&request).await;

        let next = match event {
            PaymentEvent::Success(payment) => self.verify(&order, payment).await,
            PaymentEvent::Failure { description } => {
                warn!(order_id = order.order_id, %description, "Payment failed");
                CheckoutState::Failed {
                    order_id: Some(order.order_id),
                    message: format!("Payment failed: {}", description),
                }
            }
            PaymentEvent::Dismissed => {
                info!(order_id = order.order_id, "Payment widget dismissed");
                CheckoutState::Cancelled {
                    order_id: order.order_id,
                }
            }
        };
        Ok(self.settle(next))
    }

    async fn verify(&self, order: &PaymentOrder, payment: GatewayPayment) -> CheckoutState {
        self.set(CheckoutState::Verifying {
            order_id: order.order_id,
        });

        let request = VerifyPaymentRequest {
            order_id: order.order_id.to_string(),
            razorpay_order_id: payment.razorpay_order_id,
            razorpay_payment_id: payment.razorpay_payment_id.clone(),
            razorpay_signature: payment.razorpay_signature,
        };

        match self.api.verify_payment(&request).await {
            Ok(response) if response.success => {
                info!(order_id = order.order_id, "Payment verified");
                CheckoutState::Succeeded {
                    order_id: order.order_id,
                    payment_id: payment.razorpay_payment_id,
                }
            }
            outcome => {
                let reason = match outcome {
                    Ok(response) => response
                        .error
                        .unwrap_or_else(|| "Payment verification failed".to_string()),
                    Err(e) => e.message,
                };
                warn!(order_id = order.order_id, %reason, "Payment verification failed");
                CheckoutState::Failed {
                    order_id: Some(order.order_id),
                    message: format!(
                        "Payment verification failed. Please contact support with Order ID: {}",
                        order.order_id
                    ),
                }
            }
        }
    }

    fn set(&self, state: CheckoutState) {
        *self.state.lock() = state;
    }

    fn settle(&self, state: CheckoutState) -> CheckoutState {
        self.set(state.clone());
        state
    }
}
