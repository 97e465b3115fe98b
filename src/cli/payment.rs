use async_trait::async_trait;
use tracing::warn;

use crate::checkout::{GatewayPayment, PaymentEvent, PaymentRequest, PaymentWidget};
use crate::format::format_paise;

/// Payment widget for the terminal.
///
/// Prints the gateway parameters and asks for the identifiers the hosted
/// checkout returned. An empty payment id is a dismiss; `fail: <reason>`
/// reports a gateway failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPaymentWidget;

#[async_trait]
impl PaymentWidget for TerminalPaymentWidget {
    async fn collect(&self, request: &PaymentRequest) -> PaymentEvent {
        println!("=== {} ===", request.name);
        println!("{}", request.description);
        println!("Amount:        {} ({})", format_paise(request.amount), request.currency);
        println!("Gateway order: {}", request.order_id);
        println!("Key:           {}", request.key);
        println!();
        println!("Complete the payment, then enter the identifiers it returned.");

        let payment_id = match prompt("Payment ID (empty to cancel): ").await {
            Some(answer) => answer,
            None => return PaymentEvent::Dismissed,
        };
        if payment_id.is_empty() {
            return PaymentEvent::Dismissed;
        }
        if let Some(reason) = payment_id.strip_prefix("fail:") {
            return PaymentEvent::Failure {
                description: reason.trim().to_string(),
            };
        }

        let signature = match prompt("Signature: ").await {
            Some(answer) if !answer.is_empty() => answer,
            _ => return PaymentEvent::Dismissed,
        };

        PaymentEvent::Success(GatewayPayment {
            razorpay_order_id: request.order_id.clone(),
            razorpay_payment_id: payment_id,
            razorpay_signature: signature,
        })
    }
}

/// Read one trimmed line from stdin. `None` on EOF or read failure.
async fn prompt(label: &str) -> Option<String> {
    use std::io::Write;

    print!("{}", label);
    let _ = std::io::stdout().flush();

    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|n| (n, line))
    })
    .await;

    match read {
        Ok(Ok((0, _))) => None,
        Ok(Ok((_, line))) => Some(line.trim().to_string()),
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to read from stdin");
            None
        }
        Err(e) => {
            warn!(error = %e, "Stdin reader task failed");
            None
        }
    }
}
