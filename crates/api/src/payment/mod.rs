//! Payment gateway collaborator.
//!
//! The booking coordinator consumes three operations: order creation before
//! any database write, HMAC-SHA256 signature verification at commit time,
//! and refunds for payments that verified but lost the capacity race.
//! Signature comparison is constant-time.

pub mod mock;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use mentorsync_core::errors::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// A payment order created at reservation time. The order carries its own
/// expiry on the gateway side; no capacity is held against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment order for `amount` minor currency units.
    async fn create_order(&self, amount: i64, receipt: &str) -> BookingResult<PaymentOrder>;

    /// Checks the gateway's `order_id|payment_id` signature. Fails with
    /// [`BookingError::PaymentVerification`] on mismatch.
    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> BookingResult<()>;

    /// Refunds a captured payment. Invoked when a verified payment loses
    /// the capacity race; must never be skipped silently.
    async fn refund(&self, payment_id: &str, amount: i64) -> BookingResult<()>;
}

/// Razorpay-style REST client.
pub struct RazorpayGateway {
    key_id: String,
    key_secret: String,
    base_url: String,
    currency: String,
    http: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(key_id: String, key_secret: String, base_url: String) -> Self {
        Self {
            key_id,
            key_secret,
            base_url,
            currency: "INR".to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn expected_signature(&self, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex_encode(&mac.finalize().into_bytes())
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, amount: i64, receipt: &str) -> BookingResult<PaymentOrder> {
        debug!("Creating payment order: amount={}, receipt={}", amount, receipt);

        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount,
                "currency": self.currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| BookingError::Internal(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BookingError::Internal(
                format!("payment gateway rejected order ({}): {}", status, body).into(),
            ));
        }

        #[derive(Deserialize)]
        struct OrderResponse {
            id: String,
            amount: i64,
            currency: String,
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| BookingError::Internal(Box::new(e)))?;

        Ok(PaymentOrder {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> BookingResult<()> {
        let expected = self.expected_signature(order_id, payment_id);
        if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
            Ok(())
        } else {
            Err(BookingError::PaymentVerification(format!(
                "signature mismatch for order {}",
                order_id
            )))
        }
    }

    async fn refund(&self, payment_id: &str, amount: i64) -> BookingResult<()> {
        debug!("Refunding payment {}: amount={}", payment_id, amount);

        let response = self
            .http
            .post(format!("{}/v1/payments/{}/refund", self.base_url, payment_id))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({ "amount": amount }))
            .send()
            .await
            .map_err(|e| BookingError::Internal(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BookingError::Internal(
                format!("payment gateway rejected refund ({}): {}", status, body).into(),
            ));
        }

        Ok(())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> RazorpayGateway {
        RazorpayGateway::new(
            "rzp_test_key".to_string(),
            "test_secret".to_string(),
            "https://api.razorpay.example".to_string(),
        )
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex_encode(&mac.finalize().into_bytes())
    }

    #[test]
    fn verify_signature_valid() {
        let gateway = gateway();
        let signature = sign("test_secret", "order_123", "pay_456");

        assert!(gateway
            .verify_signature("order_123", "pay_456", &signature)
            .is_ok());
    }

    #[test]
    fn verify_signature_invalid() {
        let gateway = gateway();
        let signature = sign("wrong_secret", "order_123", "pay_456");

        let result = gateway.verify_signature("order_123", "pay_456", &signature);
        assert!(matches!(
            result,
            Err(BookingError::PaymentVerification(_))
        ));
    }

    #[test]
    fn verify_signature_rejects_other_order() {
        let gateway = gateway();
        let signature = sign("test_secret", "order_123", "pay_456");

        assert!(gateway
            .verify_signature("order_999", "pay_456", &signature)
            .is_err());
    }

    #[test]
    fn hex_encode_lowercase() {
        assert_eq!(hex_encode(&[0x00, 0xab, 0xff]), "00abff");
    }
}
