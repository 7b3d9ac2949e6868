use async_trait::async_trait;
use mentorsync_core::errors::BookingResult;
use mockall::mock;

use super::{PaymentGateway, PaymentOrder};

// Mock payment gateway for testing
mock! {
    pub Gateway {}

    #[async_trait]
    impl PaymentGateway for Gateway {
        async fn create_order(&self, amount: i64, receipt: &str) -> BookingResult<PaymentOrder>;

        fn verify_signature(
            &self,
            order_id: &str,
            payment_id: &str,
            signature: &str,
        ) -> BookingResult<()>;

        async fn refund(&self, payment_id: &str, amount: i64) -> BookingResult<()>;
    }
}
