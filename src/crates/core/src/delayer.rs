use async_trait::async_trait;

use crate::model::Delay;

/// Applies a mapping's configured response delay. Modeled as a trait so
/// future variants (uniform, lognormal, ...) slot in without touching the
/// matcher, which never sees a Delay at all.
#[async_trait]
pub trait Delayer: Send + Sync {
    async fn apply(&self, delay: Option<&Delay>);
}

/// The only implementation today: sleeps for the fixed duration on the
/// calling task. A missing delay is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseDelayer;

impl ResponseDelayer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Delayer for ResponseDelayer {
    async fn apply(&self, delay: Option<&Delay>) {
        let Some(Delay::Fixed(fixed)) = delay else {
            return;
        };

        if fixed.duration.is_zero() {
            return;
        }

        tokio::time::sleep(fixed.duration).await;
    }
}
