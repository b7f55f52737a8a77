use crate::client::Client;
use crate::errors::Result;
use crate::models::Subscription;
use crate::paging::Page;
use crate::validation;

/// Subscriptions live on the resource manager itself, not the media provider.
const SUBSCRIPTIONS_API_VERSION: &str = "2020-01-01";

impl Client {
    /// List the subscriptions the access token can see.
    pub async fn list_subscriptions(&self) -> Result<Page<Subscription>> {
        let mut url = self.url(&["subscriptions"])?;
        url.query_pairs_mut()
            .clear()
            .append_pair("api-version", SUBSCRIPTIONS_API_VERSION);
        self.get(url).await
    }

    /// Fetch a single subscription.
    pub async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        validation::subscription_id(subscription_id)?;
        let mut url = self.url(&["subscriptions", subscription_id])?;
        url.query_pairs_mut()
            .clear()
            .append_pair("api-version", SUBSCRIPTIONS_API_VERSION);
        self.get(url).await
    }
}
